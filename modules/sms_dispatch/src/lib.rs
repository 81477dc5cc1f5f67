// === PUBLIC CONTRACT ===
// Only the contract module should be used by other crates
pub mod contract;

pub use contract::{client, error, model};

// === MODULE DEFINITION ===
// Wiring of ports, adapters and the REST surface
pub mod module;
pub use module::SmsDispatch;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
