pub mod emitter;
pub mod error;
pub mod events;
pub mod guard;
pub mod ports;
pub mod service;
pub mod validation;
pub mod worker_pool;
