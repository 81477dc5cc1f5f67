pub mod blocklist;
pub mod event_log;

pub use blocklist::BlocklistStore;
pub use event_log::{Delivery, EventLog, PublishError, PublishFuture};
