pub mod blocklist;
pub mod event_log;
