pub mod config;
pub mod logging;
mod paths;

pub use config::{default_logging_config, AppConfig, CliArgs, LoggingConfig, Section, ServerConfig};
