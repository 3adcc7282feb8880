#[cfg(feature = "cli")]
pub mod cli;
pub mod store_config;

#[cfg(feature = "cli")]
pub use cli::Cli;
pub use store_config::{AppConfig, LoggingConfig, StoreConfig};
