pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;

pub use adapters::{ApperStore, ConsoleNotifier, InMemoryStore, LogNotifier, RecordingNotifier};
pub use config::{AppConfig, StoreConfig};
pub use self::core::{hub::StaffHub, BatchOutcome, Entity, Repository};
pub use domain::model::*;
pub use domain::ports::{Notifier, RecordStore};
pub use utils::error::{HrError, Result};
