// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod memory;
pub mod notify;

pub use http::ApperStore;
pub use memory::InMemoryStore;
pub use notify::{ConsoleNotifier, LogNotifier, RecordingNotifier};
