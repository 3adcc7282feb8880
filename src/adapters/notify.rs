use crate::domain::ports::Notifier;
use std::sync::Mutex;

/// Sends notifications to the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "staffhub::notify", "{}", message);
    }
}

/// Prints notifications for a person at a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_notifiers_behind_trait_object() {
        let recording = Arc::new(RecordingNotifier::new());
        let sinks: Vec<Arc<dyn Notifier>> = vec![Arc::new(LogNotifier), recording.clone()];

        for sink in &sinks {
            sink.error("Record 7 not found");
        }
        recording.error("duplicate email");

        assert_eq!(
            recording.messages(),
            vec!["Record 7 not found".to_string(), "duplicate email".to_string()]
        );
    }
}
