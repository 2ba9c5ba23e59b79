//! Application services shared by every board frame
//!
//! Services are created once by the application, initialized explicitly and
//! handed to frames as `Arc<Services>`. Nothing reaches them through globals.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::CoreError;
use crate::Result;

/// Maps help topics to their text.
#[derive(Debug, Clone, Default)]
pub struct HelpBroker {
    topics: BTreeMap<String, String>,
}

impl HelpBroker {
    pub fn new(topics: BTreeMap<String, String>) -> Self {
        Self { topics }
    }

    pub fn text(&self, topic: &str) -> Option<&str> {
        self.topics.get(topic).map(String::as_str)
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct Services {
    help: RwLock<Option<HelpBroker>>,
}

impl Services {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&self, help_topics: BTreeMap<String, String>) -> Result<()> {
        let mut help = self.help.write();
        if help.is_some() {
            return Err(CoreError::AlreadyInitialized);
        }
        tracing::info!(topics = help_topics.len(), "Initializing services");
        *help = Some(HelpBroker::new(help_topics));
        Ok(())
    }

    pub fn teardown(&self) {
        if self.help.write().take().is_some() {
            tracing::info!("Services torn down");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.help.read().is_some()
    }

    /// Returns None for unknown topics and before `init`.
    pub fn help_text(&self, topic: &str) -> Option<String> {
        let help = self.help.read();
        match help.as_ref() {
            Some(broker) => broker.text(topic).map(str::to_string),
            None => {
                tracing::debug!(topic, "Help requested before services were initialized");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics() -> BTreeMap<String, String> {
        BTreeMap::from([("nets".to_string(), "Shows the nets of the board".to_string())])
    }

    #[test]
    fn test_help_lifecycle() {
        let services = Services::new();
        assert_eq!(services.help_text("nets"), None);

        services.init(topics()).unwrap();
        assert!(services.is_initialized());
        assert_eq!(services.help_text("nets").as_deref(), Some("Shows the nets of the board"));
        assert_eq!(services.help_text("vias"), None);

        services.teardown();
        assert!(!services.is_initialized());
        assert_eq!(services.help_text("nets"), None);
    }

    #[test]
    fn test_double_init_rejected() {
        let services = Services::new();
        services.init(topics()).unwrap();
        assert!(matches!(services.init(topics()), Err(CoreError::AlreadyInitialized)));

        services.teardown();
        services.init(BTreeMap::new()).unwrap();
    }
}
