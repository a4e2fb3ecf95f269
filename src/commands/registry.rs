//! Command handler registry
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::TextCommandHandler;

/// Registry mapping command names to handlers
///
/// Multiple command names can map to the same handler if they share logic.
/// Lookups are case-insensitive.
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn TextCommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for its declared command names
    pub fn register(&mut self, handler: Arc<dyn TextCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Get the handler for a command word, ignoring case
    pub fn get(&self, word: &str) -> Option<Arc<dyn TextCommandHandler>> {
        self.handlers.get(word.to_lowercase().as_str()).cloned()
    }

    /// Handler for a message split into `words`, if its name and word count both match
    pub fn resolve(&self, words: &[&str]) -> Option<Arc<dyn TextCommandHandler>> {
        let first = words.first()?;
        self.get(first)
            .filter(|handler| handler.word_count() == words.len())
    }

    /// Check if a command is registered
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Number of registered command names
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::{CommandContext, Invocation};
    use anyhow::Result;
    use async_trait::async_trait;

    // Mock handler for testing
    struct MockHandler {
        names: &'static [&'static str],
        words: usize,
    }

    #[async_trait]
    impl TextCommandHandler for MockHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        fn word_count(&self) -> usize {
            self.words
        }

        async fn handle(&self, _ctx: &CommandContext, _invocation: &Invocation<'_>) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_multiple_names() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler {
            names: &["help", "about"],
            words: 1,
        }));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("help"));
        assert!(registry.contains("about"));
        assert!(!registry.contains("list"));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler { names: &["list"], words: 1 }));

        assert!(registry.get("LIST").is_some());
        assert!(registry.get("List").is_some());
    }

    #[test]
    fn test_resolve_requires_matching_word_count() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler { names: &["remove"], words: 2 }));

        assert!(registry.resolve(&["remove", "5"]).is_some());
        assert!(registry.resolve(&["remove"]).is_none());
        assert!(registry.resolve(&["remove", "5", "6"]).is_none());
        assert!(registry.resolve(&[]).is_none());
    }

    #[test]
    fn test_registry_default() {
        assert!(CommandRegistry::default().is_empty());
    }
}
