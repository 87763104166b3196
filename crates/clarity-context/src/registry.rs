//! Ordered chain of context sources

use clarity_core::{ContextMode, ContextSource};
use tracing::debug;

/// Asks each registered source in turn; the first one with an opinion wins.
pub struct ContextRegistry {
    sources: Vec<Box<dyn ContextSource>>,
}

impl ContextRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Register a source; disabled sources are skipped
    pub fn register(&mut self, source: Box<dyn ContextSource>) {
        if source.is_enabled() {
            self.sources.push(source);
        } else {
            debug!(source = source.name(), "Skipping disabled context source");
        }
    }

    /// Builder-style `register`
    pub fn with(mut self, source: Box<dyn ContextSource>) -> Self {
        self.register(source);
        self
    }

    /// Resolve the mode along with the name of the source that supplied it
    pub fn resolve(&self) -> Option<(&str, ContextMode)> {
        self.sources
            .iter()
            .find_map(|s| s.current_mode().map(|mode| (s.name(), mode)))
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextSource for ContextRegistry {
    fn name(&self) -> &str {
        "registry"
    }

    fn current_mode(&self) -> Option<ContextMode> {
        self.resolve().map(|(_, mode)| mode)
    }
}
