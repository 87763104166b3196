//! Explicit user override of the context mode

use clarity_core::{ContextMode, ContextSource};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Shared handle for setting or clearing the override at runtime
#[derive(Debug, Clone, Default)]
pub struct OverrideHandle {
    slot: Arc<RwLock<Option<ContextMode>>>,
}

impl OverrideHandle {
    pub fn set(&self, mode: ContextMode) {
        info!(mode = mode.name(), "Context override set");
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(mode);
    }

    pub fn clear(&self) {
        info!("Context override cleared");
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get(&self) -> Option<ContextMode> {
        *self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Yields the forced mode while one is set, nothing otherwise
#[derive(Debug, Default)]
pub struct ManualOverride {
    handle: OverrideHandle,
}

impl ManualOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ContextMode) -> Self {
        let source = Self::new();
        source.handle.set(mode);
        source
    }

    /// Source driven by an existing handle
    pub fn from_handle(handle: OverrideHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> OverrideHandle {
        self.handle.clone()
    }
}

impl ContextSource for ManualOverride {
    fn name(&self) -> &str {
        "manual"
    }

    fn description(&self) -> &str {
        "Mode chosen explicitly by the user"
    }

    fn current_mode(&self) -> Option<ContextMode> {
        self.handle.get()
    }
}
