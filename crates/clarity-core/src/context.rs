//! Context source seam

use crate::mode::ContextMode;

/// Supplies the currently active context mode.
///
/// The pipeline depends only on this capability, so the signal behind it
/// (time of day, an explicit override, a calendar) can be swapped freely.
pub trait ContextSource: Send + Sync {
    /// Source name (unique identifier)
    fn name(&self) -> &str;

    /// Source description
    fn description(&self) -> &str {
        ""
    }

    /// Disabled sources are skipped when chained
    fn is_enabled(&self) -> bool {
        true
    }

    /// The active mode, or `None` when this source has no opinion right now
    fn current_mode(&self) -> Option<ContextMode>;
}

/// A mode is trivially a source that always resolves to itself.
impl ContextSource for ContextMode {
    fn name(&self) -> &str {
        "fixed"
    }

    fn current_mode(&self) -> Option<ContextMode> {
        Some(*self)
    }
}

impl<T: ContextSource + ?Sized> ContextSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn current_mode(&self) -> Option<ContextMode> {
        (**self).current_mode()
    }
}
