//! Context mode catalog

use crate::config::ModeThresholds;
use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of attentional states a user can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    /// Heads-down work: only high priority items get through
    DeepFocus,
    /// In a meeting: only critical items get through
    InMeeting,
    /// Normal availability
    Available,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [ModeKind::DeepFocus, ModeKind::InMeeting, ModeKind::Available];

    /// Human-readable display name.
    pub const fn name(&self) -> &'static str {
        match self {
            ModeKind::DeepFocus => "Deep Focus",
            ModeKind::InMeeting => "In Meeting",
            ModeKind::Available => "Available",
        }
    }

    /// Short label describing what the mode lets through.
    pub const fn filter_label(&self) -> &'static str {
        match self {
            ModeKind::DeepFocus => "High Priority Only",
            ModeKind::InMeeting => "Critical Only",
            ModeKind::Available => "Normal",
        }
    }

    pub const fn default_threshold(&self) -> f64 {
        match self {
            ModeKind::DeepFocus => 0.8,
            ModeKind::InMeeting => 0.9,
            ModeKind::Available => 0.5,
        }
    }

    /// Stable identifier used in config files and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModeKind::DeepFocus => "deep-focus",
            ModeKind::InMeeting => "in-meeting",
            ModeKind::Available => "available",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModeKind {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "deep-focus" | "deepfocus" | "focus" => Ok(ModeKind::DeepFocus),
            "in-meeting" | "meeting" | "meetings" => Ok(ModeKind::InMeeting),
            "available" => Ok(ModeKind::Available),
            _ => Err(TriageError::UnknownMode(s.to_string())),
        }
    }
}

/// A named operating profile with an urgency threshold.
///
/// Values are immutable; the threshold is validated to lie in `[0, 1]` on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContextMode {
    kind: ModeKind,
    name: &'static str,
    filter_label: &'static str,
    urgency_threshold: f64,
}

impl ContextMode {
    pub fn new(kind: ModeKind, urgency_threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&urgency_threshold) {
            return Err(TriageError::InvalidThreshold(urgency_threshold));
        }
        Ok(Self::with_threshold(kind, urgency_threshold))
    }

    const fn with_threshold(kind: ModeKind, urgency_threshold: f64) -> Self {
        Self {
            kind,
            name: kind.name(),
            filter_label: kind.filter_label(),
            urgency_threshold,
        }
    }

    /// Mode with the catalog's default threshold.
    pub const fn standard(kind: ModeKind) -> Self {
        Self::with_threshold(kind, kind.default_threshold())
    }

    pub const fn deep_focus() -> Self {
        Self::standard(ModeKind::DeepFocus)
    }

    pub const fn in_meeting() -> Self {
        Self::standard(ModeKind::InMeeting)
    }

    pub const fn available() -> Self {
        Self::standard(ModeKind::Available)
    }

    pub const fn kind(&self) -> ModeKind {
        self.kind
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn filter_label(&self) -> &'static str {
        self.filter_label
    }

    pub const fn urgency_threshold(&self) -> f64 {
        self.urgency_threshold
    }
}

/// The fixed set of modes built once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeCatalog {
    deep_focus: ContextMode,
    in_meeting: ContextMode,
    available: ContextMode,
}

impl ModeCatalog {
    pub fn new(thresholds: &ModeThresholds) -> Result<Self> {
        Ok(Self {
            deep_focus: ContextMode::new(ModeKind::DeepFocus, thresholds.deep_focus)?,
            in_meeting: ContextMode::new(ModeKind::InMeeting, thresholds.in_meeting)?,
            available: ContextMode::new(ModeKind::Available, thresholds.available)?,
        })
    }

    pub fn get(&self, kind: ModeKind) -> ContextMode {
        match kind {
            ModeKind::DeepFocus => self.deep_focus,
            ModeKind::InMeeting => self.in_meeting,
            ModeKind::Available => self.available,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ContextMode> + '_ {
        ModeKind::ALL.into_iter().map(|kind| self.get(kind))
    }
}

impl Default for ModeCatalog {
    fn default() -> Self {
        Self {
            deep_focus: ContextMode::deep_focus(),
            in_meeting: ContextMode::in_meeting(),
            available: ContextMode::available(),
        }
    }
}
