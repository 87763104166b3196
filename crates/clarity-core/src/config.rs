//! Configuration for the triage pipeline

use crate::classifier::CALENDAR_BAR;
use crate::error::{Result, TriageError};
use crate::mode::{ModeCatalog, ModeKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Urgency thresholds per context mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeThresholds {
    pub deep_focus: f64,
    pub in_meeting: f64,
    pub available: f64,
}

impl ModeThresholds {
    pub fn new() -> Self {
        Self {
            deep_focus: ModeKind::DeepFocus.default_threshold(),
            in_meeting: ModeKind::InMeeting.default_threshold(),
            available: ModeKind::Available.default_threshold(),
        }
    }

    pub fn get(&self, kind: ModeKind) -> f64 {
        match kind {
            ModeKind::DeepFocus => self.deep_focus,
            ModeKind::InMeeting => self.in_meeting,
            ModeKind::Available => self.available,
        }
    }
}

impl Default for ModeThresholds {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Pause between admission and classification ("thinking" interval)
    pub classify_delay_ms: u64,

    /// Spacing between admissions within one batch
    pub arrival_interval_ms: u64,

    /// Wait before retrying an entry whose context mode could not be resolved
    pub retry_delay_ms: u64,

    /// Calendar items scoring strictly above this are urgent in any mode
    pub calendar_bar: f64,

    /// Thresholds for the mode catalog
    pub thresholds: ModeThresholds,
}

impl TriageConfig {
    pub fn new() -> Self {
        Self {
            classify_delay_ms: 1500,
            arrival_interval_ms: 800,
            retry_delay_ms: 1000,
            calendar_bar: CALENDAR_BAR,
            thresholds: ModeThresholds::new(),
        }
    }

    /// Config with every delay set to zero, for driving the pipeline synchronously.
    pub fn immediate() -> Self {
        Self {
            classify_delay_ms: 0,
            arrival_interval_ms: 0,
            retry_delay_ms: 1,
            ..Self::new()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.calendar_bar) {
            return Err(TriageError::InvalidConfig(format!(
                "calendar_bar {} is outside [0, 1]",
                self.calendar_bar
            )));
        }
        if self.retry_delay_ms == 0 {
            return Err(TriageError::InvalidConfig(
                "retry_delay_ms must be greater than zero".to_string(),
            ));
        }
        self.catalog().map(|_| ())
    }

    pub fn catalog(&self) -> Result<ModeCatalog> {
        ModeCatalog::new(&self.thresholds)
    }

    pub fn classify_delay(&self) -> Duration {
        Duration::from_millis(self.classify_delay_ms)
    }

    pub fn arrival_interval(&self) -> Duration {
        Duration::from_millis(self.arrival_interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TriageConfig::new();
        assert_eq!(config.classify_delay(), Duration::from_millis(1500));
        assert_eq!(config.arrival_interval(), Duration::from_millis(800));
        assert_eq!(config.calendar_bar, 0.7);
        assert_eq!(config.thresholds.get(ModeKind::DeepFocus), 0.8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: TriageConfig =
            serde_json::from_str(r#"{"classify_delay_ms": 10, "thresholds": {"available": 0.6}}"#)
                .unwrap();
        assert_eq!(config.classify_delay_ms, 10);
        assert_eq!(config.arrival_interval_ms, 800);
        assert_eq!(config.thresholds.available, 0.6);
        assert_eq!(config.thresholds.deep_focus, 0.8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = TriageConfig::new();
        config.calendar_bar = 1.5;
        assert!(matches!(config.validate(), Err(TriageError::InvalidConfig(_))));

        let mut config = TriageConfig::new();
        config.retry_delay_ms = 0;
        assert!(config.validate().is_err());

        let mut config = TriageConfig::new();
        config.thresholds.in_meeting = 2.0;
        assert_eq!(config.validate(), Err(TriageError::InvalidThreshold(2.0)));
    }

    #[test]
    fn test_immediate_config_is_valid() {
        let config = TriageConfig::immediate();
        assert_eq!(config.classify_delay(), Duration::ZERO);
        assert!(config.validate().is_ok());
    }
}
