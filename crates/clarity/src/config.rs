//! On-disk configuration for the clarity binary

use crate::io::atomic_write;
use anyhow::Context;
use clarity_context::CalendarWindow;
use clarity_core::{ModeKind, TriageConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline settings plus the context inputs only the binary knows about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub triage: TriageConfig,

    /// Daily busy windows that put the user In Meeting
    #[serde(default)]
    pub calendar: Vec<CalendarWindow>,

    /// Mode to force when none is given on the command line
    #[serde(default)]
    pub default_mode: Option<ModeKind>,
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        config.triage.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        atomic_write(path, json.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"classify_delay_ms": 200, "thresholds": {"deep_focus": 0.7}, "default_mode": "in-meeting"}"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.triage.classify_delay_ms, 200);
        assert_eq!(config.triage.arrival_interval_ms, 800);
        assert_eq!(config.triage.thresholds.deep_focus, 0.7);
        assert_eq!(config.triage.thresholds.in_meeting, 0.9);
        assert_eq!(config.default_mode, Some(ModeKind::InMeeting));
        assert!(config.calendar.is_empty());
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"thresholds": {"available": 1.5}}"#).unwrap();

        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            calendar: vec![CalendarWindow::new(
                NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            )
            .titled("Design Review")],
            ..Default::default()
        };

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }
}
