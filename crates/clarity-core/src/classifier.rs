//! Threshold classifier: urgency score + context mode to verdict

use crate::mode::ContextMode;
use crate::types::{Classification, Notification, SourceType, Verdict};

/// Calendar items above this score are urgent whatever the mode threshold
pub const CALENDAR_BAR: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    calendar_bar: f64,
}

impl Classifier {
    pub fn new(calendar_bar: f64) -> Self {
        Self { calendar_bar }
    }

    /// Decide the verdict. Rules, in order:
    /// 1. score at or above the mode threshold
    /// 2. calendar item strictly above the calendar bar
    /// 3. everything else waits for the digest
    pub fn decide(&self, source_type: SourceType, score: f64, mode: &ContextMode) -> Verdict {
        if score >= mode.urgency_threshold() {
            Verdict::Urgent
        } else if source_type == SourceType::Calendar && score > self.calendar_bar {
            Verdict::Urgent
        } else {
            Verdict::Deferred
        }
    }

    /// Classify a notification whose score has already been clamped by the scorer.
    pub fn classify(
        &self,
        notification: &Notification,
        score: f64,
        mode: &ContextMode,
    ) -> Classification {
        debug_assert!(
            (0.0..=1.0).contains(&score),
            "classifier received unclamped score {}",
            score
        );

        let verdict = self.decide(notification.source_type, score, mode);
        Classification {
            verdict,
            rationale: explain(verdict, score, mode),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(CALENDAR_BAR)
    }
}

/// User-facing explanation of a verdict
pub fn explain(verdict: Verdict, score: f64, mode: &ContextMode) -> String {
    match verdict {
        Verdict::Urgent => format!(
            "High urgency ({:.0}%) + sender importance",
            (score * 100.0).round()
        ),
        Verdict::Deferred => format!("Below urgency threshold for {} mode", mode.name()),
    }
}
