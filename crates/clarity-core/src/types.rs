//! Core types for notification triage

use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a notification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Email,
    #[serde(alias = "slack")]
    Chat,
    Calendar,
    Social,
    App,
}

impl SourceType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SourceType::Email => "email",
            SourceType::Chat => "chat",
            SourceType::Calendar => "calendar",
            SourceType::Social => "social",
            SourceType::App => "app",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(SourceType::Email),
            "chat" | "slack" => Ok(SourceType::Chat),
            "calendar" => Ok(SourceType::Calendar),
            "social" => Ok(SourceType::Social),
            "app" => Ok(SourceType::App),
            _ => Err(TriageError::UnknownSourceType(s.to_string())),
        }
    }
}

/// Message-specific attributes used by the urgency scorer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMeta {
    pub is_unread: bool,
    pub is_important: bool,
    pub subject_text: String,
    pub sender_address: String,
}

/// One inbound item awaiting triage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub source_type: SourceType,
    pub sender: String,
    pub content: String,
    /// Precomputed urgency; when absent the scorer derives one
    #[serde(default)]
    pub raw_urgency: Option<f64>,
    #[serde(default)]
    pub metadata: Option<MessageMeta>,
}

impl Notification {
    pub fn new(
        id: impl Into<String>,
        source_type: SourceType,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_type,
            sender: sender.into(),
            content: content.into(),
            raw_urgency: None,
            metadata: None,
        }
    }

    pub fn with_urgency(mut self, urgency: f64) -> Self {
        self.raw_urgency = Some(urgency);
        self
    }

    pub fn with_metadata(mut self, metadata: MessageMeta) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Binary triage decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Surface immediately
    #[serde(rename = "URGENT")]
    Urgent,
    /// Hold for the digest
    #[serde(rename = "DEFERRED")]
    Deferred,
}

/// Classifier output: a verdict plus an explanation for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    /// Advisory only; never read back by the engine
    pub rationale: String,
}

impl Classification {
    pub fn is_urgent(&self) -> bool {
        self.verdict == Verdict::Urgent
    }
}

/// Lifecycle stage of a triage entry. Ordered; entries only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Incoming,
    Classifying,
    Routed,
}

/// Opaque reference to a triage entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryHandle(pub u64);

impl fmt::Display for EntryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Batch generation counter. Bumped by every batch reset; tasks carrying an
/// older generation are inert.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen {}", self.0)
    }
}

/// A notification tracked by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageEntry {
    handle: EntryHandle,
    generation: Generation,
    notification: Notification,
    stage: Stage,
    score: Option<f64>,
    classification: Option<Classification>,
}

impl TriageEntry {
    pub(crate) fn new(handle: EntryHandle, generation: Generation, notification: Notification) -> Self {
        Self {
            handle,
            generation,
            notification,
            stage: Stage::Incoming,
            score: None,
            classification: None,
        }
    }

    pub(crate) fn advance(&mut self, next: Stage) {
        debug_assert!(
            next > self.stage,
            "stage may only move forward: {:?} -> {:?}",
            self.stage,
            next
        );
        if next > self.stage {
            self.stage = next;
        }
    }

    pub(crate) fn record(&mut self, score: f64, classification: Classification) {
        self.score = Some(score);
        self.classification = Some(classification);
    }

    pub fn handle(&self) -> EntryHandle {
        self.handle
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Urgency score used for the decision, once classified
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }
}

/// Session counters owned by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Notifications routed to the digest
    pub deferred_count: u64,
    /// Digest items the user acted on
    pub decisions_handled: u64,
    /// Display-only; nothing in the engine updates it
    pub focus_hours: f64,
}
