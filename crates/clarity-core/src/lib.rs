//! Context-aware notification triage: scoring, classification and lane routing

mod classifier;
mod config;
mod context;
mod error;
mod ingest;
mod mode;
mod pipeline;
mod schedule;
pub mod scorer;
mod types;

pub use classifier::{explain, Classifier, CALENDAR_BAR};
pub use config::{ModeThresholds, TriageConfig};
pub use context::ContextSource;
pub use error::{Result, TriageError};
pub use ingest::{split_from_header, RawMessage};
pub use mode::{ContextMode, ModeCatalog, ModeKind};
pub use pipeline::{Admission, RouteOutcome, Step, TriagePipeline};
pub use schedule::{ScheduledTask, Task, VirtualScheduler};
pub use types::{
    Classification, EntryHandle, Generation, MessageMeta, Notification, SourceType, Stage, Stats,
    TriageEntry, Verdict,
};
