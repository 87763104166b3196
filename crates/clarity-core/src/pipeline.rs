//! Staged triage pipeline
//!
//! Admission puts a notification in the Incoming lane right away; the
//! classification that moves it to Urgent or Deferred is handed back to the
//! caller as a [`ScheduledTask`] so whatever drives time decides when it runs.

use crate::classifier::Classifier;
use crate::config::TriageConfig;
use crate::context::ContextSource;
use crate::error::{Result, TriageError};
use crate::mode::ContextMode;
use crate::schedule::{ScheduledTask, Task};
use crate::scorer;
use crate::types::{EntryHandle, Generation, Notification, Stage, Stats, TriageEntry, Verdict};
use tracing::{debug, info, warn};

/// Result of admitting a notification
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    pub handle: EntryHandle,
    /// Classification to run once the thinking interval has passed
    pub classify: ScheduledTask,
}

/// Result of a classify-and-route attempt
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Entry moved to its terminal lane
    Routed { handle: EntryHandle, verdict: Verdict },
    /// No context mode available; entry stays INCOMING until `retry` runs
    Held { retry: ScheduledTask },
    /// Handle is not in the Incoming lane (already routed, withdrawn, or reset)
    Unknown(EntryHandle),
}

/// What running one scheduled task did
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Admitted(Admission),
    /// Admission refused, e.g. a duplicate live id
    Rejected(TriageError),
    Route(RouteOutcome),
    /// Task belonged to an earlier batch generation and was ignored
    Stale { generation: Generation },
}

impl Step {
    /// Task the driver must schedule next, if any
    pub fn follow_up(&self) -> Option<&ScheduledTask> {
        match self {
            Step::Admitted(admission) => Some(&admission.classify),
            Step::Route(RouteOutcome::Held { retry }) => Some(retry),
            _ => None,
        }
    }
}

/// Owns the three lanes and the session counters. Single writer.
pub struct TriagePipeline {
    config: TriageConfig,
    classifier: Classifier,
    context: Box<dyn ContextSource>,
    incoming: Vec<TriageEntry>,
    urgent: Vec<TriageEntry>,
    deferred: Vec<TriageEntry>,
    stats: Stats,
    generation: Generation,
    next_handle: u64,
}

impl TriagePipeline {
    pub fn new(config: TriageConfig, context: Box<dyn ContextSource>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            classifier: Classifier::new(config.calendar_bar),
            config,
            context,
            incoming: Vec::new(),
            urgent: Vec::new(),
            deferred: Vec::new(),
            stats: Stats::default(),
            generation: Generation::default(),
            next_handle: 1,
        })
    }

    /// Swap the context source without touching queues or counters
    pub fn set_context(&mut self, context: Box<dyn ContextSource>) {
        self.context = context;
    }

    /// Mode the context source resolves to right now
    pub fn current_mode(&self) -> Option<ContextMode> {
        self.context.current_mode()
    }

    /// Place a notification in the Incoming lane.
    ///
    /// Synchronous: the entry is visible to readers as soon as this returns.
    pub fn admit(&mut self, notification: Notification) -> Result<Admission> {
        if self.is_live(&notification.id) {
            return Err(TriageError::AlreadyAdmitted(notification.id));
        }

        let handle = EntryHandle(self.next_handle);
        self.next_handle += 1;

        debug!(
            %handle,
            id = %notification.id,
            source = %notification.source_type,
            "Admitted notification"
        );
        self.incoming
            .push(TriageEntry::new(handle, self.generation, notification));

        Ok(Admission {
            handle,
            classify: ScheduledTask::classify(
                self.generation,
                self.config.classify_delay(),
                handle,
            ),
        })
    }

    /// Classify an Incoming entry and move it to its terminal lane.
    ///
    /// Unknown handles are a no-op. When no context mode can be resolved the
    /// entry stays INCOMING and a retry task is returned.
    pub fn classify_and_route(&mut self, handle: EntryHandle) -> RouteOutcome {
        let Some(pos) = self.incoming.iter().position(|e| e.handle() == handle) else {
            debug!(%handle, "Ignoring classification for entry not in Incoming");
            return RouteOutcome::Unknown(handle);
        };

        let Some(mode) = self.context.current_mode() else {
            warn!(%handle, source = self.context.name(), "No context mode available; holding entry");
            return RouteOutcome::Held {
                retry: ScheduledTask::classify(self.generation, self.config.retry_delay(), handle),
            };
        };

        self.incoming[pos].advance(Stage::Classifying);

        let notification = self.incoming[pos].notification();
        let score = scorer::score_notification(notification);
        let classification = self.classifier.classify(notification, score, &mode);
        let verdict = classification.verdict;

        // Removal from Incoming and insertion into the lane happen together
        let mut entry = self.incoming.remove(pos);
        entry.record(score, classification);
        entry.advance(Stage::Routed);

        debug!(
            %handle,
            score,
            mode = mode.name(),
            ?verdict,
            "Routed notification"
        );

        match verdict {
            Verdict::Urgent => self.urgent.push(entry),
            Verdict::Deferred => {
                self.deferred.push(entry);
                self.stats.deferred_count += 1;
            }
        }

        RouteOutcome::Routed { handle, verdict }
    }

    /// Admission tasks for a batch, one per arrival interval, in order.
    pub fn ingest_batch(
        &self,
        notifications: impl IntoIterator<Item = Notification>,
    ) -> Vec<ScheduledTask> {
        let interval = self.config.arrival_interval();
        notifications
            .into_iter()
            .enumerate()
            .map(|(i, notification)| {
                let slot = u32::try_from(i).unwrap_or(u32::MAX);
                ScheduledTask::admit(self.generation, interval.saturating_mul(slot), notification)
            })
            .collect()
    }

    /// Execute a scheduled task. Tasks from an earlier generation do nothing.
    pub fn run(&mut self, task: ScheduledTask) -> Step {
        if task.generation != self.generation {
            debug!(
                task_generation = %task.generation,
                current = %self.generation,
                "Dropping stale task"
            );
            return Step::Stale {
                generation: task.generation,
            };
        }

        match task.task {
            Task::Admit(notification) => match self.admit(notification) {
                Ok(admission) => Step::Admitted(admission),
                Err(err) => {
                    warn!(error = %err, "Admission rejected");
                    Step::Rejected(err)
                }
            },
            Task::Classify(handle) => Step::Route(self.classify_and_route(handle)),
        }
    }

    /// Clear all lanes and invalidate every task scheduled so far.
    pub fn reset_batch(&mut self) -> Generation {
        let dropped = self.incoming.len() + self.urgent.len() + self.deferred.len();
        self.incoming.clear();
        self.urgent.clear();
        self.deferred.clear();
        self.generation = self.generation.next();

        info!(generation = %self.generation, dropped, "Reset batch");
        self.generation
    }

    /// Pull a not-yet-routed entry out of Incoming. Its pending
    /// classification becomes a no-op.
    pub fn withdraw(&mut self, handle: EntryHandle) -> Option<TriageEntry> {
        let pos = self.incoming.iter().position(|e| e.handle() == handle)?;
        debug!(%handle, "Withdrew entry");
        Some(self.incoming.remove(pos))
    }

    /// Record that the user acted on a digest item
    pub fn acknowledge_decision(&mut self) {
        self.stats.decisions_handled += 1;
    }

    pub fn incoming(&self) -> &[TriageEntry] {
        &self.incoming
    }

    pub fn urgent(&self) -> &[TriageEntry] {
        &self.urgent
    }

    pub fn deferred(&self) -> &[TriageEntry] {
        &self.deferred
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Look up an entry in any lane
    pub fn entry(&self, handle: EntryHandle) -> Option<&TriageEntry> {
        self.lanes().find(|e| e.handle() == handle)
    }

    fn lanes(&self) -> impl Iterator<Item = &TriageEntry> {
        self.incoming
            .iter()
            .chain(self.urgent.iter())
            .chain(self.deferred.iter())
    }

    fn is_live(&self, id: &str) -> bool {
        self.lanes().any(|e| e.notification().id == id)
    }
}
