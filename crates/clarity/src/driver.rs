//! Wall-clock driver for the triage pipeline
//!
//! Every scheduled task becomes a tokio task that sleeps for the task delay
//! and then takes the pipeline lock. Each batch owns a cancellation token and
//! each pending classification a child of it, so a reset or a withdraw stops
//! the timers as well as invalidating the work.

use clarity_core::{
    EntryHandle, Generation, Notification, ScheduledTask, Step, TriageEntry, TriagePipeline,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

/// Cancellation token for the timers of one batch generation
struct Batch {
    generation: Generation,
    token: CancellationToken,
}

impl Batch {
    fn new(generation: Generation) -> Self {
        Self {
            generation,
            token: CancellationToken::new(),
        }
    }
}

struct Inner {
    pipeline: Mutex<TriagePipeline>,
    batch: StdMutex<Batch>,
    entries: StdMutex<HashMap<EntryHandle, CancellationToken>>,
    tracker: TaskTracker,
    events: mpsc::UnboundedSender<Step>,
}

/// Cheap to clone; all clones drive the same pipeline.
#[derive(Clone)]
pub struct LiveDriver {
    inner: Arc<Inner>,
}

impl LiveDriver {
    /// Wrap a pipeline. Every step it runs is also sent on the returned
    /// channel; dropping the receiver is fine.
    pub fn new(pipeline: TriagePipeline) -> (Self, mpsc::UnboundedReceiver<Step>) {
        let (events, rx) = mpsc::unbounded_channel();
        let batch = Batch::new(pipeline.generation());
        let driver = Self {
            inner: Arc::new(Inner {
                pipeline: Mutex::new(pipeline),
                batch: StdMutex::new(batch),
                entries: StdMutex::new(HashMap::new()),
                tracker: TaskTracker::new(),
                events,
            }),
        };
        (driver, rx)
    }

    /// Schedule a batch with staggered arrivals. Returns its generation.
    pub async fn start_batch(&self, notifications: Vec<Notification>) -> Generation {
        let (generation, tasks) = {
            let pipeline = self.inner.pipeline.lock().await;
            (pipeline.generation(), pipeline.ingest_batch(notifications))
        };

        info!(%generation, size = tasks.len(), "Starting batch");
        for task in tasks {
            self.schedule(task);
        }
        generation
    }

    /// Clear every lane and stop all pending timers
    pub async fn reset_batch(&self) -> Generation {
        // Held across the swap so no task runs between the bump and the cancel
        let mut pipeline = self.inner.pipeline.lock().await;
        let generation = pipeline.reset_batch();

        let previous = std::mem::replace(
            &mut *self.inner.batch.lock().unwrap_or_else(PoisonError::into_inner),
            Batch::new(generation),
        );
        previous.token.cancel();
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        generation
    }

    /// Pull an entry out of Incoming and stop its classification timer
    pub async fn withdraw(&self, handle: EntryHandle) -> Option<TriageEntry> {
        if let Some(token) = self
            .inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle)
        {
            token.cancel();
        }

        self.inner.pipeline.lock().await.withdraw(handle)
    }

    pub async fn acknowledge_decision(&self) {
        self.inner.pipeline.lock().await.acknowledge_decision();
    }

    /// Read the pipeline under the lock
    pub async fn with_pipeline<R>(&self, f: impl FnOnce(&TriagePipeline) -> R) -> R {
        let pipeline = self.inner.pipeline.lock().await;
        f(&pipeline)
    }

    /// Number of timers still running
    pub fn pending(&self) -> usize {
        self.inner.tracker.len()
    }

    /// Wait until every scheduled task, including follow-ups, has finished.
    ///
    /// Does not return while an entry is held waiting for a context mode.
    pub async fn wait_idle(&self) {
        self.inner.tracker.close();
        self.inner.tracker.wait().await;
        self.inner.tracker.reopen();
    }

    /// Start a timer for `task`. Tasks from an earlier generation are
    /// dropped without one.
    fn schedule(&self, task: ScheduledTask) {
        let token = {
            let current = self.inner.batch.lock().unwrap_or_else(PoisonError::into_inner);
            if task.generation != current.generation {
                debug!(
                    task_generation = %task.generation,
                    current = %current.generation,
                    "Dropping task from a reset batch"
                );
                return;
            }

            // Registered while the batch is locked so a reset cannot slip in between
            match task.handle() {
                Some(handle) => {
                    let child = current.token.child_token();
                    self.inner
                        .entries
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .insert(handle, child.clone());
                    child
                }
                None => current.token.clone(),
            }
        };

        let driver = self.clone();
        self.inner.tracker.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(generation = %task.generation, "Scheduled task cancelled");
                }
                _ = tokio::time::sleep(task.delay) => {
                    driver.fire(task).await;
                }
            }
        });
    }

    async fn fire(&self, task: ScheduledTask) {
        let handle = task.handle();
        let step = self.inner.pipeline.lock().await.run(task);

        if let Some(handle) = handle {
            self.inner
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&handle);
        }
        if let Some(next) = step.follow_up() {
            self.schedule(next.clone());
        }

        // Nobody listening is not an error
        let _ = self.inner.events.send(step);
    }
}
