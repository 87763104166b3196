//! Schedulable units of pipeline work and a deterministic virtual-clock driver

use crate::pipeline::{Step, TriagePipeline};
use crate::types::{EntryHandle, Generation, Notification};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;
use tracing::warn;

/// Safety valve for `run_until_idle` when a context source never resolves
const IDLE_STEP_LIMIT: usize = 10_000;

/// What a scheduled task does when it fires
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Admit(Notification),
    Classify(EntryHandle),
}

/// A unit of work to run after `delay`, valid only while the pipeline is
/// still on `generation`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    pub generation: Generation,
    pub delay: Duration,
    pub task: Task,
}

impl ScheduledTask {
    pub fn admit(generation: Generation, delay: Duration, notification: Notification) -> Self {
        Self {
            generation,
            delay,
            task: Task::Admit(notification),
        }
    }

    pub fn classify(generation: Generation, delay: Duration, handle: EntryHandle) -> Self {
        Self {
            generation,
            delay,
            task: Task::Classify(handle),
        }
    }

    /// Entry this task classifies, if it is a classification task
    pub fn handle(&self) -> Option<EntryHandle> {
        match self.task {
            Task::Classify(handle) => Some(handle),
            Task::Admit(_) => None,
        }
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    task: ScheduledTask,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

/// Runs scheduled tasks against a virtual clock.
///
/// Nothing happens until the clock is advanced, which makes delayed
/// classification fully deterministic. Tasks due at the same instant run in
/// the order they were scheduled.
#[derive(Default)]
pub struct VirtualScheduler {
    now: Duration,
    seq: u64,
    pending: BinaryHeap<Reverse<Pending>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// When the next pending task is due
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse(p)| p.due)
    }

    pub fn schedule(&mut self, task: ScheduledTask) {
        let due = self.now.saturating_add(task.delay);
        self.seq += 1;
        self.pending.push(Reverse(Pending {
            due,
            seq: self.seq,
            task,
        }));
    }

    pub fn schedule_all(&mut self, tasks: impl IntoIterator<Item = ScheduledTask>) {
        for task in tasks {
            self.schedule(task);
        }
    }

    /// Drop every pending task from generations older than `generation`.
    /// Returns how many were dropped.
    pub fn cancel_before(&mut self, generation: Generation) -> usize {
        let before = self.pending.len();
        self.pending
            .retain(|Reverse(p)| p.task.generation >= generation);
        before - self.pending.len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    pub fn advance(&mut self, by: Duration, pipeline: &mut TriagePipeline) -> Vec<Step> {
        let target = self.now.saturating_add(by);
        let mut steps = Vec::new();

        while self.next_due().is_some_and(|due| due <= target) {
            steps.extend(self.fire_next(pipeline));
        }

        self.now = target;
        steps
    }

    /// Run tasks until nothing is pending, jumping the clock as needed.
    pub fn run_until_idle(&mut self, pipeline: &mut TriagePipeline) -> Vec<Step> {
        let mut steps = Vec::new();

        while let Some(step) = self.fire_next(pipeline) {
            steps.push(step);
            if steps.len() >= IDLE_STEP_LIMIT && !self.is_empty() {
                warn!(
                    pending = self.len(),
                    "Scheduler still busy after {} steps; giving up", IDLE_STEP_LIMIT
                );
                break;
            }
        }

        steps
    }

    fn fire_next(&mut self, pipeline: &mut TriagePipeline) -> Option<Step> {
        let Reverse(next) = self.pending.pop()?;
        self.now = self.now.max(next.due);

        let step = pipeline.run(next.task);
        if let Some(follow_up) = step.follow_up() {
            self.schedule(follow_up.clone());
        }
        Some(step)
    }
}
