//! Calendar-driven context: busy windows put the user In Meeting

use crate::clock::{Clock, SystemClock};
use chrono::NaiveTime;
use clarity_core::{ContextMode, ContextSource, ModeCatalog, ModeKind};
use serde::{Deserialize, Serialize};

/// A recurring daily busy block, `[start, end)` in local time.
/// Windows whose end is before their start wrap past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default)]
    pub title: Option<String>,
}

impl CalendarWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            title: None,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

pub struct CalendarSource {
    meeting: ContextMode,
    windows: Vec<CalendarWindow>,
    clock: Box<dyn Clock>,
}

impl CalendarSource {
    pub fn new(catalog: &ModeCatalog, windows: Vec<CalendarWindow>) -> Self {
        Self::with_clock(catalog, windows, Box::new(SystemClock))
    }

    pub fn with_clock(
        catalog: &ModeCatalog,
        windows: Vec<CalendarWindow>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            meeting: catalog.get(ModeKind::InMeeting),
            windows,
            clock,
        }
    }

    /// The window covering the current time, if any
    pub fn active_window(&self) -> Option<&CalendarWindow> {
        let now = self.clock.now();
        self.windows.iter().find(|w| w.contains(now))
    }

    pub fn windows(&self) -> &[CalendarWindow] {
        &self.windows
    }
}

impl ContextSource for CalendarSource {
    fn name(&self) -> &str {
        "calendar"
    }

    fn description(&self) -> &str {
        "In Meeting during configured calendar windows"
    }

    fn is_enabled(&self) -> bool {
        !self.windows.is_empty()
    }

    fn current_mode(&self) -> Option<ContextMode> {
        self.active_window().map(|_| self.meeting)
    }
}
