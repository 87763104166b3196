//! Default context source: infer the mode from the hour of day

use crate::clock::{Clock, SystemClock};
use chrono::Timelike;
use clarity_core::{ContextMode, ContextSource, ModeCatalog, ModeKind};

/// Morning block is heads-down, early afternoon is meetings, the rest is open.
pub fn mode_for_hour(hour: u32) -> ModeKind {
    match hour {
        9..=12 => ModeKind::DeepFocus,
        14..=16 => ModeKind::InMeeting,
        _ => ModeKind::Available,
    }
}

pub struct TimeOfDaySource {
    catalog: ModeCatalog,
    clock: Box<dyn Clock>,
}

impl TimeOfDaySource {
    pub fn new(catalog: ModeCatalog) -> Self {
        Self::with_clock(catalog, Box::new(SystemClock))
    }

    pub fn with_clock(catalog: ModeCatalog, clock: Box<dyn Clock>) -> Self {
        Self { catalog, clock }
    }
}

impl ContextSource for TimeOfDaySource {
    fn name(&self) -> &str {
        "time-of-day"
    }

    fn description(&self) -> &str {
        "Deep Focus 9-12h, In Meeting 14-16h, Available otherwise"
    }

    fn current_mode(&self) -> Option<ContextMode> {
        Some(self.catalog.get(mode_for_hour(self.clock.now().hour())))
    }
}
