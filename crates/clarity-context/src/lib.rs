//! Context sources: strategies that decide which mode is active

pub mod calendar;
pub mod clock;
pub mod manual;
pub mod registry;
pub mod time_of_day;

pub use calendar::{CalendarSource, CalendarWindow};
pub use clock::{Clock, FixedClock, SystemClock};
pub use manual::{ManualOverride, OverrideHandle};
pub use registry::ContextRegistry;
pub use time_of_day::{mode_for_hour, TimeOfDaySource};
