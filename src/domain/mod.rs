pub mod account;
pub mod calendar;
pub mod chapters;
pub mod enums;
pub mod hebrew_calendar;
pub mod numerals;
pub mod progress;
pub mod schedule;

pub use account::UserAccount;
pub use calendar::{display_date, resolve_today, HebrewDate, TodayMarker};
pub use enums::{StudyMode, UiMode};
pub use progress::{ProgressRecord, ProgressStore, ProgressSummary};
pub use schedule::{load_schedule, Schedule, ScheduleDay, ScheduleMonth};
