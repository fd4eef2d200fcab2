use super::schedule::{Schedule, ScheduleDay, ScheduleMonth};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted progress for one schedule day.
///
/// `chapter_progress` may be shorter or longer than the day's current
/// sub-unit count (the schedule data can change under a stored record), so
/// every read and every mutation reconciles against the expected count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub chapter_progress: Vec<bool>,
    #[serde(default)]
    pub notes: String,
}

impl ProgressRecord {
    /// Length-consistent copy for a day with `count` sub-units.
    pub fn reconciled(&self, count: usize) -> ProgressRecord {
        let mut chapter_progress = self.chapter_progress.clone();
        chapter_progress.resize(count, false);
        ProgressRecord {
            completed: all_done(&chapter_progress, count),
            chapter_progress,
            notes: self.notes.clone(),
        }
    }

    pub fn is_subunit_done(&self, index: usize) -> bool {
        self.chapter_progress.get(index).copied().unwrap_or(false)
    }

    /// Sub-units done out of `count`, ignoring stale entries past the end
    pub fn done_count(&self, count: usize) -> usize {
        self.chapter_progress.iter().take(count).filter(|done| **done).count()
    }
}

fn all_done(chapter_progress: &[bool], count: usize) -> bool {
    count > 0 && chapter_progress.len() >= count && chapter_progress[..count].iter().all(|done| *done)
}

/// Day id -> progress for one study mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    records: BTreeMap<String, ProgressRecord>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: BTreeMap<String, ProgressRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, day_id: &str) -> Option<&ProgressRecord> {
        self.records.get(day_id)
    }

    /// Reconciled view of a day's record, default when nothing is stored.
    pub fn view(&self, day: &ScheduleDay) -> ProgressRecord {
        let count = day.expected_count();
        match self.records.get(&day.id) {
            Some(record) => record.reconciled(count),
            None => ProgressRecord::default().reconciled(count),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flip the whole day. All sub-units follow the new state.
    ///
    /// Returns false (store untouched) when the day is not in the schedule.
    pub fn toggle_whole_day(&mut self, schedule: &Schedule, day_id: &str) -> bool {
        let Some(day) = schedule.find_day(day_id) else {
            return false;
        };
        let count = day.expected_count();

        let record = self.records.entry(day_id.to_string()).or_default();
        // Flip what the reconciled view shows, not the stored flag
        let completed = !all_done(&record.chapter_progress, count);
        record.completed = completed;
        record.chapter_progress = vec![completed; count];
        true
    }

    /// Set one sub-unit and roll `completed` up from the sub-units.
    ///
    /// Stored progress shorter than the expected count is padded, longer
    /// progress is kept as is. Returns false when the day is unknown or the
    /// index is past the day's sub-unit count.
    pub fn toggle_subunit(&mut self, schedule: &Schedule, day_id: &str, index: usize, value: bool) -> bool {
        let Some(day) = schedule.find_day(day_id) else {
            return false;
        };
        let count = day.expected_count();
        if index >= count {
            return false;
        }

        let record = self.records.entry(day_id.to_string()).or_default();
        if record.chapter_progress.len() < count {
            record.chapter_progress.resize(count, false);
        }
        record.chapter_progress[index] = value;
        record.completed = all_done(&record.chapter_progress, count);
        true
    }

    /// Replace a day's notes without touching its completion state.
    pub fn update_notes(&mut self, schedule: &Schedule, day_id: &str, notes: &str) -> bool {
        if schedule.find_day(day_id).is_none() {
            return false;
        }
        let record = self.records.entry(day_id.to_string()).or_default();
        record.notes = notes.to_string();
        true
    }

    pub fn summary(&self, schedule: &Schedule) -> ProgressSummary {
        self.summarize(schedule.days())
    }

    pub fn month_summary(&self, month: &ScheduleMonth) -> ProgressSummary {
        self.summarize(month.days.iter())
    }

    fn summarize<'a>(&self, days: impl Iterator<Item = &'a ScheduleDay>) -> ProgressSummary {
        let mut summary = ProgressSummary::default();
        for day in days {
            summary.total += 1;
            if self
                .get(&day.id)
                .is_some_and(|record| all_done(&record.chapter_progress, day.expected_count()))
            {
                summary.completed += 1;
            }
        }
        summary
    }
}

/// Completed vs scheduled days, as shown on the progress bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
}

impl ProgressSummary {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Whole percent, rounded half up; 0 for an empty schedule
    pub fn percentage(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 200 + self.total) / (self.total * 2)).min(100) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::tests::sample_schedule;
    use pretty_assertions::assert_eq;

    const THREE_UNIT_DAY: &str = "tishrei-5787-2";

    #[test]
    fn test_subunits_roll_up_only_when_all_done() {
        let schedule = sample_schedule();
        let mut store = ProgressStore::new();

        assert!(store.toggle_subunit(&schedule, THREE_UNIT_DAY, 0, true));
        assert!(!store.get(THREE_UNIT_DAY).unwrap().completed);
        assert_eq!(store.get(THREE_UNIT_DAY).unwrap().chapter_progress, vec![true, false, false]);

        store.toggle_subunit(&schedule, THREE_UNIT_DAY, 1, true);
        assert!(!store.get(THREE_UNIT_DAY).unwrap().completed);

        store.toggle_subunit(&schedule, THREE_UNIT_DAY, 2, true);
        assert!(store.get(THREE_UNIT_DAY).unwrap().completed);

        store.toggle_subunit(&schedule, THREE_UNIT_DAY, 1, false);
        assert!(!store.get(THREE_UNIT_DAY).unwrap().completed);
    }

    #[test]
    fn test_toggle_whole_day_sets_every_subunit() {
        let schedule = sample_schedule();
        let mut store = ProgressStore::new();

        store.toggle_whole_day(&schedule, THREE_UNIT_DAY);
        let record = store.get(THREE_UNIT_DAY).unwrap();
        assert!(record.completed);
        assert_eq!(record.chapter_progress, vec![true, true, true]);

        store.toggle_whole_day(&schedule, THREE_UNIT_DAY);
        let record = store.get(THREE_UNIT_DAY).unwrap();
        assert!(!record.completed);
        assert_eq!(record.chapter_progress, vec![false, false, false]);
    }

    #[test]
    fn test_toggle_whole_day_overrides_partial_progress() {
        let schedule = sample_schedule();
        let mut store = ProgressStore::new();
        store.toggle_subunit(&schedule, THREE_UNIT_DAY, 1, true);

        store.toggle_whole_day(&schedule, THREE_UNIT_DAY);
        assert_eq!(store.get(THREE_UNIT_DAY).unwrap().chapter_progress, vec![true, true, true]);
    }

    #[test]
    fn test_toggle_whole_day_resizes_stale_progress() {
        let schedule = sample_schedule();
        let mut records = BTreeMap::new();
        records.insert(
            THREE_UNIT_DAY.to_string(),
            ProgressRecord {
                completed: false,
                chapter_progress: vec![true, false, true, true, true],
                notes: "keep".to_string(),
            },
        );
        let mut store = ProgressStore::from_records(records);

        store.toggle_whole_day(&schedule, THREE_UNIT_DAY);
        let record = store.get(THREE_UNIT_DAY).unwrap();
        assert_eq!(record.chapter_progress, vec![true, true, true]);
        assert_eq!(record.notes, "keep");
    }

    #[test]
    fn test_toggle_whole_day_flips_reconciled_state() {
        let schedule = sample_schedule();
        let mut records = BTreeMap::new();
        // Saved while the day had a single sub-unit
        records.insert(
            THREE_UNIT_DAY.to_string(),
            ProgressRecord {
                completed: true,
                chapter_progress: vec![true],
                notes: String::new(),
            },
        );
        let mut store = ProgressStore::from_records(records);
        let day = schedule.find_day(THREE_UNIT_DAY).unwrap().clone();
        assert!(!store.view(&day).completed);

        store.toggle_whole_day(&schedule, THREE_UNIT_DAY);
        let view = store.view(&day);
        assert!(view.completed);
        assert_eq!(view.chapter_progress, vec![true, true, true]);

        store.toggle_whole_day(&schedule, THREE_UNIT_DAY);
        assert!(!store.view(&day).completed);
    }

    #[test]
    fn test_toggle_subunit_pads_short_progress_and_keeps_long() {
        let schedule = sample_schedule();
        let mut records = BTreeMap::new();
        records.insert(
            THREE_UNIT_DAY.to_string(),
            ProgressRecord {
                completed: false,
                chapter_progress: vec![true],
                notes: String::new(),
            },
        );
        records.insert(
            "heshvan-5787-1".to_string(),
            ProgressRecord {
                completed: false,
                chapter_progress: vec![true, true, false, false],
                notes: String::new(),
            },
        );
        let mut store = ProgressStore::from_records(records);

        store.toggle_subunit(&schedule, THREE_UNIT_DAY, 2, true);
        assert_eq!(store.get(THREE_UNIT_DAY).unwrap().chapter_progress, vec![true, false, true]);

        // extra stale entry past the count is kept but ignored by the roll-up
        store.toggle_subunit(&schedule, "heshvan-5787-1", 2, true);
        let record = store.get("heshvan-5787-1").unwrap();
        assert_eq!(record.chapter_progress, vec![true, true, true, false]);
        assert!(record.completed);
    }

    #[test]
    fn test_toggle_subunit_out_of_range_is_noop() {
        let schedule = sample_schedule();
        let mut store = ProgressStore::new();
        assert!(!store.toggle_subunit(&schedule, THREE_UNIT_DAY, 3, true));
        assert!(store.is_empty());
    }

    #[test]
    fn test_single_task_day() {
        let schedule = sample_schedule();
        let mut store = ProgressStore::new();
        store.toggle_subunit(&schedule, "tishrei-5787-1", 0, true);
        let record = store.get("tishrei-5787-1").unwrap();
        assert!(record.completed);
        assert_eq!(record.chapter_progress, vec![true]);
    }

    #[test]
    fn test_update_notes_is_idempotent() {
        let schedule = sample_schedule();
        let mut once = ProgressStore::new();
        once.update_notes(&schedule, THREE_UNIT_DAY, "חידוש יפה");

        let mut twice = ProgressStore::new();
        twice.update_notes(&schedule, THREE_UNIT_DAY, "חידוש יפה");
        twice.update_notes(&schedule, THREE_UNIT_DAY, "חידוש יפה");

        assert_eq!(once, twice);
        let record = once.get(THREE_UNIT_DAY).unwrap();
        assert!(!record.completed);
        assert!(record.chapter_progress.is_empty());
    }

    #[test]
    fn test_update_notes_keeps_completion() {
        let schedule = sample_schedule();
        let mut store = ProgressStore::new();
        store.toggle_whole_day(&schedule, THREE_UNIT_DAY);
        store.update_notes(&schedule, THREE_UNIT_DAY, "done");
        let record = store.get(THREE_UNIT_DAY).unwrap();
        assert!(record.completed);
        assert_eq!(record.chapter_progress, vec![true, true, true]);
        assert_eq!(record.notes, "done");
    }

    #[test]
    fn test_unknown_day_is_noop() {
        let schedule = sample_schedule();
        let mut store = ProgressStore::new();
        assert!(!store.toggle_whole_day(&schedule, "adar-5786-1"));
        assert!(!store.toggle_subunit(&schedule, "adar-5786-1", 0, true));
        assert!(!store.update_notes(&schedule, "adar-5786-1", "x"));
        assert_eq!(store, ProgressStore::new());
    }

    #[test]
    fn test_reconciled_view() {
        let record = ProgressRecord {
            completed: true,
            chapter_progress: vec![true],
            notes: "n".to_string(),
        };
        let view = record.reconciled(3);
        assert_eq!(view.chapter_progress, vec![true, false, false]);
        assert!(!view.completed);

        let view = record.reconciled(1);
        assert!(view.completed);

        let stale = ProgressRecord {
            completed: false,
            chapter_progress: vec![true, true, false],
            notes: String::new(),
        };
        let view = stale.reconciled(2);
        assert_eq!(view.chapter_progress, vec![true, true]);
        assert!(view.completed);
        assert_eq!(stale.done_count(2), 2);
    }

    #[test]
    fn test_summary_counts_completed_days() {
        let schedule = sample_schedule();
        let mut store = ProgressStore::new();
        store.toggle_whole_day(&schedule, "tishrei-5787-1");
        store.toggle_whole_day(&schedule, "heshvan-5787-2");
        store.toggle_subunit(&schedule, THREE_UNIT_DAY, 0, true);

        let summary = store.summary(&schedule);
        assert_eq!(summary, ProgressSummary { total: 5, completed: 2 });
        assert_eq!(summary.remaining(), 3);
        assert_eq!(summary.percentage(), 40);

        let tishrei = store.month_summary(&schedule.months()[0]);
        assert_eq!(tishrei, ProgressSummary { total: 3, completed: 1 });
        assert_eq!(tishrei.percentage(), 33);
    }

    #[test]
    fn test_summary_agrees_with_reconciled_view() {
        let schedule = sample_schedule();
        let mut records = BTreeMap::new();
        records.insert(
            "tishrei-5787-1".to_string(),
            ProgressRecord {
                completed: false,
                chapter_progress: vec![true, false],
                notes: String::new(),
            },
        );
        records.insert(
            THREE_UNIT_DAY.to_string(),
            ProgressRecord {
                completed: true,
                chapter_progress: vec![true],
                notes: String::new(),
            },
        );
        let store = ProgressStore::from_records(records);

        let one_unit = schedule.find_day("tishrei-5787-1").unwrap();
        let three_unit = schedule.find_day(THREE_UNIT_DAY).unwrap();
        assert!(store.view(one_unit).completed);
        assert!(!store.view(three_unit).completed);

        assert_eq!(store.summary(&schedule), ProgressSummary { total: 5, completed: 1 });
        assert_eq!(
            store.month_summary(&schedule.months()[0]),
            ProgressSummary { total: 3, completed: 1 }
        );
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(ProgressSummary { total: 3, completed: 2 }.percentage(), 67);
        assert_eq!(ProgressSummary { total: 8, completed: 1 }.percentage(), 13);
        assert_eq!(ProgressSummary { total: 0, completed: 0 }.percentage(), 0);
    }

    #[test]
    fn test_record_json_field_names() {
        let json = r#"{"completed":true,"chapterProgress":[true,false],"notes":"x"}"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.chapter_progress, vec![true, false]);

        let partial: ProgressRecord = serde_json::from_str(r#"{"notes":"only"}"#).unwrap();
        assert_eq!(partial.notes, "only");
        assert!(partial.chapter_progress.is_empty());
    }
}
