use super::chapters::{plan_subunits, SubunitPlan};
use super::enums::StudyMode;
use crate::error::ShiurError;
use serde::Deserialize;
use std::collections::HashSet;

const THREE_CHAPTERS_DATA: &str = include_str!("../../data/schedule-3-chapters.json");
const ONE_CHAPTER_DATA: &str = include_str!("../../data/schedule-1-chapter.json");

/// One day of the study calendar. Ids follow `<monthkey>-<year>-<day>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub id: String,
    pub hebrew_day: String,
    pub subject: String,
    pub chapters: String,
    /// Not decomposed into chapters, tracked as a single task
    #[serde(default)]
    pub hide_label: bool,
    #[serde(default)]
    pub is_special: bool,
}

impl ScheduleDay {
    pub fn subunits(&self) -> SubunitPlan {
        plan_subunits(&self.chapters, self.hide_label)
    }

    pub fn expected_count(&self) -> usize {
        self.subunits().count()
    }

    /// Case- and mark-sensitive substring match used by the search box
    pub fn matches(&self, query: &str) -> bool {
        self.subject.contains(query)
            || self.chapters.contains(query)
            || self.hebrew_day.contains(query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleMonth {
    /// `<monthkey>-<year>`
    pub id: String,
    pub name: String,
    pub year: String,
    pub days: Vec<ScheduleDay>,
}

impl ScheduleMonth {
    /// Days shown for a search query; an empty query shows the whole month.
    pub fn filter_days(&self, query: &str) -> Vec<&ScheduleDay> {
        if query.is_empty() {
            return self.days.iter().collect();
        }
        self.days.iter().filter(|day| day.matches(query)).collect()
    }

    pub fn contains_day(&self, day_id: &str) -> bool {
        self.days.iter().any(|day| day.id == day_id)
    }
}

/// Ordered months of one study mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    months: Vec<ScheduleMonth>,
}

impl Schedule {
    pub fn new(months: Vec<ScheduleMonth>) -> Self {
        Self { months }
    }

    pub fn months(&self) -> &[ScheduleMonth] {
        &self.months
    }

    pub fn days(&self) -> impl Iterator<Item = &ScheduleDay> {
        self.months.iter().flat_map(|month| month.days.iter())
    }

    pub fn find_month(&self, month_id: &str) -> Option<&ScheduleMonth> {
        self.months.iter().find(|month| month.id == month_id)
    }

    pub fn find_month_containing(&self, day_id: &str) -> Option<&ScheduleMonth> {
        self.months.iter().find(|month| month.contains_day(day_id))
    }

    pub fn find_day(&self, day_id: &str) -> Option<&ScheduleDay> {
        self.days().find(|day| day.id == day_id)
    }

    /// The candidate month if it exists here, otherwise the first month.
    pub fn active_month(&self, candidate: Option<&str>) -> Option<&ScheduleMonth> {
        candidate
            .and_then(|id| self.find_month(id))
            .or_else(|| self.months.first())
    }

    pub fn month_index(&self, month_id: &str) -> Option<usize> {
        self.months.iter().position(|month| month.id == month_id)
    }
}

/// Load the bundled schedule for a study mode.
pub fn load_schedule(mode: StudyMode) -> Result<Schedule, ShiurError> {
    let data = match mode {
        StudyMode::ThreeChapters => THREE_CHAPTERS_DATA,
        StudyMode::OneChapter => ONE_CHAPTER_DATA,
    };
    parse_schedule(mode, data)
}

fn parse_schedule(mode: StudyMode, data: &str) -> Result<Schedule, ShiurError> {
    let invalid = |reason: String| ShiurError::Schedule {
        mode: mode.to_tag(),
        reason,
    };

    let schedule: Schedule = serde_json::from_str(data).map_err(|e| invalid(e.to_string()))?;

    if schedule.months.is_empty() {
        return Err(invalid("no months".to_string()));
    }

    let mut seen = HashSet::new();
    for month in &schedule.months {
        for day in &month.days {
            if !seen.insert(day.id.as_str()) {
                return Err(invalid(format!("duplicate day id {}", day.id)));
            }
        }
    }

    Ok(schedule)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small two-month schedule used across the crate's tests.
    pub(crate) fn sample_schedule() -> Schedule {
        let day = |id: &str, hebrew_day: &str, subject: &str, chapters: &str, hide_label: bool| {
            ScheduleDay {
                id: id.to_string(),
                hebrew_day: hebrew_day.to_string(),
                subject: subject.to_string(),
                chapters: chapters.to_string(),
                hide_label,
                is_special: hide_label,
            }
        };

        Schedule::new(vec![
            ScheduleMonth {
                id: "tishrei-5787".to_string(),
                name: "תשרי".to_string(),
                year: "תשפ\"ז".to_string(),
                days: vec![
                    day("tishrei-5787-1", "א׳", "מנין המצוות", "מצוות עשה", true),
                    day("tishrei-5787-2", "ב׳", "הלכות יסודי התורה", "א-ג", false),
                    day("tishrei-5787-3", "ג׳", "הלכות יסודי התורה, הלכות דעות", "י/א-ב", false),
                ],
            },
            ScheduleMonth {
                id: "heshvan-5787".to_string(),
                name: "חשון".to_string(),
                year: "תשפ\"ז".to_string(),
                days: vec![
                    day("heshvan-5787-1", "א׳", "הלכות תשובה", "ד-ו", false),
                    day("heshvan-5787-2", "ב׳", "הלכות תשובה", "ז", false),
                ],
            },
        ])
    }

    #[test]
    fn test_bundled_schedules_load() {
        for mode in StudyMode::all() {
            let schedule = load_schedule(*mode).unwrap();
            assert!(!schedule.months().is_empty());
            for month in schedule.months() {
                for day in &month.days {
                    assert!(
                        day.id.starts_with(&format!("{}-", month.id)),
                        "{} not in {}",
                        day.id,
                        month.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_bundled_three_chapter_days_have_three_units() {
        let schedule = load_schedule(StudyMode::ThreeChapters).unwrap();
        for day in schedule.days().filter(|day| !day.hide_label) {
            assert_eq!(day.expected_count(), 3, "{} ({})", day.id, day.chapters);
        }
    }

    #[test]
    fn test_bundled_one_chapter_days_have_one_unit() {
        let schedule = load_schedule(StudyMode::OneChapter).unwrap();
        assert!(schedule.days().all(|day| day.expected_count() == 1));
    }

    #[test]
    fn test_find_month_and_day() {
        let schedule = sample_schedule();
        assert_eq!(schedule.find_month("heshvan-5787").unwrap().name, "חשון");
        assert!(schedule.find_month("kislev-5787").is_none());
        assert_eq!(schedule.find_day("tishrei-5787-2").unwrap().chapters, "א-ג");
        assert!(schedule.find_day("tishrei-5787-9").is_none());
    }

    #[test]
    fn test_find_month_containing() {
        let schedule = sample_schedule();
        let month = schedule.find_month_containing("heshvan-5787-2").unwrap();
        assert_eq!(month.id, "heshvan-5787");
        assert!(schedule.find_month_containing("kislev-5787-1").is_none());
    }

    #[test]
    fn test_active_month_falls_back_to_first() {
        let schedule = sample_schedule();
        assert_eq!(schedule.active_month(Some("heshvan-5787")).unwrap().id, "heshvan-5787");
        assert_eq!(schedule.active_month(Some("adar-5786")).unwrap().id, "tishrei-5787");
        assert_eq!(schedule.active_month(None).unwrap().id, "tishrei-5787");
        assert!(Schedule::new(Vec::new()).active_month(None).is_none());
    }

    #[test]
    fn test_filter_days_empty_query_shows_all() {
        let schedule = sample_schedule();
        let month = &schedule.months()[0];
        assert_eq!(month.filter_days("").len(), 3);
    }

    #[test]
    fn test_filter_days_matches_each_field() {
        let schedule = sample_schedule();
        let month = &schedule.months()[0];

        let by_subject: Vec<_> = month.filter_days("דעות").iter().map(|d| d.id.clone()).collect();
        assert_eq!(by_subject, vec!["tishrei-5787-3"]);

        let by_chapters: Vec<_> = month.filter_days("א-ג").iter().map(|d| d.id.clone()).collect();
        assert_eq!(by_chapters, vec!["tishrei-5787-2"]);

        let by_day: Vec<_> = month.filter_days("ב׳").iter().map(|d| d.id.clone()).collect();
        assert_eq!(by_day, vec!["tishrei-5787-2"]);

        assert!(month.filter_days("שבת").is_empty());
    }

    #[test]
    fn test_parse_schedule_rejects_duplicates() {
        let data = r#"[{"id":"av-5786","name":"אב","year":"תשפ\"ו","days":[
            {"id":"av-5786-1","hebrewDay":"א׳","subject":"s","chapters":"א"},
            {"id":"av-5786-1","hebrewDay":"ב׳","subject":"s","chapters":"ב"}]}]"#;
        assert!(parse_schedule(StudyMode::OneChapter, data).is_err());
        assert!(parse_schedule(StudyMode::OneChapter, "[]").is_err());
        assert!(parse_schedule(StudyMode::OneChapter, "{").is_err());
    }
}
