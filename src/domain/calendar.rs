use super::numerals;
use super::schedule::Schedule;

/// Today's date as reported by a date source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HebrewDate {
    /// Transliterated month name, e.g. "Cheshvan" or "Adar II"
    pub month_name: String,
    pub day: u32,
    pub year: i64,
    /// Year as Hebrew letters, e.g. "תשפ״ז"
    pub year_str: String,
}

/// The schedule day and month that correspond to today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayMarker {
    pub day_id: String,
    pub month_id: String,
}

/// Month name spellings -> schedule month key.
const MONTH_KEYS: &[(&str, &str)] = &[
    ("Tishrei", "tishrei"),
    ("Tishri", "tishrei"),
    ("Cheshvan", "heshvan"),
    ("Heshvan", "heshvan"),
    ("Kislev", "kislev"),
    ("Tevet", "tevet"),
    ("Shevat", "shevat"),
    ("Sh'vat", "shevat"),
    ("Adar", "adar"),
    ("Adar I", "adar-i"),
    ("Adar II", "adar-ii"),
    ("Nisan", "nisan"),
    ("Iyyar", "iyar"),
    ("Iyar", "iyar"),
    ("Sivan", "sivan"),
    ("Tamuz", "tammuz"),
    ("Tammuz", "tammuz"),
    ("Av", "av"),
    ("Elul", "elul"),
];

/// Month key -> Hebrew display name.
const MONTH_DISPLAY: &[(&str, &str)] = &[
    ("tishrei", "תשרי"),
    ("heshvan", "חשון"),
    ("kislev", "כסלו"),
    ("tevet", "טבת"),
    ("shevat", "שבט"),
    ("adar", "אדר"),
    ("adar-i", "אדר א׳"),
    ("adar-ii", "אדר ב׳"),
    ("nisan", "ניסן"),
    ("iyar", "אייר"),
    ("sivan", "סיון"),
    ("tammuz", "תמוז"),
    ("av", "אב"),
    ("elul", "אלול"),
];

const YEAR_LABELS: &[(i64, &str)] = &[
    (5785, "ה'תשפ\"ה"),
    (5786, "ה'תשפ\"ו"),
    (5787, "ה'תשפ\"ז"),
    (5788, "ה'תשפ\"ח"),
];

const ERA_PREFIX: &str = "ה'";

/// Normalize a month name to the key used in schedule ids.
pub fn month_key(month_name: &str) -> Option<&'static str> {
    let name = month_name.trim();
    MONTH_KEYS
        .iter()
        .find(|(spelling, _)| spelling.eq_ignore_ascii_case(name))
        .map(|(_, key)| *key)
}

/// Hebrew name for a month, or the name itself when it is not recognised.
pub fn display_month(month_name: &str) -> String {
    month_key(month_name)
        .and_then(|key| MONTH_DISPLAY.iter().find(|(k, _)| *k == key))
        .map(|(_, display)| display.to_string())
        .unwrap_or_else(|| month_name.to_string())
}

/// Canonical year label with the era prefix, e.g. 5787 -> `ה'תשפ"ז`.
pub fn format_hebrew_year(year: i64, raw: &str) -> String {
    if let Some((_, label)) = YEAR_LABELS.iter().find(|(y, _)| *y == year) {
        return label.to_string();
    }

    let clean: String = raw
        .chars()
        .filter(|c| !matches!(c, '״' | '"' | '\'' | '׳' | '“' | '”'))
        .collect();
    if clean.trim().chars().count() == 4 && !raw.contains(ERA_PREFIX) {
        return format!("{}{}", ERA_PREFIX, raw);
    }
    raw.to_string()
}

/// "ז׳ חשון ה'תשפ"ז"
pub fn display_date(date: &HebrewDate) -> String {
    format!(
        "{} {} {}",
        numerals::encode(i64::from(date.day)),
        display_month(&date.month_name),
        format_hebrew_year(date.year, &date.year_str)
    )
}

/// Find today's day in a schedule.
///
/// The month is matched by id or by containing the candidate day id; when
/// nothing matches (unknown month name, date outside the schedule) there is
/// no today marker.
pub fn resolve_today(schedule: &Schedule, date: &HebrewDate) -> Option<TodayMarker> {
    let key = month_key(&date.month_name)?;
    let month_id = format!("{}-{}", key, date.year);
    let day_id = format!("{}-{}", month_id, date.day);

    let month = schedule
        .find_month(&month_id)
        .or_else(|| schedule.find_month_containing(&day_id))?;

    Some(TodayMarker {
        day_id,
        month_id: month.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::tests::sample_schedule;

    fn hebrew_date(month: &str, day: u32, year: i64) -> HebrewDate {
        HebrewDate {
            month_name: month.to_string(),
            day,
            year,
            year_str: "תשפ״ז".to_string(),
        }
    }

    #[test]
    fn test_month_key_spelling_variants() {
        assert_eq!(month_key("Cheshvan"), Some("heshvan"));
        assert_eq!(month_key("Heshvan"), Some("heshvan"));
        assert_eq!(month_key("Tamuz"), Some("tammuz"));
        assert_eq!(month_key("Tammuz"), Some("tammuz"));
        assert_eq!(month_key("Adar II"), Some("adar-ii"));
        assert_eq!(month_key("Sh'vat"), Some("shevat"));
        assert_eq!(month_key("Marcheshvan"), None);
    }

    #[test]
    fn test_display_month() {
        assert_eq!(display_month("Kislev"), "כסלו");
        assert_eq!(display_month("Adar I"), "אדר א׳");
        assert_eq!(display_month("Unknown"), "Unknown");
    }

    #[test]
    fn test_format_hebrew_year() {
        assert_eq!(format_hebrew_year(5787, "תשפ״ז"), "ה'תשפ\"ז");
        assert_eq!(format_hebrew_year(5789, "תשפ״ט"), "ה'תשפ״ט");
        assert_eq!(format_hebrew_year(5789, "ה'תשפ״ט"), "ה'תשפ״ט");
        assert_eq!(format_hebrew_year(5790, "תש״צ"), "תש״צ");
        assert_eq!(format_hebrew_year(5800, "ת״ת"), "ת״ת");
    }

    #[test]
    fn test_display_date() {
        let date = hebrew_date("Cheshvan", 7, 5787);
        assert_eq!(display_date(&date), "ז׳ חשון ה'תשפ\"ז");
    }

    #[test]
    fn test_resolve_today_found() {
        let schedule = sample_schedule();
        let marker = resolve_today(&schedule, &hebrew_date("Heshvan", 2, 5787)).unwrap();
        assert_eq!(
            marker,
            TodayMarker {
                day_id: "heshvan-5787-2".to_string(),
                month_id: "heshvan-5787".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_today_unresolved() {
        let schedule = sample_schedule();
        assert!(resolve_today(&schedule, &hebrew_date("Kislev", 2, 5787)).is_none());
        assert!(resolve_today(&schedule, &hebrew_date("Tishrei", 2, 5786)).is_none());
        assert!(resolve_today(&schedule, &hebrew_date("Smarch", 2, 5787)).is_none());
    }
}
