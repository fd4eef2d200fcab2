//! Gregorian to Hebrew calendar conversion.
//!
//! Arithmetic follows the fixed-day (Rata Die) formulation: day 1 is
//! 0001-01-01 in the proleptic Gregorian calendar, which is what
//! `chrono::Datelike::num_days_from_ce` returns. Months are numbered from
//! Nisan = 1; the year starts at Tishrei = 7 and Adar II = 13 in leap years.

use chrono::{Datelike, NaiveDate};

/// Fixed day of 1 Tishrei AM 1.
const HEBREW_EPOCH: i64 = -1_373_427;

const TISHREI: u32 = 7;
const NISAN: u32 = 1;

/// A date in the Hebrew calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HebrewCalendarDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl HebrewCalendarDate {
    /// Month name in the transliteration the date service uses.
    pub fn month_name(&self) -> &'static str {
        month_name(self.month, is_leap_year(self.year))
    }
}

pub fn is_leap_year(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

fn last_month_of_year(year: i64) -> u32 {
    if is_leap_year(year) {
        13
    } else {
        12
    }
}

/// Days from the epoch to the molad of Tishrei, with the weekday postponement.
fn elapsed_days(year: i64) -> i64 {
    let months_elapsed = (235 * year - 234).div_euclid(19);
    let parts_elapsed = 12_084 + 13_753 * months_elapsed;
    let days = 29 * months_elapsed + parts_elapsed.div_euclid(25_920);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

fn year_length_correction(year: i64) -> i64 {
    let ny0 = elapsed_days(year - 1);
    let ny1 = elapsed_days(year);
    let ny2 = elapsed_days(year + 1);
    if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    }
}

fn new_year(year: i64) -> i64 {
    HEBREW_EPOCH + elapsed_days(year) + year_length_correction(year)
}

fn days_in_year(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

fn last_day_of_month(month: u32, year: i64) -> u32 {
    let year_length = days_in_year(year);
    match month {
        2 | 4 | 6 | 10 | 13 => 29,
        12 if !is_leap_year(year) => 29,
        // Cheshvan is long only in complete years
        8 if !matches!(year_length, 355 | 385) => 29,
        // Kislev is short only in deficient years
        9 if matches!(year_length, 353 | 383) => 29,
        _ => 30,
    }
}

fn fixed_from_hebrew(year: i64, month: u32, day: u32) -> i64 {
    let mut fixed = new_year(year) + i64::from(day) - 1;
    let month_days = |range: std::ops::Range<u32>| -> i64 {
        range.map(|m| i64::from(last_day_of_month(m, year))).sum()
    };
    if month < TISHREI {
        fixed += month_days(TISHREI..last_month_of_year(year) + 1);
        fixed += month_days(NISAN..month);
    } else {
        fixed += month_days(TISHREI..month);
    }
    fixed
}

fn hebrew_from_fixed(fixed: i64) -> HebrewCalendarDate {
    // mean year length is 35975351/98496 days
    let approx = ((fixed - HEBREW_EPOCH) * 98_496).div_euclid(35_975_351) + 1;
    let mut year = approx - 1;
    while new_year(year + 1) <= fixed {
        year += 1;
    }

    let mut month = if fixed < fixed_from_hebrew(year, NISAN, 1) {
        TISHREI
    } else {
        NISAN
    };
    while fixed > fixed_from_hebrew(year, month, last_day_of_month(month, year)) {
        month += 1;
    }

    let day = (fixed - fixed_from_hebrew(year, month, 1) + 1) as u32;
    HebrewCalendarDate { year, month, day }
}

/// Convert a Gregorian date to the Hebrew calendar.
pub fn from_gregorian(date: NaiveDate) -> HebrewCalendarDate {
    hebrew_from_fixed(i64::from(date.num_days_from_ce()))
}

fn month_name(month: u32, leap: bool) -> &'static str {
    match month {
        1 => "Nisan",
        2 => "Iyyar",
        3 => "Sivan",
        4 => "Tamuz",
        5 => "Av",
        6 => "Elul",
        7 => "Tishrei",
        8 => "Cheshvan",
        9 => "Kislev",
        10 => "Tevet",
        11 => "Shevat",
        12 if leap => "Adar I",
        12 => "Adar",
        _ => "Adar II",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rosh_hashanah_dates() {
        assert_eq!(
            from_gregorian(date(2024, 10, 3)),
            HebrewCalendarDate { year: 5785, month: 7, day: 1 }
        );
        assert_eq!(
            from_gregorian(date(2025, 9, 23)),
            HebrewCalendarDate { year: 5786, month: 7, day: 1 }
        );
    }

    #[test]
    fn test_known_conversions() {
        let cheshvan = from_gregorian(date(2026, 10, 18));
        assert_eq!(cheshvan, HebrewCalendarDate { year: 5787, month: 8, day: 7 });
        assert_eq!(cheshvan.month_name(), "Cheshvan");

        let nisan = from_gregorian(date(2026, 3, 20));
        assert_eq!(nisan, HebrewCalendarDate { year: 5786, month: 1, day: 2 });

        let tevet = from_gregorian(date(2000, 1, 1));
        assert_eq!(tevet, HebrewCalendarDate { year: 5760, month: 10, day: 23 });
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(5787));
        assert!(!is_leap_year(5786));
        assert!(is_leap_year(5784));
    }

    #[test]
    fn test_year_lengths() {
        assert_eq!(days_in_year(5786), 354);
        assert_eq!(days_in_year(5787), 385);
        assert_eq!(last_day_of_month(8, 5787), 30);
        assert_eq!(last_day_of_month(9, 5787), 30);
    }

    #[test]
    fn test_adar_names_in_leap_year() {
        assert_eq!(month_name(12, true), "Adar I");
        assert_eq!(month_name(12, false), "Adar");
        assert_eq!(month_name(13, true), "Adar II");
    }

    #[test]
    fn test_consecutive_days_advance() {
        let mut previous = from_gregorian(date(2026, 9, 1));
        let mut current = date(2026, 9, 2);
        for _ in 0..400 {
            let next = from_gregorian(current);
            assert!(
                next.day == previous.day + 1 || next.day == 1,
                "{:?} -> {:?}",
                previous,
                next
            );
            previous = next;
            current = current.succ_opt().unwrap();
        }
    }
}
