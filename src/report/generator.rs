use crate::app::AppState;
use crate::domain::{ProgressSummary, ScheduleDay};
use anyhow::Result;

fn format_summary(summary: &ProgressSummary) -> String {
    format!(
        "{}/{} days ({}%), {} remaining",
        summary.completed,
        summary.total,
        summary.percentage(),
        summary.remaining()
    )
}

/// Overall status: study mode, progress, today and account
pub fn status_report(app: &AppState) -> String {
    let mut report = String::new();

    report.push_str(&format!(
        "Study mode: {} ({}, {})\n",
        app.study_mode.to_tag(),
        app.study_mode.name(),
        app.study_mode.cycle_label()
    ));
    report.push_str(&format!("Progress:   {}\n", format_summary(&app.summary())));

    for month in app.schedule.months() {
        let summary = app.progress.month_summary(month);
        report.push_str(&format!("  {:<14} {}\n", month.id, format_summary(&summary)));
    }

    match (app.today_label(), &app.today) {
        (Some(label), Some(marker)) => report.push_str(&format!("Today:      {} ({})\n", label, marker.day_id)),
        (Some(label), None) => report.push_str(&format!("Today:      {} (not in schedule)\n", label)),
        (None, _) => report.push_str("Today:      unavailable\n"),
    }

    match &app.account {
        Some(account) => report.push_str(&format!(
            "Account:    {} [{}], last sync {}\n",
            account.name, account.sync_id, account.last_sync
        )),
        None => report.push_str("Account:    none\n"),
    }

    report
}

/// One line per day: `[x] tishrei-5787-4  ד׳  הלכות יסודי התורה  א-ג  3/3`
pub fn day_line(app: &AppState, day: &ScheduleDay) -> String {
    let record = app.day_progress(day);
    let count = record.chapter_progress.len();
    let mark = if record.completed { "x" } else { " " };
    let today = if app.is_today(&day.id) { "  <- today" } else { "" };
    let notes = if record.notes.trim().is_empty() { "" } else { "  *" };

    format!(
        "[{}] {:<16} {:<3} {}  {}  {}/{}{}{}",
        mark,
        day.id,
        day.hebrew_day,
        day.subject,
        day.chapters,
        record.done_count(count),
        count,
        notes,
        today
    )
}

/// Days of one month, optionally filtered by a search query
pub fn list_report(app: &AppState, month_id: Option<&str>, search: Option<&str>) -> Result<String> {
    let month = match month_id {
        Some(id) => app
            .schedule
            .find_month(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown month '{}'", id))?,
        None => app
            .active_month()
            .ok_or_else(|| anyhow::anyhow!("The schedule has no months"))?,
    };

    let days = month.filter_days(search.unwrap_or(""));
    let mut report = format!("{} {} ({})\n", month.name, month.year, month.id);
    if days.is_empty() {
        report.push_str("לא נמצאו ימי לימוד\n");
    }
    for day in days {
        report.push_str(&day_line(app, day));
        report.push('\n');
    }
    Ok(report)
}

/// A day with its chapter checklist and notes
pub fn day_report(app: &AppState, day: &ScheduleDay) -> String {
    let record = app.day_progress(day);
    let mut report = format!("{}\n", day_line(app, day));

    for (index, label) in day.subunits().labels().iter().enumerate() {
        let mark = if record.is_subunit_done(index) { "x" } else { " " };
        report.push_str(&format!("  {}. [{}] {}\n", index + 1, mark, label));
    }
    if !record.notes.trim().is_empty() {
        report.push_str("  Notes:\n");
        for line in record.notes.lines() {
            report.push_str(&format!("    {}\n", line));
        }
    }
    report
}
