use crate::app::AppState;
use crate::domain::{ProgressRecord, ScheduleDay};
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, selected_style, special_style, title_style, today_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

const EMPTY_STATE: &str = "לא נמצאו ימי לימוד";
const TODAY_BADGE: &str = " ● היום";

/// Render the month tabs with per-month completion
pub fn render_month_tabs(f: &mut Frame, app: &AppState, area: Rect) {
    let titles: Vec<Line> = app
        .schedule
        .months()
        .iter()
        .map(|month| {
            let summary = app.progress.month_summary(month);
            Line::from(format!("{} {} ({}%)", month.name, month.year, summary.percentage()))
        })
        .collect();

    let selected = app.schedule.month_index(&app.active_month_id).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).border_style(border_style()))
        .style(default_style())
        .highlight_style(selected_style())
        .select(selected);

    f.render_widget(tabs, area);
}

/// Render the study-day list of the active month
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let days = app.visible_days();

    let title = match (app.active_month(), app.search_query.is_empty()) {
        (Some(month), true) => format!(" {} {} ", month.name, month.year),
        (Some(month), false) => format!(" {} {} · \"{}\" ", month.name, month.year, app.search_query),
        (None, _) => " ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if days.is_empty() {
        let empty = Paragraph::new(EMPTY_STATE)
            .style(hint_style())
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = days
        .iter()
        .map(|day| {
            let record = app.day_progress(day);
            let is_today = app.is_today(&day.id);
            let style = if record.completed {
                done_style()
            } else if is_today {
                today_style()
            } else if day.is_special {
                special_style()
            } else {
                default_style()
            };
            ListItem::new(create_day_line(day, &record, is_today)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style())
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a study day
/// Format: [✓] ד׳  הלכות יסודי התורה  א-ג  2/3 ● היום
fn create_day_line(day: &ScheduleDay, record: &ProgressRecord, is_today: bool) -> Line<'static> {
    let count = record.chapter_progress.len();
    let mark = if record.completed { "✓" } else { " " };

    let mut spans = vec![
        Span::raw(format!("[{}] ", mark)),
        Span::raw(format!("{:<3} ", day.hebrew_day)),
        Span::raw(day.subject.clone()),
    ];
    if !day.hide_label {
        spans.push(Span::raw(format!("  {}", day.chapters)));
    }
    if count > 1 {
        spans.push(Span::raw(format!("  {}/{}", record.done_count(count), count)));
    }
    if is_today {
        spans.push(Span::styled(TODAY_BADGE, today_style()));
    }

    Line::from(spans)
}
