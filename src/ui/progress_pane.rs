use crate::app::AppState;
use crate::domain::ProgressSummary;
use crate::ui::styles::{border_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// "12 / 90 ימים · נותרו 78"
fn summary_text(summary: &ProgressSummary) -> String {
    format!(
        "{} / {} ימים · נותרו {}",
        summary.completed,
        summary.total,
        summary.remaining()
    )
}

/// Render the header: study mode, cycle, today's date, account and the overall gauge
pub fn render_progress_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let summary = app.summary();

    let mut spans = vec![
        Span::styled(app.study_mode.name(), title_style()),
        Span::raw(" · "),
        Span::raw(app.study_mode.cycle_label()),
    ];
    match app.today_label() {
        Some(label) => {
            spans.push(Span::raw(" · היום: "));
            spans.push(Span::raw(label));
        }
        None => spans.push(Span::styled(" · טוען תאריך...", hint_style())),
    }
    if let Some(account) = &app.account {
        spans.push(Span::raw(format!("   [{}] {}", account.initial(), account.name)));
        if app.is_syncing() {
            spans.push(Span::styled(" מסנכרן...", hint_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" מעקב לימוד רמב״ם ", title_style()));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode, date, account
            Constraint::Length(1), // Gauge
        ])
        .split(block.inner(area));

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .percent(summary.percentage())
        .label(format!("{}% · {}", summary.percentage(), summary_text(&summary)));

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    f.render_widget(gauge, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text() {
        let summary = ProgressSummary {
            total: 90,
            completed: 12,
        };
        assert_eq!(summary_text(&summary), "12 / 90 ימים · נותרו 78");
    }
}
