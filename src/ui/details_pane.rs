use crate::app::AppState;
use crate::ui::styles::{border_style, checked_style, default_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected day: chapter checklist and notes
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" פרטים ", title_style()));

    let Some(day) = app.selected_day() else {
        f.render_widget(Paragraph::new("לא נבחר יום").style(hint_style()).block(block), area);
        return;
    };
    let record = app.day_progress(day);
    let plan = day.subunits();

    let mut lines = vec![
        Line::from(Span::styled(day.subject.clone(), title_style())),
        Line::raw(format!("{} · {}", day.hebrew_day, day.chapters)),
        Line::raw(""),
    ];

    for (index, label) in plan.labels().iter().enumerate() {
        let done = record.is_subunit_done(index);
        let (mark, style) = if done {
            ("[x]", checked_style())
        } else {
            ("[ ]", default_style())
        };
        let key = if index < 9 {
            format!("{} ", index + 1)
        } else {
            "  ".to_string()
        };
        lines.push(Line::from(vec![
            Span::styled(key, hint_style()),
            Span::styled(format!("{} {}", mark, label), style),
        ]));
    }
    lines.push(Line::raw(""));

    if record.notes.trim().is_empty() {
        lines.push(Line::from(Span::styled("הערות: (ריק) · n לעריכה", hint_style())));
    } else {
        lines.push(Line::from(Span::styled("הערות:", title_style())));
        for note_line in record.notes.lines() {
            lines.push(Line::raw(format!("  {}", note_line)));
        }
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
