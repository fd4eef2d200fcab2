use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, notice_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the bottom line: the search query while typing, otherwise the latest notice
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = if app.ui_mode == UiMode::Searching {
        Line::from(vec![
            Span::styled(" חיפוש: ", modal_title_style()),
            Span::raw(app.search_query.clone()),
            Span::styled("█", modal_title_style()), // Cursor
            Span::styled("   Enter לאישור · Esc לניקוי", hint_style()),
        ])
    } else if let Some(notice) = &app.notice {
        Line::styled(format!(" {}", notice), notice_style())
    } else if !app.search_query.is_empty() {
        Line::styled(format!(" מסונן לפי \"{}\" · Esc לניקוי", app.search_query), hint_style())
    } else {
        Line::raw("")
    };

    f.render_widget(Paragraph::new(line), area);
}

/// Render the single-field prompt used for the account name and the import path
pub fn render_text_prompt(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, label) = match app.ui_mode {
        UiMode::CreatingAccount => (" יצירת חשבון ", "שם:"),
        UiMode::ImportingBackup => (" ייבוא גיבוי ", "נתיב הקובץ:"),
        _ => return,
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::raw(""),
        Line::raw(label),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(app.text_input.clone(), modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]),
        Line::raw(""),
        Line::raw("Enter לאישור  ·  Esc לביטול"),
    ];
    if let Some(notice) = &app.notice {
        lines.push(Line::raw(""));
        lines.push(Line::styled(notice.clone(), notice_style()));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
