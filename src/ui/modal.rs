use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the account modal: profile, last sync and backup actions
pub fn render_account_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(account) = &app.account else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let sync_line = if app.is_syncing() {
        Line::styled("  מסנכרן...", modal_title_style())
    } else {
        Line::raw(format!("  סנכרון אחרון: {}", account.last_sync))
    };

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!("  [{}] ", account.initial()), modal_title_style()),
            Span::raw(account.name.clone()),
        ]),
        Line::raw(format!("  מזהה סנכרון: {}", account.sync_id)),
        sync_line,
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [s]", modal_title_style()),
            Span::raw(" סנכרון  "),
            Span::styled("[e]", modal_title_style()),
            Span::raw(" ייצוא גיבוי  "),
            Span::styled("[i]", modal_title_style()),
            Span::raw(" ייבוא גיבוי"),
        ]),
        Line::raw(""),
        Line::styled("  Esc לסגירה", hint_style()),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" חשבון ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
