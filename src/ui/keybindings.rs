use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ day   "),
        Span::raw("←/→ month   "),
        Span::raw("Enter/Space done   "),
        Span::raw("1-9 chapter   "),
        Span::raw("n notes   "),
        Span::raw("/ search   "),
        Span::raw("t today   "),
        Span::raw("m mode   "),
        Span::raw("a account   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
