pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod progress_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use details_pane::render_details_pane;
use input_form::{render_status_line, render_text_prompt};
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::{render_list_pane, render_month_tabs};
use modal::render_account_modal;
use progress_pane::render_progress_pane;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_progress_pane(f, app, layout.header_area);
    render_month_tabs(f, app, layout.tabs_area);
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_status_line(f, app, layout.status_area);

    match app.ui_mode {
        UiMode::AccountModal => render_account_modal(f, app, size),
        UiMode::CreatingAccount | UiMode::ImportingBackup => render_text_prompt(f, app, size),
        UiMode::Normal | UiMode::Searching => {}
    }
}
