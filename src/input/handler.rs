use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::env;
use std::fs;
use std::process::Command;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Handle keyboard input events
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::AccountModal => handle_account_modal(app, key),
        UiMode::CreatingAccount | UiMode::ImportingBackup => handle_text_prompt(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    app.notice = None;

    match key.code {
        // Day selection
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Month tabs
        KeyCode::Left | KeyCode::Char('h') => {
            app.previous_month();
            Ok(false)
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.next_month();
            Ok(false)
        }

        // Toggle the whole day
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected_day()?;
            Ok(false)
        }

        // Toggle a single chapter, 1-based
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).unwrap_or(1) as usize - 1;
            app.toggle_selected_subunit(index)?;
            Ok(false)
        }

        // Notes in $EDITOR; the event loop releases the terminal around this
        KeyCode::Char('n') | KeyCode::Char('N') => {
            edit_notes_external(app)?;
            Ok(false)
        }

        KeyCode::Char('/') => {
            app.start_search();
            Ok(false)
        }
        KeyCode::Esc => {
            app.clear_search();
            Ok(false)
        }

        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.toggle_study_mode()?;
            Ok(false)
        }

        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.jump_to_today();
            Ok(false)
        }

        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.open_account_modal();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while typing a search query
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the account modal
fn handle_account_modal(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.start_sync(Instant::now());
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            let dir = env::current_dir().context("Could not determine current directory")?;
            app.export_backup(&dir, Local::now().date_naive())?;
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            app.start_import(Local::now().date_naive());
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.close_modal();
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the account name and import path prompts
fn handle_text_prompt(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            if app.ui_mode == UiMode::CreatingAccount {
                app.submit_account()?;
            } else {
                app.submit_import()?;
            }
        }
        KeyCode::Esc => app.close_modal(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_push(c),
        _ => {}
    }
    Ok(false)
}

/// Edit the selected day's notes using external $EDITOR
fn edit_notes_external(app: &mut AppState) -> Result<()> {
    if app.selected_day().is_none() {
        return Ok(());
    }

    // Get editor from environment, default to vi
    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(windows) {
            "notepad".to_string()
        } else {
            "vi".to_string()
        }
    });

    let mut temp_file = NamedTempFile::new()?;
    std::io::Write::write_all(&mut temp_file, app.selected_notes().as_bytes())?;
    let temp_path = temp_file.into_temp_path();

    let status = Command::new(&editor)
        .arg(&temp_path)
        .status()
        .with_context(|| format!("Failed to launch editor: {}", editor))?;

    if status.success() {
        let edited = fs::read_to_string(&temp_path)?;
        app.set_selected_notes(edited.trim_end_matches('\n'))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::kv::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> AppState {
        AppState::new(Box::new(MemoryStore::new())).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.active_month_id, "heshvan-5787");
        handle_key(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.active_month_id, "tishrei-5787");
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.ui_mode = UiMode::Searching;
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_handle_toggle_day_and_chapter() {
        let mut app = create_test_app();
        for _ in 0..3 {
            handle_key(&mut app, key(KeyCode::Down)).unwrap();
        }

        handle_key(&mut app, key(KeyCode::Char('2'))).unwrap();
        let record = app.progress.get("tishrei-5787-4").unwrap();
        assert_eq!(record.chapter_progress, vec![false, true, false]);

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.progress.get("tishrei-5787-4").unwrap().completed);

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(!app.progress.get("tishrei-5787-4").unwrap().completed);
    }

    #[test]
    fn test_handle_search() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Searching);

        // 'q' is text while searching
        type_text(&mut app, "qמנין");
        assert_eq!(app.search_query, "qמנין");
        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.search_query, "qמני");

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_handle_mode_switch() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('m'))).unwrap();
        assert_eq!(app.study_mode, crate::domain::StudyMode::OneChapter);
    }

    #[test]
    fn test_handle_account_creation() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::CreatingAccount);

        type_text(&mut app, "Dina");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::AccountModal);
        assert_eq!(app.account.as_ref().unwrap().name, "Dina");

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert!(app.is_syncing());

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_import_prompt_cancel() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Dina");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        handle_key(&mut app, key(KeyCode::Char('i'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ImportingBackup);
        assert!(app.text_input.starts_with("rambam_backup_"));

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.text_input.is_empty());
    }
}
