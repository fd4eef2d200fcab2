use crate::domain::{
    display_date, load_schedule, resolve_today, HebrewDate, ProgressRecord, ProgressStore, ProgressSummary, Schedule,
    ScheduleDay, ScheduleMonth, StudyMode, TodayMarker, UiMode, UserAccount,
};
use crate::error::ShiurError;
use crate::persistence::{self, backup_file_name, ImportSummary, KeyValueStore};
use crate::ticker;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main application state
pub struct AppState {
    kv: Box<dyn KeyValueStore>,
    pub study_mode: StudyMode,
    pub schedule: Schedule,
    pub progress: ProgressStore,
    pub active_month_id: String,
    pub selected_index: usize,
    pub search_query: String,
    pub ui_mode: UiMode,

    // Today, once the date lookup has answered
    pub today_date: Option<HebrewDate>,
    pub today: Option<TodayMarker>,
    today_applied: bool,

    pub account: Option<UserAccount>,
    pub sync_started: Option<Instant>,

    // Shared text buffer for the account name and import path prompts
    pub text_input: String,
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Result<Self> {
        let study_mode = persistence::load_study_mode(kv.as_ref());
        let schedule = load_schedule(study_mode)?;
        let progress = persistence::load_progress(kv.as_ref(), study_mode);
        let account = persistence::load_account(kv.as_ref());
        let active_month_id = schedule.active_month(None).map(|m| m.id.clone()).unwrap_or_default();

        Ok(Self {
            kv,
            study_mode,
            schedule,
            progress,
            active_month_id,
            selected_index: 0,
            search_query: String::new(),
            ui_mode: UiMode::Normal,
            today_date: None,
            today: None,
            today_applied: false,
            account,
            sync_started: None,
            text_input: String::new(),
            notice: None,
        })
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    // ----- schedule access -----

    pub fn active_month(&self) -> Option<&ScheduleMonth> {
        self.schedule.active_month(Some(&self.active_month_id))
    }

    /// Days of the active month that pass the search filter
    pub fn visible_days(&self) -> Vec<&ScheduleDay> {
        self.active_month()
            .map(|month| month.filter_days(&self.search_query))
            .unwrap_or_default()
    }

    pub fn selected_day(&self) -> Option<&ScheduleDay> {
        self.visible_days().into_iter().nth(self.selected_index)
    }

    fn selected_day_id(&self) -> Option<String> {
        self.selected_day().map(|day| day.id.clone())
    }

    /// Reconciled progress of a day, as rendered
    pub fn day_progress(&self, day: &ScheduleDay) -> ProgressRecord {
        self.progress.view(day)
    }

    pub fn is_today(&self, day_id: &str) -> bool {
        self.today.as_ref().is_some_and(|marker| marker.day_id == day_id)
    }

    /// Display form of today's date, e.g. `ז׳ חשון ה'תשפ"ז`
    pub fn today_label(&self) -> Option<String> {
        self.today_date.as_ref().map(display_date)
    }

    pub fn summary(&self) -> ProgressSummary {
        self.progress.summary(&self.schedule)
    }

    // ----- navigation -----

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_days().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_days().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn next_month(&mut self) {
        self.shift_month(1);
    }

    pub fn previous_month(&mut self) {
        self.shift_month(-1);
    }

    fn shift_month(&mut self, delta: isize) {
        let current = self.schedule.month_index(&self.active_month_id).unwrap_or(0);
        let target = current as isize + delta;
        if target < 0 {
            return;
        }
        if let Some(month) = self.schedule.months().get(target as usize) {
            self.active_month_id = month.id.clone();
            self.selected_index = 0;
        }
    }

    // ----- progress mutations, persisted immediately -----

    /// Flip a whole day by id; false when the id is not scheduled
    pub fn toggle_day(&mut self, day_id: &str) -> Result<bool> {
        let changed = self.progress.toggle_whole_day(&self.schedule, day_id);
        if changed {
            self.save_progress()?;
        }
        Ok(changed)
    }

    /// Set one sub-unit (0-based); false when the day or index does not exist
    pub fn set_subunit(&mut self, day_id: &str, index: usize, done: bool) -> Result<bool> {
        let changed = self.progress.toggle_subunit(&self.schedule, day_id, index, done);
        if changed {
            self.save_progress()?;
        }
        Ok(changed)
    }

    pub fn set_notes(&mut self, day_id: &str, notes: &str) -> Result<bool> {
        let changed = self.progress.update_notes(&self.schedule, day_id, notes);
        if changed {
            self.save_progress()?;
        }
        Ok(changed)
    }

    pub fn toggle_selected_day(&mut self) -> Result<()> {
        if let Some(day_id) = self.selected_day_id() {
            self.toggle_day(&day_id)?;
        }
        Ok(())
    }

    /// Flip one sub-unit of the selected day (0-based)
    pub fn toggle_selected_subunit(&mut self, index: usize) -> Result<()> {
        let Some(day) = self.selected_day() else {
            return Ok(());
        };
        let day_id = day.id.clone();
        let done = self.progress.view(day).is_subunit_done(index);
        self.set_subunit(&day_id, index, !done)?;
        Ok(())
    }

    pub fn selected_notes(&self) -> String {
        self.selected_day()
            .and_then(|day| self.progress.get(&day.id))
            .map(|record| record.notes.clone())
            .unwrap_or_default()
    }

    pub fn set_selected_notes(&mut self, notes: &str) -> Result<()> {
        if let Some(day_id) = self.selected_day_id() {
            self.set_notes(&day_id, notes)?;
        }
        Ok(())
    }

    fn save_progress(&mut self) -> Result<()> {
        persistence::save_progress(self.kv.as_mut(), self.study_mode, &self.progress)
    }

    // ----- study mode and today -----

    /// Switch study mode: its own schedule, its own progress store
    pub fn set_study_mode(&mut self, mode: StudyMode) -> Result<()> {
        if mode == self.study_mode {
            return Ok(());
        }
        let schedule = load_schedule(mode)?;
        persistence::save_study_mode(self.kv.as_mut(), mode)?;

        self.study_mode = mode;
        self.schedule = schedule;
        self.progress = persistence::load_progress(self.kv.as_ref(), mode);
        if self.schedule.find_month(&self.active_month_id).is_none() {
            self.active_month_id = self.schedule.active_month(None).map(|m| m.id.clone()).unwrap_or_default();
        }
        self.selected_index = 0;
        self.resolve_today();
        self.clamp_selection();

        log::info!("Switched study mode to {}", mode.to_tag());
        Ok(())
    }

    pub fn toggle_study_mode(&mut self) -> Result<()> {
        self.set_study_mode(self.study_mode.other())
    }

    /// Apply the result of the background date lookup. Only the first call counts.
    pub fn apply_today_date(&mut self, date: Option<HebrewDate>) {
        if self.today_applied {
            return;
        }
        self.today_applied = true;

        let Some(date) = date else {
            log::warn!("Today's date is unavailable, no day will be highlighted");
            return;
        };
        self.today_date = Some(date);
        self.resolve_today();
        self.jump_to_today();
    }

    fn resolve_today(&mut self) {
        self.today = self
            .today_date
            .as_ref()
            .and_then(|date| resolve_today(&self.schedule, date));
        if let Some(marker) = &self.today {
            self.active_month_id = marker.month_id.clone();
        }
    }

    /// Show today's month with today selected
    pub fn jump_to_today(&mut self) {
        let Some(marker) = self.today.clone() else {
            self.notice = Some("היום אינו מופיע בלוח".to_string());
            return;
        };
        let Some(month) = self.schedule.find_month_containing(&marker.day_id) else {
            return;
        };
        self.active_month_id = month.id.clone();
        self.search_query.clear();
        self.selected_index = self
            .visible_days()
            .iter()
            .position(|day| day.id == marker.day_id)
            .unwrap_or(0);
    }

    // ----- search -----

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_push(&mut self, c: char) {
        self.search_query.push(c);
        self.selected_index = 0;
    }

    pub fn search_backspace(&mut self) {
        self.search_query.pop();
        self.selected_index = 0;
    }

    /// Leave the search line, keeping the filter
    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.ui_mode = UiMode::Normal;
        self.selected_index = 0;
    }

    // ----- account, sync and backups -----

    pub fn open_account_modal(&mut self) {
        self.text_input.clear();
        self.ui_mode = if self.account.is_some() {
            UiMode::AccountModal
        } else {
            UiMode::CreatingAccount
        };
    }

    pub fn close_modal(&mut self) {
        self.text_input.clear();
        self.ui_mode = UiMode::Normal;
    }

    pub fn input_push(&mut self, c: char) {
        self.text_input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.text_input.pop();
    }

    /// Create and store a new local account
    pub fn create_account(&mut self, name: &str) -> Result<&UserAccount> {
        let account = UserAccount::create(name)?;
        persistence::save_account(self.kv.as_mut(), &account)?;
        log::info!("Created account {}", account.sync_id);
        Ok(self.account.insert(account))
    }

    /// Create the account from the name prompt. A blank name keeps the prompt open.
    pub fn submit_account(&mut self) -> Result<()> {
        let name = self.text_input.clone();
        if let Err(e) = self.create_account(&name).map(|_| ()) {
            if matches!(e.downcast_ref::<ShiurError>(), Some(ShiurError::EmptyAccountName)) {
                self.notice = Some("יש להזין שם".to_string());
                return Ok(());
            }
            return Err(e);
        }
        self.text_input.clear();
        self.ui_mode = UiMode::AccountModal;
        Ok(())
    }

    pub fn is_syncing(&self) -> bool {
        self.sync_started.is_some()
    }

    /// Begin the cosmetic sync; ignored while one is running or without an account
    pub fn start_sync(&mut self, now: Instant) {
        if self.account.is_some() && self.sync_started.is_none() {
            self.sync_started = Some(now);
        }
    }

    /// Finish a pending sync once its delay has elapsed
    pub fn check_sync(&mut self, now: Instant) -> Result<()> {
        let Some(started) = self.sync_started else {
            return Ok(());
        };
        if ticker::sync_due(started, now) {
            self.sync_started = None;
            self.finish_sync()?;
        }
        Ok(())
    }

    /// Refresh the account's last-sync time. Nothing leaves the device.
    pub fn finish_sync(&mut self) -> Result<()> {
        if let Some(account) = self.account.as_mut() {
            account.mark_synced();
            persistence::save_account(self.kv.as_mut(), account)?;
            self.notice = Some(format!("סונכרן: {}", account.last_sync));
        }
        Ok(())
    }

    /// Write a backup file named after `date` into `dir`
    pub fn export_backup(&mut self, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        let path = dir.join(backup_file_name(date));
        persistence::write_backup(self.kv.as_ref(), &path)?;
        self.notice = Some(format!("גיבוי נשמר: {}", path.display()));
        Ok(path)
    }

    pub fn start_import(&mut self, date: NaiveDate) {
        self.text_input = backup_file_name(date);
        self.ui_mode = UiMode::ImportingBackup;
    }

    /// Import the backup named in the path prompt and reload stored state.
    ///
    /// An unreadable or invalid file leaves everything as it was and only
    /// reports the problem.
    pub fn submit_import(&mut self) -> Result<()> {
        let path = PathBuf::from(self.text_input.trim());
        match self.import_from(&path) {
            Ok(_) => {
                self.notice = Some("הגיבוי נטען".to_string());
                self.close_modal();
            }
            Err(e) => {
                log::warn!("Import from {} failed: {:#}", path.display(), e);
                self.notice = Some("קובץ לא תקין".to_string());
            }
        }
        Ok(())
    }

    pub fn import_from(&mut self, path: &Path) -> Result<ImportSummary> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read backup: {}", path.display()))?;
        let summary = persistence::import_backup(self.kv.as_mut(), &text)?;
        self.reload();
        Ok(summary)
    }

    /// Re-read progress and account after the store changed underneath us
    fn reload(&mut self) {
        self.progress = persistence::load_progress(self.kv.as_ref(), self.study_mode);
        self.account = persistence::load_account(self.kv.as_ref());
        self.clamp_selection();
    }
}
