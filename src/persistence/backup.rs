use super::kv::KeyValueStore;
use super::metadata::{load_account, save_account};
use super::store::progress_key;
use crate::domain::{StudyMode, UserAccount};
use crate::error::ShiurError;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Portable snapshot of everything a device has stored.
///
/// Progress blobs are carried verbatim as the strings found in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default)]
    pub account: Option<UserAccount>,
    #[serde(default)]
    pub progress3: Option<String>,
    #[serde(default)]
    pub progress1: Option<String>,
}

/// What an import actually overwrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub account: bool,
    pub progress3: bool,
    pub progress1: bool,
}

impl ImportSummary {
    pub fn is_empty(&self) -> bool {
        !(self.account || self.progress3 || self.progress1)
    }
}

pub fn export_backup(kv: &dyn KeyValueStore) -> Result<Backup> {
    Ok(Backup {
        account: load_account(kv),
        progress3: kv.get(&progress_key(StudyMode::ThreeChapters))?,
        progress1: kv.get(&progress_key(StudyMode::OneChapter))?,
    })
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("rambam_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Export to a file, pretty-printed
pub fn write_backup(kv: &dyn KeyValueStore, path: &Path) -> Result<()> {
    let backup = export_backup(kv)?;
    let json = serde_json::to_string_pretty(&backup).context("Failed to serialize backup")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write backup: {}", path.display()))?;
    log::info!("Exported backup to {}", path.display());
    Ok(())
}

/// Parse a backup document. Any malformed input is an `InvalidBackup`.
pub fn parse_backup(text: &str) -> Result<Backup, ShiurError> {
    Ok(serde_json::from_str(text)?)
}

/// Overwrite the stored account and progress blobs with a backup's contents.
///
/// Missing or empty entries leave the current value in place. The caller is
/// responsible for reloading any state it holds.
pub fn import_backup(kv: &mut dyn KeyValueStore, text: &str) -> Result<ImportSummary> {
    let backup = parse_backup(text)?;
    let mut summary = ImportSummary::default();

    if let Some(account) = &backup.account {
        save_account(kv, account)?;
        summary.account = true;
    }
    if let Some(blob) = backup.progress3.as_deref().filter(|b| !b.is_empty()) {
        kv.set(&progress_key(StudyMode::ThreeChapters), blob)?;
        summary.progress3 = true;
    }
    if let Some(blob) = backup.progress1.as_deref().filter(|b| !b.is_empty()) {
        kv.set(&progress_key(StudyMode::OneChapter), blob)?;
        summary.progress1 = true;
    }

    log::info!(
        "Imported backup (account: {}, 3-chapters: {}, 1-chapter: {})",
        summary.account,
        summary.progress3,
        summary.progress1
    );
    Ok(summary)
}
