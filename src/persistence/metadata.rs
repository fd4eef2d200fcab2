use super::kv::KeyValueStore;
use crate::domain::{StudyMode, UserAccount};
use anyhow::Result;

pub const STUDY_MODE_KEY: &str = "rambam_study_mode_v3";
pub const ACCOUNT_KEY: &str = "rambam_account";

/// Load the selected study mode, defaulting to three chapters a day
pub fn load_study_mode(kv: &dyn KeyValueStore) -> StudyMode {
    match kv.get(STUDY_MODE_KEY) {
        Ok(Some(tag)) => StudyMode::from_tag(&tag).unwrap_or_else(|e| {
            log::warn!("Ignoring stored study mode: {}", e);
            StudyMode::default()
        }),
        Ok(None) => StudyMode::default(),
        Err(e) => {
            log::warn!("Failed to read study mode: {:#}", e);
            StudyMode::default()
        }
    }
}

pub fn save_study_mode(kv: &mut dyn KeyValueStore, mode: StudyMode) -> Result<()> {
    kv.set(STUDY_MODE_KEY, mode.to_tag())
}

/// Load the local account, None when absent or unreadable
pub fn load_account(kv: &dyn KeyValueStore) -> Option<UserAccount> {
    let raw = match kv.get(ACCOUNT_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("Failed to read account: {:#}", e);
            return None;
        }
    };
    match serde_json::from_str::<Option<UserAccount>>(&raw) {
        Ok(account) => account,
        Err(e) => {
            log::warn!("Ignoring unparseable account record: {}", e);
            None
        }
    }
}

pub fn save_account(kv: &mut dyn KeyValueStore, account: &UserAccount) -> Result<()> {
    let json = serde_json::to_string(account)?;
    kv.set(ACCOUNT_KEY, &json)
}
