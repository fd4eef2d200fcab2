use crate::error::ShiurError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SYNC_ID_LEN: usize = 8;

/// Local profile. The sync id is cosmetic: nothing is ever sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub name: String,
    pub sync_id: String,
    #[serde(default)]
    pub last_sync: String,
}

impl UserAccount {
    pub fn create(name: &str) -> Result<Self, ShiurError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShiurError::EmptyAccountName);
        }
        Ok(Self {
            name: name.to_string(),
            sync_id: generate_sync_id(),
            last_sync: sync_timestamp(),
        })
    }

    /// First letter of the name, used as the avatar
    pub fn initial(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }

    pub fn mark_synced(&mut self) {
        self.last_sync = sync_timestamp();
    }
}

fn generate_sync_id() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SYNC_ID_LEN)
        .collect::<String>()
        .to_uppercase()
}

fn sync_timestamp() -> String {
    Local::now().format("%d.%m.%Y, %H:%M:%S").to_string()
}
