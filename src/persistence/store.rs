use super::kv::KeyValueStore;
use crate::domain::{ProgressRecord, ProgressStore, StudyMode};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;

const PROGRESS_KEY_PREFIX: &str = "rambam_progress_v3_";

/// Storage key of a study mode's progress blob
pub fn progress_key(mode: StudyMode) -> String {
    format!("{}{}", PROGRESS_KEY_PREFIX, mode.to_tag())
}

/// Decode a persisted progress blob.
///
/// Anything that is not a JSON object decodes to an empty store; entries
/// whose value does not look like a progress record are dropped.
pub fn decode_progress(raw: &str) -> ProgressStore {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(entries)) => entries,
        Ok(_) => {
            log::warn!("Progress blob is not an object, starting empty");
            return ProgressStore::new();
        }
        Err(e) => {
            log::warn!("Unparseable progress blob, starting empty: {}", e);
            return ProgressStore::new();
        }
    };

    let mut records = BTreeMap::new();
    for (day_id, value) in entries {
        match serde_json::from_value::<ProgressRecord>(value) {
            Ok(record) => {
                records.insert(day_id, record);
            }
            Err(e) => log::warn!("Dropping progress for {}: {}", day_id, e),
        }
    }
    ProgressStore::from_records(records)
}

/// Load a study mode's progress; never fails, falls back to an empty store
pub fn load_progress(kv: &dyn KeyValueStore, mode: StudyMode) -> ProgressStore {
    match kv.get(&progress_key(mode)) {
        Ok(Some(raw)) if !raw.trim().is_empty() => decode_progress(&raw),
        Ok(_) => ProgressStore::new(),
        Err(e) => {
            log::warn!("Failed to read {} progress: {:#}", mode.to_tag(), e);
            ProgressStore::new()
        }
    }
}

/// Persist the whole store for a study mode
pub fn save_progress(kv: &mut dyn KeyValueStore, mode: StudyMode, store: &ProgressStore) -> Result<()> {
    let json = serde_json::to_string(store).context("Failed to serialize progress")?;
    kv.set(&progress_key(mode), &json)
        .with_context(|| format!("Failed to save {} progress", mode.to_tag()))
}
