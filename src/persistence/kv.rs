use anyhow::Result;

/// Opaque string key-value storage behind every persisted blob.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
pub use memory::MemoryStore;
