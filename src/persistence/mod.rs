pub mod backup;
pub mod files;
pub mod kv;
pub mod metadata;
pub mod store;

pub use backup::{backup_file_name, import_backup, write_backup, ImportSummary};
pub use files::{init_local_shiur_dir, log_file, FileStore};
pub use kv::KeyValueStore;
pub use metadata::{load_account, load_study_mode, save_account, save_study_mode};
pub use store::{load_progress, save_progress};
