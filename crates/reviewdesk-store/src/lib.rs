// ABOUTME: Persistence layer for reviewdesk, writing exports under the desk's home directory.
// ABOUTME: Provides agents.yaml export/import, workflow run records and generated report files.

pub mod manager;
pub mod record;

pub use manager::{AGENTS_FILE, REPORT_FILE, RUN_RECORD_FILE, StorageManager, StoreError};
pub use record::RunRecord;
