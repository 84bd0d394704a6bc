/*
[INPUT]:  Public API exports for taskboard-sync crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod notice;
pub mod render;
pub mod state;
pub mod view;

// Re-export main types for convenience
pub use api::TaskApi;
pub use config::SyncConfig;
pub use controller::{SyncError, TaskSyncController};
pub use debounce::Debouncer;
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use state::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use view::{TaskForm, TaskView};
