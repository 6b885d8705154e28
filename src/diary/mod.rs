pub mod extract;
pub mod handlers;
pub mod models;
pub mod service;
pub mod store;

pub use models::{DiaryEntry, EntriesForDate, NewDiaryEntry};
pub use service::DiaryService;
pub use store::{EntryStore, MemoryEntryStore, PgEntryStore};
