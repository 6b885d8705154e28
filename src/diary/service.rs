use chrono::NaiveDate;
use std::sync::Arc;

use crate::diary::models::{DiaryEntry, EntriesForDate, NewDiaryEntry};
use crate::diary::store::EntryStore;
use crate::error::AppResult;

/// Date-scoped aggregation over an [`EntryStore`].
#[derive(Clone)]
pub struct DiaryService {
    store: Arc<dyn EntryStore>,
}

impl DiaryService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn EntryStore> {
        &self.store
    }

    pub async fn create_entry(&self, entry: NewDiaryEntry) -> AppResult<DiaryEntry> {
        self.store.create(entry).await
    }

    pub async fn get_for_date(&self, date: NaiveDate) -> AppResult<EntriesForDate> {
        let entries = self.store.find_by_date(date).await?;
        let total_points = total_points(&entries);

        Ok(EntriesForDate {
            entries,
            total_points,
        })
    }
}

/// Sum of `points` over the entries. Quantity is deliberately not a factor.
pub fn total_points(entries: &[DiaryEntry]) -> f64 {
    entries.iter().map(|e| e.points).sum()
}
