use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::diary::models::{DiaryEntry, NewDiaryEntry};
use crate::error::{AppError, AppResult};

/// Durable collection of diary entries.
///
/// Implementations own identifier assignment: every successful `create`
/// hands out an id that has never been used before.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn create(&self, entry: NewDiaryEntry) -> AppResult<DiaryEntry>;

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<DiaryEntry>>;

    async fn find_all(&self) -> AppResult<Vec<DiaryEntry>>;

    async fn count(&self) -> AppResult<i64>;

    /// Removes every entry. Only test setup calls this.
    async fn delete_all(&self) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct PgEntryStore {
    db: PgPool,
}

impl PgEntryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn create(&self, entry: NewDiaryEntry) -> AppResult<DiaryEntry> {
        let entry = entry.validate()?;

        sqlx::query_as::<_, DiaryEntry>(
            r#"
            INSERT INTO diary_entries (name, points, quantity, entry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, points, quantity, entry_date
            "#,
        )
        .bind(&entry.name)
        .bind(entry.points)
        .bind(entry.quantity)
        .bind(entry.date)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            tracing::error!(
                query = "INSERT INTO diary_entries ... RETURNING *",
                error = %e,
                date  = %entry.date,
                "DB error creating diary entry"
            );
            AppError::from(e)
        })
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<DiaryEntry>> {
        sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT id, name, points, quantity, entry_date
            FROM diary_entries
            WHERE entry_date = $1
            ORDER BY id
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            tracing::error!(
                query = "SELECT ... FROM diary_entries WHERE entry_date = ?",
                error = %e,
                date  = %date,
                "DB error listing diary entries"
            );
            AppError::from(e)
        })
    }

    async fn find_all(&self) -> AppResult<Vec<DiaryEntry>> {
        sqlx::query_as::<_, DiaryEntry>(
            "SELECT id, name, points, quantity, entry_date FROM diary_entries ORDER BY id",
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "DB error loading all diary entries");
            AppError::from(e)
        })
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM diary_entries")
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "DB error counting diary entries");
                AppError::from(e)
            })
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM diary_entries")
            .execute(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "DB error clearing diary entries");
                AppError::from(e)
            })?;

        Ok(result.rows_affected())
    }
}

#[derive(Debug, Default)]
struct MemoryTable {
    rows: Vec<DiaryEntry>,
    last_id: i64,
}

/// In-process store. Each instance is isolated, which makes it the
/// per-test backend for the HTTP tests.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    table: RwLock<MemoryTable>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn create(&self, entry: NewDiaryEntry) -> AppResult<DiaryEntry> {
        let entry = entry.validate()?;

        let mut table = self.table.write().await;
        table.last_id += 1;
        let stored = entry.with_id(table.last_id);
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<DiaryEntry>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<DiaryEntry>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.table.read().await.rows.len() as i64)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut table = self.table.write().await;
        let removed = table.rows.len() as u64;
        // last_id is kept so ids are never handed out twice
        table.rows.clear();
        Ok(removed)
    }
}
