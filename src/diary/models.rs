use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Years a diary date may fall in. Postgres `DATE` cannot hold every date
/// chrono can, so anything outside this window is rejected up front.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

pub fn check_date_range(date: NaiveDate) -> Result<NaiveDate, AppError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        Ok(date)
    } else {
        Err(AppError::validation(format!(
            "date must be between years {MIN_YEAR} and {MAX_YEAR}: {date}"
        )))
    }
}

/// A persisted food-diary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: i64,
    pub name: String,
    pub points: f64,
    pub quantity: i32,
    #[sqlx(rename = "entry_date")]
    pub date: NaiveDate,
}

/// Body of `POST /diary/api`. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiaryEntry {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub points: f64,
    pub quantity: i32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl NewDiaryEntry {
    pub fn new(name: impl Into<String>, points: f64, quantity: i32, date: NaiveDate) -> Self {
        NewDiaryEntry {
            id: None,
            name: name.into(),
            points,
            quantity,
            date: Some(date),
        }
    }

    /// Checks the entry invariants and drops the client-supplied id.
    pub fn validate(self) -> Result<ValidatedEntry, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        if self.name.contains('\0') {
            return Err(AppError::validation("name must not contain NUL characters"));
        }
        if self.quantity <= 0 {
            return Err(AppError::validation("quantity must be a positive integer"));
        }
        if !self.points.is_finite() || self.points < 0.0 {
            return Err(AppError::validation(
                "points must be a non-negative number",
            ));
        }
        let date = self
            .date
            .ok_or_else(|| AppError::validation("date is required"))?;
        let date = check_date_range(date)?;

        Ok(ValidatedEntry {
            name: self.name,
            points: self.points,
            quantity: self.quantity,
            date,
        })
    }
}

/// An entry that passed validation and has no identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    pub name: String,
    pub points: f64,
    pub quantity: i32,
    pub date: NaiveDate,
}

impl ValidatedEntry {
    pub fn with_id(self, id: i64) -> DiaryEntry {
        DiaryEntry {
            id,
            name: self.name,
            points: self.points,
            quantity: self.quantity,
            date: self.date,
        }
    }
}

/// Read model for `GET /diary/api/list/{year}/{month}/{day}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesForDate {
    pub entries: Vec<DiaryEntry>,
    pub total_points: f64,
}
