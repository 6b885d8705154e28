use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use chrono::NaiveDate;

use crate::diary::models::{check_date_range, NewDiaryEntry};
use crate::error::AppError;

/// `{year}/{month}/{day}` path segments parsed into a calendar date.
///
/// Anything that is not a real date is a 400, never a 404 or 422.
#[derive(Debug, Clone, Copy)]
pub struct DatePath(pub NaiveDate);

impl<S> FromRequestParts<S> for DatePath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((year, month, day)) =
            Path::<(String, String, String)>::from_request_parts(parts, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;

        parse_date(&year, &month, &day).map(DatePath)
    }
}

pub fn parse_date(year: &str, month: &str, day: &str) -> Result<NaiveDate, AppError> {
    let year: i32 = year
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid year: {year}")))?;
    let month: u32 = month
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid month: {month}")))?;
    let day: u32 = day
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid day: {day}")))?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        AppError::validation(format!("Not a calendar date: {year}-{month}-{day}"))
    })?;

    check_date_range(date)
}

/// JSON body for entry creation. Malformed JSON is reported as a 400.
#[derive(Debug)]
pub struct EntryPayload(pub NewDiaryEntry);

impl<S> FromRequest<S> for EntryPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(entry) = Json::<NewDiaryEntry>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(error = %rejection.body_text(), "Rejected diary entry payload");
                AppError::validation(rejection.body_text())
            })?;

        Ok(EntryPayload(entry))
    }
}
