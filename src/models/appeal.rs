use super::appeal_status::AppealStatus;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;

/// One row of `appeal`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppealRecord {
    pub id: i64,
    pub clamp_id: i64, // ⇔ appeal.clamp_id → clamp_data.id
    pub appeal_date: NaiveDate,
    pub appeal_reason: String,
    pub appeal_status: AppealStatus,
    pub notes: Option<String>,
    pub created_at: String,
}

impl AppealRecord {
    pub fn date_str(&self) -> String {
        self.appeal_date.format("%Y-%m-%d").to_string()
    }

    pub fn notes_str(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

/// Appeal row joined with the clamp it disputes, for the listing page.
#[derive(Debug, Clone, Serialize)]
pub struct AppealWithClamp {
    pub appeal: AppealRecord,
    pub location: String,
    pub registration: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppeal {
    pub clamp_id: i64,
    pub appeal_date: NaiveDate,
    pub appeal_reason: String,
    pub appeal_status: AppealStatus,
    pub notes: Option<String>,
}

impl NewAppeal {
    /// New pending appeal dated `appeal_date`.
    pub fn new(clamp_id: i64, appeal_date: NaiveDate, appeal_reason: impl Into<String>) -> Self {
        Self {
            clamp_id,
            appeal_date,
            appeal_reason: appeal_reason.into(),
            appeal_status: AppealStatus::default(),
            notes: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.appeal_reason.trim().is_empty() {
            return Err(AppError::MissingField("appeal_reason"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppealPatch {
    pub clamp_id: Option<i64>,
    pub appeal_date: Option<NaiveDate>,
    pub appeal_reason: Option<String>,
    pub appeal_status: Option<AppealStatus>,
    pub notes: Option<Option<String>>,
}

impl AppealPatch {
    pub fn is_empty(&self) -> bool {
        *self == AppealPatch::default()
    }

    pub fn validate(&self) -> AppResult<()> {
        if matches!(&self.appeal_reason, Some(r) if r.trim().is_empty()) {
            return Err(AppError::MissingField("appeal_reason"));
        }
        Ok(())
    }
}

impl From<NewAppeal> for AppealPatch {
    fn from(a: NewAppeal) -> Self {
        Self {
            clamp_id: Some(a.clamp_id),
            appeal_date: Some(a.appeal_date),
            appeal_reason: Some(a.appeal_reason),
            appeal_status: Some(a.appeal_status),
            notes: Some(a.notes),
        }
    }
}
