use super::payment_status::PaymentStatus;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One row of `clamp_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClampRecord {
    pub id: i64,
    pub location: String,                // ⇔ clamp_data.location (TEXT NOT NULL)
    pub registration: String,            // ⇔ clamp_data.registration (TEXT, default '')
    pub clamp_date: NaiveDate,           // ⇔ clamp_data.clamp_date ("YYYY-MM-DD")
    pub time_in: NaiveTime,              // ⇔ clamp_data.time_in ("HH:MM")
    pub time_released: Option<NaiveTime>, // NULL while the vehicle is still clamped
    pub offense: String,
    pub payment_status: PaymentStatus,
    pub created_at: String, // RFC 3339, set once at insert

    // Legacy fields, added to older stores by `add-clamp-fields`
    pub image_path: String,
    pub time_called: String,
    pub car_type: String,
    pub color: String,
    pub clamp_reference: String,
}

impl ClampRecord {
    pub fn date_str(&self) -> String {
        self.clamp_date.format("%Y-%m-%d").to_string()
    }

    pub fn time_in_str(&self) -> String {
        self.time_in.format("%H:%M").to_string()
    }

    /// Release time as `HH:MM`, or an empty string when still clamped.
    pub fn time_released_str(&self) -> String {
        self.time_released
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }

    pub fn is_released(&self) -> bool {
        self.time_released.is_some()
    }
}

/// Fields for a new clamp record. `id` and `created_at` are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClamp {
    pub location: String,
    pub registration: String,
    pub clamp_date: NaiveDate,
    pub time_in: NaiveTime,
    pub time_released: Option<NaiveTime>,
    pub offense: String,
    pub payment_status: PaymentStatus,
    pub image_path: String,
    pub time_called: String,
    pub car_type: String,
    pub color: String,
    pub clamp_reference: String,
}

impl NewClamp {
    /// Builder for the required fields; everything else takes its default.
    pub fn new(
        location: impl Into<String>,
        clamp_date: NaiveDate,
        time_in: NaiveTime,
        offense: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            registration: String::new(),
            clamp_date,
            time_in,
            time_released: None,
            offense: offense.into(),
            payment_status: PaymentStatus::default(),
            image_path: String::new(),
            time_called: String::new(),
            car_type: String::new(),
            color: String::new(),
            clamp_reference: String::new(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.location.trim().is_empty() {
            return Err(AppError::MissingField("location"));
        }
        if self.offense.trim().is_empty() {
            return Err(AppError::MissingField("offense"));
        }
        Ok(())
    }
}

/// Partial update for a clamp record: `None` leaves the column unchanged.
///
/// `time_released` is doubly optional so an edit can clear it back to NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClampPatch {
    pub location: Option<String>,
    pub registration: Option<String>,
    pub clamp_date: Option<NaiveDate>,
    pub time_in: Option<NaiveTime>,
    pub time_released: Option<Option<NaiveTime>>,
    pub offense: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub image_path: Option<String>,
    pub time_called: Option<String>,
    pub car_type: Option<String>,
    pub color: Option<String>,
    pub clamp_reference: Option<String>,
}

impl ClampPatch {
    pub fn is_empty(&self) -> bool {
        *self == ClampPatch::default()
    }

    pub fn validate(&self) -> AppResult<()> {
        if matches!(&self.location, Some(l) if l.trim().is_empty()) {
            return Err(AppError::MissingField("location"));
        }
        if matches!(&self.offense, Some(o) if o.trim().is_empty()) {
            return Err(AppError::MissingField("offense"));
        }
        Ok(())
    }
}

/// Every form-bearing field of a `NewClamp` becomes an overwrite.
impl From<NewClamp> for ClampPatch {
    fn from(c: NewClamp) -> Self {
        Self {
            location: Some(c.location),
            registration: Some(c.registration),
            clamp_date: Some(c.clamp_date),
            time_in: Some(c.time_in),
            time_released: Some(c.time_released),
            offense: Some(c.offense),
            payment_status: Some(c.payment_status),
            image_path: Some(c.image_path),
            time_called: Some(c.time_called),
            car_type: Some(c.car_type),
            color: Some(c.color),
            clamp_reference: Some(c.clamp_reference),
        }
    }
}

/// Single-field equality filters supported by `list_clamps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampFilter {
    PaymentStatus(PaymentStatus),
}

/// Minimal projection served by the JSON lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClampSummary {
    pub id: i64,
    pub location: String,
    pub registration: String,
}

impl From<&ClampRecord> for ClampSummary {
    fn from(c: &ClampRecord) -> Self {
        Self {
            id: c.id,
            location: c.location.clone(),
            registration: c.registration.clone(),
        }
    }
}
