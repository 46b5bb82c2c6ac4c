//! Form input → typed record fields.
//!
//! Browsers submit every field as a string. Parsing happens here, before any
//! store access, so a malformed submission never reaches the database.

use crate::errors::{AppError, AppResult};
use crate::models::{AppealPatch, AppealStatus, ClampPatch, NewAppeal, NewClamp, PaymentStatus};
use crate::utils::date::{parse_date, today};
use crate::utils::time::{parse_optional_time, parse_time};
use serde::Deserialize;

fn required<'a>(value: &'a str, field: &'static str) -> AppResult<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        Err(AppError::MissingField(field))
    } else {
        Ok(v)
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|s| s.trim().to_string())
}

/// Fields of the add/edit clamp forms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClampForm {
    pub location: String,
    pub registration: String,
    pub clamp_date: String,
    pub time_in: String,
    pub time_released: String,
    pub offense: String,
    pub payment_status: String,

    // Only present on forms that expose the extra vehicle fields.
    pub image_path: Option<String>,
    pub time_called: Option<String>,
    pub car_type: Option<String>,
    pub color: Option<String>,
    pub clamp_reference: Option<String>,
}

impl ClampForm {
    pub fn parse(&self) -> AppResult<NewClamp> {
        let location = required(&self.location, "location")?;
        let date_str = required(&self.clamp_date, "clamp_date")?;
        let clamp_date =
            parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.to_string()))?;
        let time_in_str = required(&self.time_in, "time_in")?;
        let time_in =
            parse_time(time_in_str).ok_or_else(|| AppError::InvalidTime(time_in_str.to_string()))?;
        let time_released = parse_optional_time(Some(self.time_released.as_str()))?;
        let offense = required(&self.offense, "offense")?;

        let payment_status = match self.payment_status.trim() {
            "" => PaymentStatus::default(),
            s => PaymentStatus::from_input(s)
                .ok_or_else(|| AppError::InvalidPaymentStatus(s.to_string()))?,
        };

        Ok(NewClamp {
            location: location.to_string(),
            registration: self.registration.trim().to_string(),
            clamp_date,
            time_in,
            time_released,
            offense: offense.to_string(),
            payment_status,
            image_path: optional(&self.image_path).unwrap_or_default(),
            time_called: optional(&self.time_called).unwrap_or_default(),
            car_type: optional(&self.car_type).unwrap_or_default(),
            color: optional(&self.color).unwrap_or_default(),
            clamp_reference: optional(&self.clamp_reference).unwrap_or_default(),
        })
    }

    /// Full overwrite of the submitted fields; extra fields the form did not
    /// carry keep their stored value.
    pub fn to_patch(&self) -> AppResult<ClampPatch> {
        let parsed = self.parse()?;
        Ok(ClampPatch {
            image_path: optional(&self.image_path),
            time_called: optional(&self.time_called),
            car_type: optional(&self.car_type),
            color: optional(&self.color),
            clamp_reference: optional(&self.clamp_reference),
            ..ClampPatch::from(parsed)
        })
    }
}

/// Fields of the add/edit appeal forms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppealForm {
    pub clamp_id: String,
    pub appeal_date: String,
    pub appeal_reason: String,
    pub appeal_status: String,
    pub notes: String,
}

impl AppealForm {
    pub fn parse(&self) -> AppResult<NewAppeal> {
        let id_str = required(&self.clamp_id, "clamp_id")?;
        let clamp_id = parse_id(id_str)?;

        let appeal_date = match self.appeal_date.trim() {
            "" => today(),
            s => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
        };

        let appeal_reason = required(&self.appeal_reason, "appeal_reason")?;

        let appeal_status = match self.appeal_status.trim() {
            "" => AppealStatus::default(),
            s => AppealStatus::from_input(s)
                .ok_or_else(|| AppError::InvalidAppealStatus(s.to_string()))?,
        };

        let notes = match self.notes.trim() {
            "" => None,
            n => Some(n.to_string()),
        };

        Ok(NewAppeal {
            clamp_id,
            appeal_date,
            appeal_reason: appeal_reason.to_string(),
            appeal_status,
            notes,
        })
    }

    pub fn to_patch(&self) -> AppResult<AppealPatch> {
        Ok(AppealPatch::from(self.parse()?))
    }
}

/// Parse a positive record id.
pub fn parse_id(s: &str) -> AppResult<i64> {
    match s.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidId(s.to_string())),
    }
}
