//! Record editor validation.
//!
//! A `SaleCandidate` is checked against the fixed sale schema:
//! - `date`: present and parseable (ISO `YYYY-MM-DD`, `DD/MM/YYYY`, or an ISO
//!   timestamp whose time of day is dropped)
//! - `region`, `product`: not blank
//! - `sales`: present, finite, zero or greater
//!
//! Every offending field yields exactly one `ValidationError`.

use crate::record::{Field, SaleCandidate};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

/// Why a candidate field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    #[error("is required")]
    Missing,
    #[error("is not a valid date")]
    InvalidDate,
    #[error("must not be empty")]
    Empty,
    #[error("must be a finite number")]
    NotFinite,
    #[error("must be zero or greater")]
    Negative,
}

/// A field-level schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: Field, reason: ValidationReason) -> Self {
        ValidationError { field, reason }
    }
}

/// A candidate that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSale {
    pub date: NaiveDate,
    pub region: String,
    pub product: String,
    pub sales: f64,
}

/// Validate a candidate, collecting one error per invalid field.
///
/// # Examples
///
/// ```
/// use salesview::{validate, Field, SaleCandidate};
///
/// let ok = validate(&SaleCandidate::new("2025-04-28", "Asia", "Speaker", 50.0)).unwrap();
/// assert_eq!(ok.region, "Asia");
///
/// let errors = validate(&SaleCandidate::new("2025-04-28", "", "X", 10.0)).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].field, Field::Region);
/// ```
pub fn validate(candidate: &SaleCandidate) -> Result<ValidSale, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let date = match candidate.date.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(ValidationError::new(Field::Date, ValidationReason::Missing));
            None
        }
        Some(raw) => {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                errors.push(ValidationError::new(Field::Date, ValidationReason::InvalidDate));
            }
            parsed
        }
    };

    let region = candidate.region.trim();
    if region.is_empty() {
        errors.push(ValidationError::new(Field::Region, ValidationReason::Empty));
    }

    let product = candidate.product.trim();
    if product.is_empty() {
        errors.push(ValidationError::new(Field::Product, ValidationReason::Empty));
    }

    let sales = match candidate.sales {
        None => {
            errors.push(ValidationError::new(Field::Sales, ValidationReason::Missing));
            None
        }
        Some(v) if !v.is_finite() => {
            errors.push(ValidationError::new(Field::Sales, ValidationReason::NotFinite));
            None
        }
        Some(v) if v < 0.0 => {
            errors.push(ValidationError::new(Field::Sales, ValidationReason::Negative));
            None
        }
        Some(v) => Some(v),
    };

    match (date, sales) {
        (Some(date), Some(sales)) if errors.is_empty() => Ok(ValidSale {
            date,
            region: region.to_string(),
            product: product.to_string(),
            sales,
        }),
        _ => Err(errors),
    }
}

/// Parse a calendar date, discarding any time of day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    None
}
