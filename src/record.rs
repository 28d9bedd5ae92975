//! SalesView Record Model
//!
//! A `SaleRecord` is one sale transaction: a calendar date, a region, a product
//! and a non-negative amount. Records are identified by an immutable `RecordId`
//! assigned when the record enters the store; all other attributes can only be
//! replaced wholesale.
//!
//! `Field` names the four columns of a record and `FieldValue` is a borrowed,
//! typed view of one cell, used by the filter and sort passes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, unique identity of a sale record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random identity.
    pub fn new() -> Self {
        RecordId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(RecordId)
    }
}

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
}

/// The columns of a sale record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Date,
    Region,
    Product,
    Sales,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 4] = [Field::Date, Field::Region, Field::Product, Field::Sales];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Region => "region",
            Field::Product => "product",
            Field::Sales => "sales",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Date => FieldType::Date,
            Field::Region | Field::Product => FieldType::Text,
            Field::Sales => FieldType::Number,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Field::Date),
            "region" => Ok(Field::Region),
            "product" => Ok(Field::Product),
            "sales" => Ok(Field::Sales),
            other => Err(format!(
                "Unknown field: '{}'. Use 'date', 'region', 'product' or 'sales'",
                other
            )),
        }
    }
}

/// Borrowed, typed value of a single record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
}

impl<'a> FieldValue<'a> {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Date(_) => FieldType::Date,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Text rendering used by the global search.
    ///
    /// Dates render as ISO `YYYY-MM-DD`; whole amounts render without a
    /// fractional part (`120`, not `120.0`).
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(v) => (*v).to_string(),
            FieldValue::Number(v) => v.to_string(),
            FieldValue::Date(v) => v.format("%Y-%m-%d").to_string(),
        }
    }
}

/// One stored sale transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    id: RecordId,
    date: NaiveDate,
    region: String,
    product: String,
    sales: f64,
}

impl SaleRecord {
    /// Builds a record from already validated parts. Only the record store
    /// mints records, so identities stay unique.
    pub(crate) fn new(id: RecordId, date: NaiveDate, region: String, product: String, sales: f64) -> Self {
        SaleRecord {
            id,
            date,
            region,
            product,
            sales,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn sales(&self) -> f64 {
        self.sales
    }

    /// Typed value of the given field.
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Date => FieldValue::Date(self.date),
            Field::Region => FieldValue::Text(&self.region),
            Field::Product => FieldValue::Text(&self.product),
            Field::Sales => FieldValue::Number(self.sales),
        }
    }
}

/// Unvalidated input collected by the record editor.
///
/// Every attribute may be missing or malformed; `validation::validate` turns
/// a candidate into a `ValidSale` or a list of field errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleCandidate {
    pub date: Option<String>,
    pub region: String,
    pub product: String,
    pub sales: Option<f64>,
}

impl SaleCandidate {
    pub fn new(date: impl Into<String>, region: impl Into<String>, product: impl Into<String>, sales: f64) -> Self {
        SaleCandidate {
            date: Some(date.into()),
            region: region.into(),
            product: product.into(),
            sales: Some(sales),
        }
    }
}
