//! Row predicates for the sales table.
//!
//! A `FilterSet` holds one `FieldFilter` per record field plus a global search
//! text. Each `FieldFilter` is a list of `Constraint`s joined by a
//! `FilterOperator`:
//!
//! - `date`:    AND [date-is]
//! - `region`:  OR  [equals]
//! - `product`: OR  [equals]
//! - `sales`:   AND [greater-than]
//!
//! A constraint without an operand matches everything, so the default set is
//! a no-op and there is no separate "absent filter" state.

use crate::record::{Field, FieldType, FieldValue, SaleRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a constraint compares a field value with its operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    /// Substring test
    Contains,
    /// Prefix test
    StartsWith,
    /// Exact equality
    Equals,
    /// Membership in a set of acceptable values
    In,
    /// Numeric strictly-greater comparison
    GreaterThan,
    /// Same calendar day
    DateIs,
}

/// How several constraints on one field combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Every active constraint must pass
    #[default]
    And,
    /// At least one active constraint must pass
    Or,
}

/// Value a constraint compares against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Set(Vec<Operand>),
}

impl Operand {
    pub fn text(value: impl Into<String>) -> Self {
        Operand::Text(value.into())
    }

    pub fn set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        Operand::Set(values.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Text(_) => "text",
            Operand::Number(_) => "number",
            Operand::Date(_) => "date",
            Operand::Set(_) => "set",
        }
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Text(value)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

impl From<NaiveDate> for Operand {
    fn from(value: NaiveDate) -> Self {
        Operand::Date(value)
    }
}

/// Raised when an operand cannot be compared with a field's values.
///
/// The filter pass never propagates this: a mismatched constraint simply
/// does not match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("{mode:?} with a {operand} operand does not apply to {field} ({expected:?})")]
    OperandTypeMismatch {
        field: Field,
        mode: MatchMode,
        expected: FieldType,
        operand: &'static str,
    },
}

/// A single match condition on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub value: Option<Operand>,
    pub match_mode: MatchMode,
}

impl Constraint {
    /// A constraint with no operand (matches everything).
    pub fn inactive(match_mode: MatchMode) -> Self {
        Constraint {
            value: None,
            match_mode,
        }
    }

    pub fn new(match_mode: MatchMode, value: impl Into<Operand>) -> Self {
        Constraint {
            value: Some(value.into()),
            match_mode,
        }
    }

    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }

    /// Test a field value against this constraint.
    pub fn evaluate(&self, field: Field, value: FieldValue<'_>) -> Result<bool, FilterError> {
        match &self.value {
            None => Ok(true),
            Some(operand) => evaluate_operand(field, self.match_mode, operand, value),
        }
    }
}

fn evaluate_operand(
    field: Field,
    mode: MatchMode,
    operand: &Operand,
    value: FieldValue<'_>,
) -> Result<bool, FilterError> {
    let mismatch = || FilterError::OperandTypeMismatch {
        field,
        mode,
        expected: field.field_type(),
        operand: operand.kind(),
    };

    match (mode, operand, value) {
        (MatchMode::Contains, Operand::Text(op), FieldValue::Text(v)) => Ok(v.contains(op.as_str())),
        (MatchMode::StartsWith, Operand::Text(op), FieldValue::Text(v)) => Ok(v.starts_with(op.as_str())),

        (MatchMode::Equals, Operand::Text(op), FieldValue::Text(v)) => Ok(v == op),
        (MatchMode::Equals, Operand::Number(op), FieldValue::Number(v)) => Ok(v == *op),
        (MatchMode::Equals | MatchMode::DateIs, Operand::Date(op), FieldValue::Date(v)) => Ok(v == *op),

        (MatchMode::GreaterThan, Operand::Number(op), FieldValue::Number(v)) => Ok(v > *op),

        // An empty set places no restriction
        (MatchMode::In, Operand::Set(items), _) if items.is_empty() => Ok(true),
        (MatchMode::In, Operand::Set(items), _) => {
            let mut found = false;
            for item in items {
                if evaluate_operand(field, MatchMode::Equals, item, value)? {
                    found = true;
                }
            }
            Ok(found)
        }
        // A bare value acts as a one-element set
        (MatchMode::In, single, _) => evaluate_operand(field, MatchMode::Equals, single, value),

        _ => Err(mismatch()),
    }
}

/// Constraints on one field and the operator joining them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub operator: FilterOperator,
    pub constraints: Vec<Constraint>,
}

impl FieldFilter {
    pub fn new(operator: FilterOperator, constraints: Vec<Constraint>) -> Self {
        FieldFilter {
            operator,
            constraints,
        }
    }

    /// Single-constraint filter
    pub fn single(match_mode: MatchMode, value: impl Into<Operand>) -> Self {
        FieldFilter::new(FilterOperator::And, vec![Constraint::new(match_mode, value)])
    }

    /// The no-op filter a field starts with.
    pub fn default_for(field: Field) -> Self {
        let (operator, mode) = match field {
            Field::Date => (FilterOperator::And, MatchMode::DateIs),
            Field::Region | Field::Product => (FilterOperator::Or, MatchMode::Equals),
            Field::Sales => (FilterOperator::And, MatchMode::GreaterThan),
        };
        FieldFilter::new(operator, vec![Constraint::inactive(mode)])
    }

    pub fn is_active(&self) -> bool {
        self.constraints.iter().any(Constraint::is_active)
    }

    /// Whether `value` passes. Constraints without an operand are skipped;
    /// a constraint whose operand does not fit the field counts as failed.
    pub fn matches(&self, field: Field, value: FieldValue<'_>) -> bool {
        let mut active = self.constraints.iter().filter(|c| c.is_active()).peekable();
        if active.peek().is_none() {
            return true;
        }

        let mut outcome = active.map(|constraint| {
            constraint.evaluate(field, value).unwrap_or_else(|err| {
                log::trace!("treating constraint as no match: {}", err);
                false
            })
        });

        match self.operator {
            FilterOperator::And => outcome.all(|passed| passed),
            FilterOperator::Or => outcome.any(|passed| passed),
        }
    }
}

/// The complete predicate state of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    /// Global search text; empty means inactive.
    pub global: String,
    date: FieldFilter,
    region: FieldFilter,
    product: FieldFilter,
    sales: FieldFilter,
}

impl Default for FilterSet {
    fn default() -> Self {
        FilterSet {
            global: String::new(),
            date: FieldFilter::default_for(Field::Date),
            region: FieldFilter::default_for(Field::Region),
            product: FieldFilter::default_for(Field::Product),
            sales: FieldFilter::default_for(Field::Sales),
        }
    }
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &FieldFilter {
        match field {
            Field::Date => &self.date,
            Field::Region => &self.region,
            Field::Product => &self.product,
            Field::Sales => &self.sales,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut FieldFilter {
        match field {
            Field::Date => &mut self.date,
            Field::Region => &mut self.region,
            Field::Product => &mut self.product,
            Field::Sales => &mut self.sales,
        }
    }

    /// Replace the filter of one field. An empty constraint list is replaced
    /// by the field's no-op constraint.
    pub fn set(&mut self, field: Field, mut filter: FieldFilter) {
        if filter.constraints.is_empty() {
            filter.constraints = FieldFilter::default_for(field).constraints;
        }
        *self.get_mut(field) = filter;
    }

    /// Returns true if neither the global text nor any field constraint is set
    pub fn is_noop(&self) -> bool {
        self.global.is_empty() && Field::ALL.iter().all(|f| !self.get(*f).is_active())
    }

    /// Global search over the given fields.
    pub fn matches_global(&self, record: &SaleRecord, fields: &[Field], case_sensitive: bool) -> bool {
        if self.global.is_empty() {
            return true;
        }

        if case_sensitive {
            fields
                .iter()
                .any(|f| record.value(*f).to_text().contains(self.global.as_str()))
        } else {
            let needle = self.global.to_lowercase();
            fields
                .iter()
                .any(|f| record.value(*f).to_text().to_lowercase().contains(&needle))
        }
    }

    /// Full visibility test: global search and every field filter.
    pub fn matches(&self, record: &SaleRecord, global_fields: &[Field], case_sensitive: bool) -> bool {
        self.matches_global(record, global_fields, case_sensitive)
            && Field::ALL
                .iter()
                .all(|field| self.get(*field).matches(*field, record.value(*field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;

    fn record(date: (i32, u32, u32), region: &str, product: &str, sales: f64) -> SaleRecord {
        SaleRecord::new(
            RecordId::new(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            region.to_string(),
            product.to_string(),
            sales,
        )
    }

    const GLOBAL: [Field; 3] = [Field::Date, Field::Region, Field::Product];

    #[test]
    fn test_match_modes() {
        let text = FieldValue::Text("North America");
        assert!(Constraint::new(MatchMode::Contains, "th Am").evaluate(Field::Region, text).unwrap());
        assert!(Constraint::new(MatchMode::StartsWith, "North").evaluate(Field::Region, text).unwrap());
        assert!(!Constraint::new(MatchMode::StartsWith, "America").evaluate(Field::Region, text).unwrap());
        assert!(Constraint::new(MatchMode::Equals, "North America").evaluate(Field::Region, text).unwrap());
        assert!(!Constraint::new(MatchMode::Equals, "north america").evaluate(Field::Region, text).unwrap());

        let amount = FieldValue::Number(75.0);
        assert!(Constraint::new(MatchMode::GreaterThan, 60.0).evaluate(Field::Sales, amount).unwrap());
        assert!(!Constraint::new(MatchMode::GreaterThan, 75.0).evaluate(Field::Sales, amount).unwrap());
        assert!(Constraint::new(MatchMode::Equals, 75.0).evaluate(Field::Sales, amount).unwrap());

        let day = NaiveDate::from_ymd_opt(2025, 4, 26).unwrap();
        let date = FieldValue::Date(day);
        assert!(Constraint::new(MatchMode::DateIs, day).evaluate(Field::Date, date).unwrap());
        assert!(!Constraint::new(MatchMode::DateIs, day.succ_opt().unwrap())
            .evaluate(Field::Date, date)
            .unwrap());
    }

    #[test]
    fn test_in_mode() {
        let value = FieldValue::Text("Asia");
        let set = Constraint::new(MatchMode::In, Operand::set(["Europe", "Asia"]));
        assert!(set.evaluate(Field::Region, value).unwrap());

        let other = Constraint::new(MatchMode::In, Operand::set(["Europe"]));
        assert!(!other.evaluate(Field::Region, value).unwrap());

        let empty = Constraint::new(MatchMode::In, Operand::Set(Vec::new()));
        assert!(empty.evaluate(Field::Region, value).unwrap());

        let bare = Constraint::new(MatchMode::In, "Asia");
        assert!(bare.evaluate(Field::Region, value).unwrap());
    }

    #[test]
    fn test_null_operand_matches_everything() {
        let constraint = Constraint::inactive(MatchMode::Equals);
        assert!(constraint.evaluate(Field::Region, FieldValue::Text("anything")).unwrap());
        assert!(FieldFilter::default_for(Field::Sales).matches(Field::Sales, FieldValue::Number(0.0)));
    }

    #[test]
    fn test_operand_type_mismatch() {
        let constraint = Constraint::new(MatchMode::GreaterThan, "lots");
        let err = constraint.evaluate(Field::Sales, FieldValue::Number(10.0)).unwrap_err();
        assert_eq!(
            err,
            FilterError::OperandTypeMismatch {
                field: Field::Sales,
                mode: MatchMode::GreaterThan,
                expected: FieldType::Number,
                operand: "text",
            }
        );

        // The filter pass treats the mismatch as a non-match
        let filter = FieldFilter::new(FilterOperator::And, vec![constraint]);
        assert!(!filter.matches(Field::Sales, FieldValue::Number(10.0)));
    }

    #[test]
    fn test_and_or_operators() {
        let value = FieldValue::Number(50.0);
        let both = vec![
            Constraint::new(MatchMode::GreaterThan, 40.0),
            Constraint::new(MatchMode::GreaterThan, 60.0),
        ];

        let and = FieldFilter::new(FilterOperator::And, both.clone());
        assert!(!and.matches(Field::Sales, value));

        let or = FieldFilter::new(FilterOperator::Or, both);
        assert!(or.matches(Field::Sales, value));
    }

    #[test]
    fn test_inactive_constraints_are_skipped_in_or() {
        let filter = FieldFilter::new(
            FilterOperator::Or,
            vec![
                Constraint::inactive(MatchMode::Equals),
                Constraint::new(MatchMode::Equals, "Europe"),
            ],
        );
        assert!(filter.matches(Field::Region, FieldValue::Text("Europe")));
        assert!(!filter.matches(Field::Region, FieldValue::Text("Asia")));
    }

    #[test]
    fn test_global_search_case_insensitive() {
        let r = record((2025, 4, 25), "North America", "Laptop", 120.0);
        let mut filters = FilterSet::new();

        filters.global = "laptop".to_string();
        assert!(filters.matches(&r, &GLOBAL, false));
        assert!(!filters.matches(&r, &GLOBAL, true));

        filters.global = "2025-04-25".to_string();
        assert!(filters.matches(&r, &GLOBAL, false));

        // sales is not searched by default
        filters.global = "120".to_string();
        assert!(!filters.matches(&r, &GLOBAL, false));
        assert!(filters.matches(&r, &Field::ALL, false));
    }

    #[test]
    fn test_default_set_is_noop() {
        let filters = FilterSet::default();
        assert!(filters.is_noop());
        assert_eq!(filters.get(Field::Region).operator, FilterOperator::Or);
        assert_eq!(filters.get(Field::Date).constraints[0].match_mode, MatchMode::DateIs);
        assert_eq!(filters.get(Field::Sales).constraints[0].match_mode, MatchMode::GreaterThan);

        let r = record((2025, 4, 27), "Asia", "Camera", 60.0);
        assert!(filters.matches(&r, &GLOBAL, false));
    }

    #[test]
    fn test_set_with_no_constraints_restores_noop() {
        let mut filters = FilterSet::default();
        filters.set(Field::Region, FieldFilter::new(FilterOperator::And, Vec::new()));
        assert_eq!(filters.get(Field::Region).constraints.len(), 1);
        assert!(!filters.get(Field::Region).is_active());
    }

    #[test]
    fn test_filter_set_json_defaults_missing_fields() {
        let filters: FilterSet = serde_json::from_str(
            r#"{"global":"","region":{"operator":"or","constraints":[{"value":{"text":"Asia"},"match_mode":"equals"}]}}"#,
        )
        .unwrap();
        assert!(filters.get(Field::Region).is_active());
        assert!(!filters.get(Field::Sales).is_active());
        assert_eq!(filters.get(Field::Sales), &FieldFilter::default_for(Field::Sales));
    }
}
