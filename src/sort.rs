//! Multi-column sorting of visible rows.
//!
//! A `SortSpec` is an ordered list of `SortKey`s: the first key is primary and
//! each later key only decides between rows the earlier keys consider equal.
//! Sorting is stable, so rows equal under every key keep their input order.

use crate::record::{Field, FieldValue, SaleRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort order specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (smallest first)
    Ascending,
    /// Descending order (largest first)
    Descending,
}

/// A single sort key specifying a field and order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: Field,
    pub order: SortOrder,
}

impl SortKey {
    pub fn ascending(field: Field) -> Self {
        SortKey {
            field,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(field: Field) -> Self {
        SortKey {
            field,
            order: SortOrder::Descending,
        }
    }
}

/// Ordered list of sort keys; empty means insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        let mut spec = SortSpec::default();
        for key in keys {
            spec.push(key);
        }
        spec
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn order_of(&self, field: Field) -> Option<SortOrder> {
        self.keys.iter().find(|k| k.field == field).map(|k| k.order)
    }

    /// Add a key, replacing any existing key on the same field in place.
    pub fn push(&mut self, key: SortKey) {
        match self.keys.iter_mut().find(|k| k.field == key.field) {
            Some(existing) => existing.order = key.order,
            None => self.keys.push(key),
        }
    }

    /// Cycle a column: unsorted -> ascending -> descending -> unsorted.
    ///
    /// Newly sorted columns are appended as the lowest-priority key.
    pub fn toggle(&mut self, field: Field) {
        match self.keys.iter().position(|k| k.field == field) {
            None => self.keys.push(SortKey::ascending(field)),
            Some(pos) => match self.keys[pos].order {
                SortOrder::Ascending => self.keys[pos].order = SortOrder::Descending,
                SortOrder::Descending => {
                    self.keys.remove(pos);
                }
            },
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Compare two records under every key in priority order.
    pub fn compare(&self, a: &SaleRecord, b: &SaleRecord) -> Ordering {
        for key in &self.keys {
            let cmp = compare_values(a.value(key.field), b.value(key.field));
            let cmp = match key.order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            };
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    }

    /// Stable in-place sort of record positions.
    pub fn sort_positions(&self, positions: &mut [usize], records: &[SaleRecord]) {
        if self.keys.is_empty() {
            return;
        }
        positions.sort_by(|&a, &b| self.compare(&records[a], &records[b]));
    }
}

fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
        (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(&b),
        (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(&b),
        // Values of one field always share a type
        (a, b) => format!("{:?}", a).cmp(&format!("{:?}", b)),
    }
}
