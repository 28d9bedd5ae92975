//! Sales totals grouped by region, product and date.
//!
//! Aggregates are always computed over the full record set, never over the
//! filtered rows, in a single pass. Buckets appear on first occurrence; the
//! date series is kept in ascending chronological order.

use crate::record::SaleRecord;
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Summed amounts keyed by text, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `amount` into `key`, creating the bucket if needed.
    pub fn add(&mut self, key: &str, amount: f64) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += amount,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    /// Entries ordered by key, for presentation.
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Serialize for Series {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The three derived series shown by the analytics charts.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Aggregates {
    pub by_region: Series,
    pub by_product: Series,
    pub by_date: BTreeMap<NaiveDate, f64>,
}

impl Aggregates {
    /// Single pass over the master record set.
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SaleRecord>,
    {
        let mut aggregates = Aggregates::default();
        for record in records {
            aggregates.by_region.add(record.region(), record.sales());
            aggregates.by_product.add(record.product(), record.sales());
            *aggregates.by_date.entry(record.date()).or_insert(0.0) += record.sales();
        }
        aggregates
    }

    pub fn date_total(&self) -> f64 {
        self.by_date.values().sum()
    }

    /// Chart-ready datasets: pie by region, bar by product, line by date.
    pub fn charts(&self) -> Vec<ChartSeries> {
        vec![
            ChartSeries {
                kind: ChartKind::Pie,
                title: "By Region".to_string(),
                labels: self.by_region.keys().map(str::to_string).collect(),
                values: self.by_region.values().collect(),
            },
            ChartSeries {
                kind: ChartKind::Bar,
                title: "By Product".to_string(),
                labels: self.by_product.keys().map(str::to_string).collect(),
                values: self.by_product.values().collect(),
            },
            ChartSeries {
                kind: ChartKind::Line,
                title: "Daily Trend".to_string(),
                labels: self
                    .by_date
                    .keys()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .collect(),
                values: self.by_date.values().copied().collect(),
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

/// Labels and values of one chart.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Headline numbers over the master record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct Summary {
    pub total_sales: f64,
    pub orders: usize,
    pub average_sale: f64,
}

impl Summary {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SaleRecord>,
    {
        let mut total_sales = 0.0;
        let mut orders = 0;
        for record in records {
            total_sales += record.sales();
            orders += 1;
        }

        let average_sale = if orders > 0 {
            total_sales / orders as f64
        } else {
            0.0
        };

        Summary {
            total_sales,
            orders,
            average_sale,
        }
    }

    /// Average rounded to cents.
    pub fn average_sale_rounded(&self) -> f64 {
        (self.average_sale * 100.0).round() / 100.0
    }
}
