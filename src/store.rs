//! Master record list.
//!
//! Records are kept in insertion order with an id -> position index. The store
//! is the only place record identities are minted, and records only leave it
//! through an explicit removal by id.

use crate::record::{Field, RecordId, SaleRecord};
use crate::validation::ValidSale;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<SaleRecord>,
    positions: HashMap<RecordId, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&SaleRecord> {
        self.positions.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Store a validated sale under a fresh identity.
    pub fn append(&mut self, sale: ValidSale) -> &SaleRecord {
        let mut id = RecordId::new();
        while self.positions.contains_key(&id) {
            id = RecordId::new();
        }

        let pos = self.records.len();
        self.records
            .push(SaleRecord::new(id, sale.date, sale.region, sale.product, sale.sales));
        self.positions.insert(id, pos);
        &self.records[pos]
    }

    /// Remove every record whose id is in `ids`, returning the removed
    /// records in their former order.
    pub fn remove_ids(&mut self, ids: &HashSet<RecordId>) -> Vec<SaleRecord> {
        if ids.is_empty() {
            return Vec::new();
        }

        let (removed, kept): (Vec<SaleRecord>, Vec<SaleRecord>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|record| ids.contains(&record.id()));

        self.records = kept;
        self.rebuild_positions();
        removed
    }

    /// Distinct values of a text field, sorted ascending.
    pub fn distinct(&self, field: Field) -> Vec<String> {
        let values: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|record| record.value(field).as_text())
            .collect();
        values.into_iter().map(str::to_string).collect()
    }

    fn rebuild_positions(&mut self) {
        self.positions.clear();
        for (pos, record) in self.records.iter().enumerate() {
            self.positions.insert(record.id(), pos);
        }
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
