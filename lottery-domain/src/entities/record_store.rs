// Record store entity
// Ordered collection of draws for one game, unique by period

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::entities::DrawRecord;
use crate::utils::parse_draw_date;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<DrawRecord>,
    periods: HashSet<String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store keeping the given order. Later duplicates of a period
    /// are dropped so the key stays unique.
    pub fn from_records(records: Vec<DrawRecord>) -> Self {
        let mut store = Self::new();
        store.merge(records);
        store
    }

    /// Appends candidates whose period is not present yet and returns how
    /// many were added.
    pub fn merge<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = DrawRecord>,
    {
        let mut added = 0;
        for record in candidates {
            if self.periods.insert(record.period.clone()) {
                self.records.push(record);
                added += 1;
            }
        }
        added
    }

    /// Sorts newest first by textual period.
    pub fn sort_descending(&mut self) {
        self.records.sort_by(|a, b| b.period.cmp(&a.period));
    }

    /// Keeps the first `limit` records of the current order and returns how
    /// many were dropped.
    pub fn truncate(&mut self, limit: usize) -> usize {
        if self.records.len() <= limit {
            return 0;
        }
        let dropped = self.records.split_off(limit);
        for record in &dropped {
            self.periods.remove(&record.period);
        }
        dropped.len()
    }

    pub fn contains(&self, period: &str) -> bool {
        self.periods.contains(period.trim())
    }

    pub fn latest(&self) -> Option<&DrawRecord> {
        self.records.first()
    }

    pub fn latest_draw_date(&self) -> Option<NaiveDate> {
        self.records
            .iter()
            .filter_map(|record| parse_draw_date(&record.draw_date))
            .max()
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.periods.clear();
    }
}
