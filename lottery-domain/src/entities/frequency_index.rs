// Frequency index entity
// Occurrence counts per number, derived from a record store

use std::collections::HashMap;

use serde::Serialize;

use crate::entities::{DrawRecord, GameProfile};
use crate::value_objects::SpecialRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberCount {
    pub number: u32,
    pub count: u32,
}

/// Primary and special occurrence counts, most frequent first.
///
/// Entries with equal counts keep the order in which their number was first
/// seen while walking the records; no numeric tie-break is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyIndex {
    pub primary: Vec<NumberCount>,
    pub special: Vec<NumberCount>,
}

impl FrequencyIndex {
    pub fn compute(profile: &GameProfile, records: &[DrawRecord]) -> Self {
        let mut primary = Tally::default();
        let mut special = Tally::default();

        for record in records {
            let numbers = &record.numbers;
            if numbers.is_empty() {
                continue;
            }
            if profile.cadence.is_rolling() {
                primary.extend(numbers);
                if let Some(value) = record.special_number.filter(|value| *value > 0) {
                    special.add(value);
                }
                continue;
            }
            match profile.special_rule {
                SpecialRule::EmbeddedLast => {
                    if let Some((last, rest)) = numbers.split_last() {
                        primary.extend(rest);
                        special.add(*last);
                    }
                }
                SpecialRule::SeparateField => {
                    primary.extend(numbers);
                    if let Some(value) = record.special_number.filter(|value| *value > 0) {
                        special.add(value);
                    }
                }
                SpecialRule::None => primary.extend(numbers),
            }
        }

        Self {
            primary: primary.into_sorted(),
            special: special.into_sorted(),
        }
    }

    pub fn top_primary(&self, n: usize) -> &[NumberCount] {
        &self.primary[..n.min(self.primary.len())]
    }

    pub fn primary_total(&self) -> u64 {
        self.primary.iter().map(|entry| u64::from(entry.count)).sum()
    }

    pub fn special_total(&self) -> u64 {
        self.special.iter().map(|entry| u64::from(entry.count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.special.is_empty()
    }
}

#[derive(Default)]
struct Tally {
    entries: Vec<NumberCount>,
    slots: HashMap<u32, usize>,
}

impl Tally {
    fn add(&mut self, number: u32) {
        match self.slots.get(&number) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.slots.insert(number, self.entries.len());
                self.entries.push(NumberCount { number, count: 1 });
            }
        }
    }

    fn extend(&mut self, numbers: &[u32]) {
        for number in numbers {
            self.add(*number);
        }
    }

    fn into_sorted(mut self) -> Vec<NumberCount> {
        // stable: ties keep first-seen order
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries
    }
}
