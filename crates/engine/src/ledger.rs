//! The module contains [`Ledger`], the in-memory table of one entry kind.
use serde::{Deserialize, Serialize};

use crate::{
    ResultEngine,
    entry::{EntryKind, EntryRecord, EntryRow},
    range::DateRange,
};

/// Records of one [`EntryKind`], in the order the store returned them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub kind: EntryKind,
    records: Vec<EntryRecord>,
}

impl Ledger {
    pub fn new(kind: EntryKind, records: Vec<EntryRecord>) -> Self {
        Self { kind, records }
    }

    /// Parse stored rows. The first malformed row aborts the conversion.
    pub fn from_rows(kind: EntryKind, rows: Vec<EntryRow>) -> ResultEngine<Self> {
        let records = rows
            .into_iter()
            .map(EntryRecord::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok(Self::new(kind, records))
    }

    pub fn records(&self) -> &[EntryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed `[min, max]` of `entry_date`, `None` when the ledger is empty.
    pub fn bounds(&self) -> Option<DateRange> {
        let mut dates = self.records.iter().map(|record| record.entry_date);
        let first = dates.next()?;
        Some(dates.fold(DateRange::day(first), DateRange::extend))
    }

    /// Records dated within `range`, inclusive.
    pub fn filter(&self, range: DateRange) -> Ledger {
        let records = self
            .records
            .iter()
            .filter(|record| range.contains(record.entry_date))
            .cloned()
            .collect();
        Ledger::new(self.kind, records)
    }

    /// Filter by `range`, or by the observed bounds when no range is chosen.
    pub fn select(&self, range: Option<DateRange>) -> Ledger {
        match range.or_else(|| self.bounds()) {
            Some(range) => self.filter(range),
            None => Ledger::new(self.kind, Vec::new()),
        }
    }
}
