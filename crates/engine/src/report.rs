//! Per-date aggregation of a filtered ledger.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    entry::{EntryKind, EntryRecord},
    ledger::Ledger,
};

/// Sum of `entered_amount` for one date.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Everything the dashboard renders for a selection: the chart series and the
/// unmodified filtered rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kind: EntryKind,
    pub series: Vec<DailyTotal>,
    pub rows: Vec<EntryRecord>,
}

impl Report {
    /// Group `filtered` by exact date and sum the amounts.
    ///
    /// The series is ascending by date with one point per distinct date.
    /// Missing days are not filled in.
    pub fn build(filtered: &Ledger) -> Self {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in filtered.records() {
            *totals.entry(record.entry_date).or_default() += record.entered_amount;
        }

        Self {
            kind: filtered.kind,
            series: totals
                .into_iter()
                .map(|(date, total)| DailyTotal { date, total })
                .collect(),
            rows: filtered.records().to_vec(),
        }
    }

    pub fn grand_total(&self) -> f64 {
        self.series.iter().map(|point| point.total).sum()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::DateRange;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger() -> Ledger {
        Ledger::new(
            EntryKind::Ingressos,
            vec![
                EntryRecord::new("A", "P1", date(2024, 1, 1), 100.0),
                EntryRecord::new("B", "P1", date(2024, 1, 1), 50.0),
                EntryRecord::new("C", "P2", date(2024, 1, 2), 200.0),
            ],
        )
    }

    #[test]
    fn groups_and_sums_by_date() {
        let filtered = ledger().filter(DateRange::new(date(2024, 1, 1), date(2024, 1, 2)));
        let report = Report::build(&filtered);
        assert_eq!(
            report.series,
            vec![
                DailyTotal {
                    date: date(2024, 1, 1),
                    total: 150.0
                },
                DailyTotal {
                    date: date(2024, 1, 2),
                    total: 200.0
                },
            ]
        );
        assert_eq!(report.rows, filtered.records());
    }

    #[test]
    fn range_outside_data_yields_empty_report() {
        let filtered = ledger().filter(DateRange::day(date(2024, 1, 3)));
        let report = Report::build(&filtered);
        assert!(report.is_empty());
        assert!(report.series.is_empty());
    }

    #[test]
    fn series_is_sorted_and_has_one_point_per_date() {
        let records = (0u32..30)
            .map(|i| {
                EntryRecord::new(
                    format!("R{i}"),
                    "P",
                    date(2024, 3, 1 + (i * 7) % 11),
                    f64::from(i) * 1.25,
                )
            })
            .collect();
        let report = Report::build(&Ledger::new(EntryKind::Registros, records));

        let mut distinct: Vec<_> = report.rows.iter().map(|r| r.entry_date).collect();
        distinct.sort();
        distinct.dedup();
        assert_eq!(report.series.len(), distinct.len());
        assert!(report.series.windows(2).all(|w| w[0].date < w[1].date));

        let row_total: f64 = report.rows.iter().map(|r| r.entered_amount).sum();
        assert!((report.grand_total() - row_total).abs() < 1e-9);
        assert_eq!(report.kind, EntryKind::Registros);
    }

    #[test]
    fn sums_keep_full_precision() {
        let records = vec![
            EntryRecord::new("A", "P", date(2024, 1, 1), 0.1),
            EntryRecord::new("B", "P", date(2024, 1, 1), 0.2),
        ];
        let report = Report::build(&Ledger::new(EntryKind::Ingressos, records));
        assert_eq!(report.series[0].total, 0.1 + 0.2);
    }
}
