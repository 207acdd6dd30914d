//! The module contains the record types read from the store.
//!
//! Both tables share one shape. [`EntryKind`] tells them apart, [`EntryRow`]
//! is a row exactly as stored and [`EntryRecord`] is the parsed, in-memory
//! form used by filtering and reporting.
use core::fmt;

use chrono::NaiveDate;
use sea_orm::{DeriveIden, FromQueryResult};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Format of the `entry_date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which of the two entry tables a ledger comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Ingressos,
    Registros,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Ingressos, EntryKind::Registros];

    pub fn table_name(self) -> &'static str {
        match self {
            Self::Ingressos => "ingressos",
            Self::Registros => "registros",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ingressos => "Ingressos",
            Self::Registros => "Registros",
        }
    }

    /// The other kind. Used to switch ledgers from the dashboard.
    pub fn toggle(self) -> Self {
        match self {
            Self::Ingressos => Self::Registros,
            Self::Registros => Self::Ingressos,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EntryKind::ALL
            .into_iter()
            .find(|kind| kind.table_name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown entry kind: {value}"))
    }
}

/// Columns shared by both entry tables.
#[derive(DeriveIden, Clone, Copy, Debug)]
pub enum EntryColumn {
    CodeScale,
    CodeProject,
    EntryDate,
    EnteredAmount,
}

impl EntryColumn {
    pub const ALL: [EntryColumn; 4] = [
        EntryColumn::CodeScale,
        EntryColumn::CodeProject,
        EntryColumn::EntryDate,
        EntryColumn::EnteredAmount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CodeScale => "code_scale",
            Self::CodeProject => "code_project",
            Self::EntryDate => "entry_date",
            Self::EnteredAmount => "entered_amount",
        }
    }
}

/// A row as stored. `entry_date` is still the raw column string.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct EntryRow {
    pub code_scale: String,
    pub code_project: String,
    pub entry_date: String,
    pub entered_amount: f64,
}

/// A parsed entry, ready for filtering and aggregation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub code_scale: String,
    pub code_project: String,
    pub entry_date: NaiveDate,
    pub entered_amount: f64,
}

impl EntryRecord {
    pub fn new(
        code_scale: impl Into<String>,
        code_project: impl Into<String>,
        entry_date: NaiveDate,
        entered_amount: f64,
    ) -> Self {
        Self {
            code_scale: code_scale.into(),
            code_project: code_project.into(),
            entry_date,
            entered_amount,
        }
    }
}

impl TryFrom<EntryRow> for EntryRecord {
    type Error = EngineError;

    fn try_from(row: EntryRow) -> ResultEngine<Self> {
        let entry_date =
            NaiveDate::parse_from_str(row.entry_date.trim(), DATE_FORMAT).map_err(|_| {
                EngineError::InvalidDate {
                    code_scale: row.code_scale.clone(),
                    value: row.entry_date.clone(),
                }
            })?;
        if !row.entered_amount.is_finite() {
            return Err(EngineError::InvalidAmount(row.code_scale));
        }

        Ok(Self {
            code_scale: row.code_scale,
            code_project: row.code_project,
            entry_date,
            entered_amount: row.entered_amount,
        })
    }
}
