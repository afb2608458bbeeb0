//! Daily to monthly return compounding.
//!
//! Turns daily total returns into the monthly [`BondReturnRecord`]s the
//! aggregator consumes: `(1 + r_1)(1 + r_2)...(1 + r_n) - 1` over each
//! security's observations within a calendar month.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use treasury_core::{BondReturnRecord, DailyReturnRecord, Date, Period, SecurityId};

use crate::analytics::maybe_parallel_map;
use crate::types::CompoundingConfig;

/// Why a daily row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyIssueKind {
    /// Daily return is NaN or infinite.
    NonFiniteReturn,
    /// Time-to-maturity is NaN or infinite.
    NonFiniteMaturity,
    /// Same security and date seen earlier in the input.
    DuplicateDate,
}

impl fmt::Display for DailyIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NonFiniteReturn => "non-finite daily return",
            Self::NonFiniteMaturity => "non-finite maturity",
            Self::DuplicateDate => "duplicate date",
        };
        f.write_str(s)
    }
}

/// One rejected daily row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyIssue {
    /// Security identifier.
    pub security_id: SecurityId,
    /// Observation date.
    pub date: Date,
    /// What was wrong with it.
    pub kind: DailyIssueKind,
}

impl DailyIssue {
    fn new(record: &DailyReturnRecord, kind: DailyIssueKind) -> Self {
        tracing::warn!(
            security_id = %record.security_id,
            date = %record.date,
            "rejected daily row: {kind}"
        );
        Self {
            security_id: record.security_id.clone(),
            date: record.date,
            kind,
        }
    }
}

/// Result of compounding a batch of daily returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundingOutcome {
    /// Monthly records ordered by `(period, security_id)`.
    pub records: Vec<BondReturnRecord>,
    /// Number of daily rows seen.
    pub input: usize,
    /// Daily rows compounded into a monthly record.
    pub compounded: usize,
    /// Rows dropped by the notes-and-bonds selection.
    pub filtered: usize,
    /// Rows rejected for bad data.
    pub rejected: Vec<DailyIssue>,
}

impl CompoundingOutcome {
    /// True when every input row is compounded, filtered or rejected.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.compounded + self.filtered + self.rejected.len() == self.input
    }
}

/// Compounds daily returns into monthly returns per security.
///
/// With `notes_and_bonds_only`, rows whose instrument type is known and is
/// not a note or bond are dropped; rows without an instrument type are
/// kept. The monthly record takes its maturity and market value from the
/// last observation of the month.
#[must_use]
pub fn compound_monthly(
    daily: &[DailyReturnRecord],
    config: &CompoundingConfig,
) -> CompoundingOutcome {
    let mut outcome = CompoundingOutcome {
        input: daily.len(),
        ..Default::default()
    };

    let mut groups: BTreeMap<(Period, SecurityId), Vec<&DailyReturnRecord>> = BTreeMap::new();
    for record in daily {
        if config.notes_and_bonds_only
            && record
                .instrument_type
                .is_some_and(|itype| !itype.is_note_or_bond())
        {
            outcome.filtered += 1;
            continue;
        }
        if !record.daily_return.is_finite() {
            outcome
                .rejected
                .push(DailyIssue::new(record, DailyIssueKind::NonFiniteReturn));
            continue;
        }
        if !record.maturity_months.is_finite() {
            outcome
                .rejected
                .push(DailyIssue::new(record, DailyIssueKind::NonFiniteMaturity));
            continue;
        }
        groups
            .entry((record.date.period(), record.security_id.clone()))
            .or_default()
            .push(record);
    }

    let groups: Vec<_> = groups
        .into_values()
        .map(|mut days| {
            days.sort_by_key(|d| d.date);
            days
        })
        .collect();

    let monthly = maybe_parallel_map(&groups, &config.aggregation, |days| compound_month(days));

    for (record, used, issues) in monthly {
        outcome.records.extend(record);
        outcome.compounded += used;
        outcome.rejected.extend(issues);
    }

    tracing::debug!(
        input = outcome.input,
        months = outcome.records.len(),
        filtered = outcome.filtered,
        rejected = outcome.rejected.len(),
        "compounded daily returns"
    );

    outcome
}

fn compound_month(
    days: &[&DailyReturnRecord],
) -> (Option<BondReturnRecord>, usize, Vec<DailyIssue>) {
    let mut issues = Vec::new();
    let mut growth = 1.0;
    let mut used = 0;
    let mut last: Option<&DailyReturnRecord> = None;

    for day in days {
        if last.is_some_and(|prev| prev.date == day.date) {
            issues.push(DailyIssue::new(day, DailyIssueKind::DuplicateDate));
            continue;
        }
        growth *= 1.0 + day.daily_return;
        used += 1;
        last = Some(*day);
    }

    let record = last.map(|close| {
        let mut monthly = BondReturnRecord::new(
            close.security_id.clone(),
            close.date.period(),
            close.maturity_months,
            growth - 1.0,
        );
        monthly.market_value = close.market_value;
        monthly
    });

    (record, used, issues)
}
