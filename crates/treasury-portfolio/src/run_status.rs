//! On-the-run and off-the-run classification.
//!
//! Securities are grouped by security type and term. Within a group the
//! most recently issued security is on-the-run; every older one is
//! off-the-run, numbered by how many newer issues sit ahead of it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use treasury_core::{AuctionRecord, Date, SecurityId};

/// Whether a security is the newest issue of its type and term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// Most recently issued security of its type and term.
    OnTheRun,
    /// Superseded by a newer issue.
    OffTheRun,
}

impl RunStatus {
    /// Returns the status as a lowercase code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::OnTheRun => "on-the-run",
            RunStatus::OffTheRun => "off-the-run",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run status of one security.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatusRecord {
    /// CUSIP of the security.
    pub cusip: SecurityId,
    /// Security type as published.
    pub security_type: String,
    /// Term as published.
    pub security_term: String,
    /// Original issue date (the earliest issue date seen for the CUSIP).
    pub issue_date: Date,
    /// Position in the run: 0 is on-the-run, 1 the first off-the-run, and so on.
    pub run: usize,
    /// On-the-run or off-the-run.
    pub status: RunStatus,
}

/// Result of [`classify_runs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatusReport {
    /// One record per security, grouped by type and term, newest first.
    pub records: Vec<RunStatusRecord>,
    /// Auction rows without a term or an issue date.
    pub skipped: usize,
    /// Securities first issued after the as-of date.
    pub not_yet_issued: usize,
}

impl RunStatusReport {
    /// The on-the-run securities only.
    pub fn on_the_run(&self) -> impl Iterator<Item = &RunStatusRecord> {
        self.records
            .iter()
            .filter(|r| r.status == RunStatus::OnTheRun)
    }
}

/// Classifies every security seen in `auctions` as on- or off-the-run.
///
/// A reopening repeats the CUSIP of an existing security, so each CUSIP
/// counts once, at its earliest issue date. With `as_of`, securities
/// issued after that date are left out and the status is the one that
/// held on `as_of`. Ties on issue date are broken by CUSIP.
#[must_use]
pub fn classify_runs(auctions: &[AuctionRecord], as_of: Option<Date>) -> RunStatusReport {
    let mut report = RunStatusReport::default();

    // cusip -> (type, term, original issue date)
    let mut securities: BTreeMap<&str, (&str, &str, Date)> = BTreeMap::new();
    for auction in auctions {
        let (Some(term), Some(issued)) = (auction.security_term.as_deref(), auction.issue_date)
        else {
            report.skipped += 1;
            continue;
        };

        securities
            .entry(auction.cusip.as_str())
            .and_modify(|entry| entry.2 = entry.2.min(issued))
            .or_insert((auction.security_type.trim(), term.trim(), issued));
    }

    let mut runs: BTreeMap<(&str, &str), Vec<(Date, &str)>> = BTreeMap::new();
    for (cusip, (security_type, term, issued)) in securities {
        if as_of.is_some_and(|date| issued > date) {
            report.not_yet_issued += 1;
            continue;
        }
        runs.entry((security_type, term))
            .or_default()
            .push((issued, cusip));
    }

    for ((security_type, term), mut issues) in runs {
        issues.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        report
            .records
            .extend(issues.into_iter().enumerate().map(|(run, (issued, cusip))| {
                RunStatusRecord {
                    cusip: SecurityId::new(cusip),
                    security_type: security_type.to_string(),
                    security_term: term.to_string(),
                    issue_date: issued,
                    run,
                    status: if run == 0 {
                        RunStatus::OnTheRun
                    } else {
                        RunStatus::OffTheRun
                    },
                }
            }));
    }

    tracing::debug!(
        securities = report.records.len(),
        skipped = report.skipped,
        not_yet_issued = report.not_yet_issued,
        "classified run status"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auction(
        cusip: &str,
        security_type: &str,
        term: Option<&str>,
        issued: Option<&str>,
    ) -> AuctionRecord {
        AuctionRecord {
            cusip: SecurityId::new(cusip),
            security_type: security_type.to_string(),
            security_term: term.map(str::to_string),
            auction_date: None,
            issue_date: issued.map(|d| Date::parse(d).unwrap()),
            total_accepted: None,
            total_tendered: None,
            bid_to_cover_ratio: None,
        }
    }

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    // ===== CLASSIFICATION =====

    #[test]
    fn test_newest_issue_is_on_the_run() {
        let auctions = vec![
            auction("OLD", "Note", Some("2-Year"), Some("2024-01-31")),
            auction("NEW", "Note", Some("2-Year"), Some("2024-02-29")),
            auction("MID", "Note", Some("2-Year"), Some("2024-02-15")),
            auction("FIVE", "Note", Some("5-Year"), Some("2024-01-31")),
        ];

        let report = classify_runs(&auctions, None);

        assert_eq!(report.records.len(), 4);
        let two_year: Vec<(&str, usize, RunStatus)> = report
            .records
            .iter()
            .filter(|r| r.security_term == "2-Year")
            .map(|r| (r.cusip.as_str(), r.run, r.status))
            .collect();
        assert_eq!(
            two_year,
            vec![
                ("NEW", 0, RunStatus::OnTheRun),
                ("MID", 1, RunStatus::OffTheRun),
                ("OLD", 2, RunStatus::OffTheRun),
            ]
        );

        let on: Vec<&str> = report.on_the_run().map(|r| r.cusip.as_str()).collect();
        assert_eq!(on, vec!["NEW", "FIVE"]);
    }

    #[test]
    fn test_types_with_same_term_are_separate_runs() {
        let auctions = vec![
            auction("NOTE10", "Note", Some("10-Year"), Some("2024-01-15")),
            auction("TIPS10", "TIPS", Some("10-Year"), Some("2023-07-31")),
        ];

        let report = classify_runs(&auctions, None);

        assert_eq!(report.on_the_run().count(), 2);
    }

    #[test]
    fn test_reopening_keeps_original_issue_date() {
        let auctions = vec![
            auction("A", "Bond", Some("30-Year"), Some("2024-02-15")),
            auction("B", "Bond", Some("30-Year"), Some("2024-03-15")),
            // Reopening of A after B was issued
            auction("A", "Bond", Some("30-Year"), Some("2024-04-15")),
        ];

        let report = classify_runs(&auctions, None);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].cusip.as_str(), "B");
        assert_eq!(report.records[1].issue_date, date("2024-02-15"));
        assert_eq!(report.records[1].status, RunStatus::OffTheRun);
    }

    #[test]
    fn test_as_of_date_rolls_back_the_run() {
        let auctions = vec![
            auction("OLD", "Note", Some("2-Year"), Some("2024-01-31")),
            auction("NEW", "Note", Some("2-Year"), Some("2024-02-29")),
        ];

        let report = classify_runs(&auctions, Some(date("2024-02-15")));

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].cusip.as_str(), "OLD");
        assert_eq!(report.records[0].status, RunStatus::OnTheRun);
        assert_eq!(report.not_yet_issued, 1);

        // Issued on the as-of date counts as issued
        let report = classify_runs(&auctions, Some(date("2024-02-29")));
        assert_eq!(report.records[0].cusip.as_str(), "NEW");
    }

    // ===== EDGE CASES =====

    #[test]
    fn test_rows_without_term_or_issue_date_are_skipped() {
        let auctions = vec![
            auction("A", "Note", None, Some("2024-01-31")),
            auction("B", "Note", Some("2-Year"), None),
            auction("C", "Note", Some("2-Year"), Some("2024-01-31")),
        ];

        let report = classify_runs(&auctions, None);

        assert_eq!(report.skipped, 2);
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_same_issue_date_ordered_by_cusip() {
        let auctions = vec![
            auction("Z", "Bill", Some("4-Week"), Some("2024-01-02")),
            auction("A", "Bill", Some("4-Week"), Some("2024-01-02")),
        ];

        let report = classify_runs(&auctions, None);

        assert_eq!(report.records[0].cusip.as_str(), "A");
        assert_eq!(report.records[1].run, 1);
    }

    #[test]
    fn test_empty_input() {
        let report = classify_runs(&[], None);
        assert_eq!(report, RunStatusReport::default());
    }

    #[test]
    fn test_status_serializes_as_code() {
        let json = serde_json::to_string(&RunStatus::OffTheRun).unwrap();
        assert_eq!(json, "\"off-the-run\"");
        assert_eq!(RunStatus::OnTheRun.to_string(), "on-the-run");
    }
}
