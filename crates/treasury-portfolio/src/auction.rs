//! Treasury auction statistics.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use treasury_core::{AuctionRecord, Date};

/// Statistics of all auctions of one security type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSummary {
    /// Security type as published (Bill, Note, Bond, ...).
    pub security_type: String,
    /// Number of auction rows, including rows without an accepted amount.
    pub auctions: usize,
    /// Number of auctions that report an accepted amount.
    pub accepted_count: usize,
    /// Sum of accepted amounts over auctions that report one.
    pub total_accepted: Decimal,
    /// Mean accepted amount. `None` if no auction reports one.
    pub mean_accepted: Option<Decimal>,
    /// Mean bid-to-cover ratio.
    pub bid_to_cover_mean: Option<f64>,
    /// Sample standard deviation of bid-to-cover. `None` below two values.
    pub bid_to_cover_std: Option<f64>,
    /// Earliest auction date.
    pub first_auction: Option<Date>,
    /// Latest auction date.
    pub last_auction: Option<Date>,
}

#[derive(Default)]
struct Accumulator {
    auctions: usize,
    accepted: Vec<Decimal>,
    bid_to_cover: Vec<f64>,
    first: Option<Date>,
    last: Option<Date>,
}

impl Accumulator {
    fn add(&mut self, record: &AuctionRecord) {
        self.auctions += 1;
        if let Some(accepted) = record.total_accepted {
            self.accepted.push(accepted);
        }
        if let Some(ratio) = record.bid_to_cover_ratio.filter(|r| r.is_finite()) {
            self.bid_to_cover.push(ratio);
        }
        if let Some(date) = record.auction_date {
            self.first = Some(self.first.map_or(date, |d| d.min(date)));
            self.last = Some(self.last.map_or(date, |d| d.max(date)));
        }
    }

    fn finish(self, security_type: String) -> AuctionSummary {
        let total_accepted: Decimal = self.accepted.iter().sum();
        let mean_accepted = if self.accepted.is_empty() {
            None
        } else {
            total_accepted.checked_div(Decimal::from(self.accepted.len()))
        };

        let bid_to_cover_mean =
            (!self.bid_to_cover.is_empty()).then(|| Statistics::mean(self.bid_to_cover.iter()));
        let bid_to_cover_std =
            (self.bid_to_cover.len() >= 2).then(|| Statistics::std_dev(self.bid_to_cover.iter()));

        AuctionSummary {
            security_type,
            auctions: self.auctions,
            accepted_count: self.accepted.len(),
            total_accepted,
            mean_accepted,
            bid_to_cover_mean,
            bid_to_cover_std,
            first_auction: self.first,
            last_auction: self.last,
        }
    }
}

/// Summarizes auctions by security type, ordered by type name.
///
/// A record missing a number still counts as an auction but contributes
/// only to the statistics it has values for.
#[must_use]
pub fn summarize_auctions(records: &[AuctionRecord]) -> Vec<AuctionSummary> {
    let mut by_type: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for record in records {
        by_type
            .entry(record.security_type.trim())
            .or_default()
            .add(record);
    }

    by_type
        .into_iter()
        .map(|(security_type, acc)| acc.finish(security_type.to_string()))
        .collect()
}
