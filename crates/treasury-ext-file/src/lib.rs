//! # Treasury Ext File
//!
//! CSV and Parquet adapters for the Treasury return pipeline.
//!
//! Readers:
//! - Monthly bond returns
//! - Daily bond returns
//! - Auction results
//! - Portfolio returns (either layout)
//!
//! Writers:
//! - Portfolio returns in the standard or FTSFR layout
//! - Monthly bond returns in the standard or FTSFR layout
//! - On-the-run status per security
//!
//! Column names are matched loosely (`securityType`, `security_type` and
//! `SECURITY TYPE` are the same column) and common source-system aliases
//! such as `KYTREASNO` or `TMRETNUA` are recognised. A malformed row is
//! reported with its line number and skipped; only file-level problems
//! fail a read.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod options;
mod readers;
mod table;
mod writers;

pub use error::{FileError, FileResult};
pub use options::{Compression, FileFormat, Layout, ReadOptions, WriteOptions};
pub use readers::{read_auctions, read_bond_returns, read_daily_returns, read_portfolio_returns};
pub use table::{ReadOutcome, RowError};
pub use writers::{write_bond_returns, write_portfolio_returns, write_run_status};
