//! # Treasury Core
//!
//! Core types shared by the Treasury returns crates.
//!
//! This crate provides the foundational building blocks of the pipeline:
//!
//! - **Calendar types**: [`Date`] for daily observations, [`Period`] for monthly ones
//! - **Identifiers**: [`SecurityId`] and the CRSP [`InstrumentType`] code
//! - **Records**: [`BondReturnRecord`], [`DailyReturnRecord`] and [`AuctionRecord`]
//! - **Units**: [`MaturityUnit`] for normalising time-to-maturity into months
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes keep identifiers and periods from being mixed up
//! - **Immutable records**: Records are produced upstream and never mutated here
//! - **Explicit Over Implicit**: Units and parsing rules are named, not guessed
//!
//! ## Example
//!
//! ```rust
//! use treasury_core::prelude::*;
//!
//! let period = Period::parse("2020-01").unwrap();
//! let record = BondReturnRecord::new("912828UN8", period, 3.0, 0.01);
//! assert_eq!(record.period.to_string(), "2020-01");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        AuctionRecord, BondReturnRecord, DailyReturnRecord, Date, InstrumentType, MaturityUnit,
        Period, SecurityId,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{
    AuctionRecord, BondReturnRecord, DailyReturnRecord, Date, InstrumentType, MaturityUnit, Period,
    SecurityId,
};
