//! Domain types for Treasury return analytics.
//!
//! - [`Date`]: Calendar date of a daily observation
//! - [`Period`]: Calendar month of a monthly observation
//! - [`SecurityId`]: Security identifier
//! - [`InstrumentType`]: CRSP `ITYPE` code
//! - [`MaturityUnit`]: Unit of an input time-to-maturity
//! - [`BondReturnRecord`], [`DailyReturnRecord`], [`AuctionRecord`]: input records

mod date;
mod maturity_unit;
mod period;
mod records;
mod security;

pub use date::Date;
pub use maturity_unit::MaturityUnit;
pub use period::Period;
pub use records::{AuctionRecord, BondReturnRecord, DailyReturnRecord};
pub use security::{InstrumentType, SecurityId};
