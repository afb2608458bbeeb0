//! Record readers.
//!
//! Each reader accepts CSV or Parquet (by extension), resolves columns by
//! name or alias (case and punctuation insensitive) and isolates bad rows.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use treasury_core::{
    AuctionRecord, BondReturnRecord, DailyReturnRecord, Date, InstrumentType, Period, SecurityId,
};
use treasury_portfolio::{MaturityBucket, PortfolioReturnRecord};

use crate::error::FileResult;
use crate::options::ReadOptions;
use crate::table::{read_rows, ColumnSpec, ReadOutcome};

const BOND_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec::required("security_id", &["id", "cusip", "kytreasno"]),
    ColumnSpec::required("period", &["date", "caldt", "mcaldt"]),
    ColumnSpec::required("maturity", &["ttm", "tmatdt_months"]),
    ColumnSpec::required("return", &["ret", "tmretnua"]),
    ColumnSpec::optional("market_value", &[]),
];

const DAILY_COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec::required("security_id", &["id", "cusip", "kytreasno"]),
    ColumnSpec::required("date", &["caldt", "period"]),
    ColumnSpec::required("maturity", &["ttm", "tmatdt_months"]),
    ColumnSpec::required("return", &["ret", "tdretnua"]),
    ColumnSpec::optional("market_value", &[]),
    ColumnSpec::optional("itype", &["instrument_type"]),
];

const AUCTION_COLUMNS: [ColumnSpec; 8] = [
    ColumnSpec::required("cusip", &["security_id"]),
    ColumnSpec::required("security_type", &[]),
    ColumnSpec::optional("auction_date", &[]),
    ColumnSpec::optional("total_accepted", &[]),
    ColumnSpec::optional("total_tendered", &[]),
    ColumnSpec::optional("bid_to_cover_ratio", &["bid_to_cover"]),
    ColumnSpec::optional("security_term", &["term"]),
    ColumnSpec::optional("issue_date", &[]),
];

const PORTFOLIO_COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec::required("bucket", &["unique_id"]),
    ColumnSpec::required("period", &["ds"]),
    ColumnSpec::required("return", &["y"]),
    ColumnSpec::optional("constituents", &[]),
];

/// Reads monthly bond returns.
///
/// Columns: `security_id` (or `id`, `cusip`, `kytreasno`), `period` (or
/// `date`, `caldt`, `mcaldt`), `maturity` (or `ttm`, `tmatdt_months`),
/// `return` (or `ret`, `tmretnua`) and optionally `market_value`.
/// Maturities are converted to months using `options.maturity_unit`.
pub fn read_bond_returns(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> FileResult<ReadOutcome<BondReturnRecord>> {
    let unit = options.maturity_unit;

    read_rows(path.as_ref(), &BOND_COLUMNS, |cells| {
        let security_id = required(cells[0], "security_id")?;
        let period = parse_period(required(cells[1], "period")?)?;
        let maturity = parse_f64(required(cells[2], "maturity")?, "maturity")?;
        let total_return = parse_f64(required(cells[3], "return")?, "return")?;

        let mut record =
            BondReturnRecord::new(security_id, period, unit.to_months(maturity), total_return);
        record.market_value = optional(cells[4], "market_value", parse_decimal)?;
        Ok(record)
    })
}

/// Reads daily bond returns.
///
/// Like [`read_bond_returns`] with a `date` column (or `caldt`) and an
/// optional `itype` column carrying the CRSP instrument type.
pub fn read_daily_returns(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> FileResult<ReadOutcome<DailyReturnRecord>> {
    let unit = options.maturity_unit;

    read_rows(path.as_ref(), &DAILY_COLUMNS, |cells| {
        let security_id = required(cells[0], "security_id")?;
        let date = parse_date(required(cells[1], "date")?)?;
        let maturity = parse_f64(required(cells[2], "maturity")?, "maturity")?;
        let daily_return = parse_f64(required(cells[3], "return")?, "return")?;

        let mut record =
            DailyReturnRecord::new(security_id, date, unit.to_months(maturity), daily_return);
        record.market_value = optional(cells[4], "market_value", parse_decimal)?;
        record.instrument_type = optional(cells[5], "itype", parse_instrument_type)?;
        Ok(record)
    })
}

/// Reads Treasury auction results.
///
/// Columns follow the TreasuryDirect names: `cusip`, `securityType`,
/// `auctionDate`, `totalAccepted`, `totalTendered`, `bidToCoverRatio`,
/// `securityTerm`, `issueDate`. Snake case works as well.
pub fn read_auctions(path: impl AsRef<Path>) -> FileResult<ReadOutcome<AuctionRecord>> {
    read_rows(path.as_ref(), &AUCTION_COLUMNS, |cells| {
        Ok(AuctionRecord {
            cusip: SecurityId::new(required(cells[0], "cusip")?),
            security_type: required(cells[1], "security_type")?.to_string(),
            auction_date: optional(cells[2], "auction_date", |c, _| parse_date(c))?,
            total_accepted: optional(cells[3], "total_accepted", parse_decimal)?,
            total_tendered: optional(cells[4], "total_tendered", parse_decimal)?,
            bid_to_cover_ratio: optional(cells[5], "bid_to_cover_ratio", parse_f64)?,
            security_term: cells[6].map(str::to_string),
            issue_date: optional(cells[7], "issue_date", |c, _| parse_date(c))?,
        })
    })
}

/// Reads portfolio returns written in either layout.
///
/// The FTSFR layout carries no constituent counts; they read back as 0.
pub fn read_portfolio_returns(
    path: impl AsRef<Path>,
) -> FileResult<ReadOutcome<PortfolioReturnRecord>> {
    read_rows(path.as_ref(), &PORTFOLIO_COLUMNS, |cells| {
        let bucket = parse_bucket(required(cells[0], "bucket")?)?;
        let period = parse_period(required(cells[1], "period")?)?;
        let portfolio_return = parse_f64(required(cells[2], "return")?, "return")?;
        let constituents = optional(cells[3], "constituents", |c, column| {
            c.parse::<usize>()
                .map_err(|_| format!("invalid {column} '{c}'"))
        })?
        .unwrap_or(0);

        Ok(PortfolioReturnRecord::new(
            bucket,
            period,
            portfolio_return,
            constituents,
        ))
    })
}

// =============================================================================
// CELL PARSERS
// =============================================================================

fn required<'a>(cell: Option<&'a str>, column: &str) -> Result<&'a str, String> {
    cell.ok_or_else(|| format!("missing {column}"))
}

fn optional<T>(
    cell: Option<&str>,
    column: &str,
    parse: impl Fn(&str, &str) -> Result<T, String>,
) -> Result<Option<T>, String> {
    cell.map(|c| parse(c, column)).transpose()
}

fn parse_f64(cell: &str, column: &str) -> Result<f64, String> {
    cell.parse::<f64>()
        .map_err(|_| format!("invalid {column} '{cell}'"))
}

fn parse_decimal(cell: &str, column: &str) -> Result<Decimal, String> {
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .map_err(|_| format!("invalid {column} '{cell}'"))
}

/// Drops a time-of-day suffix such as `T00:00:00`.
fn date_part(cell: &str) -> &str {
    cell.split(|c| c == 'T' || c == ' ').next().unwrap_or(cell)
}

fn parse_period(cell: &str) -> Result<Period, String> {
    Period::parse(date_part(cell)).map_err(|e| e.to_string())
}

fn parse_date(cell: &str) -> Result<Date, String> {
    Date::parse(date_part(cell)).map_err(|e| e.to_string())
}

fn parse_instrument_type(cell: &str, column: &str) -> Result<InstrumentType, String> {
    let code = parse_f64(cell, column)?;
    if code.fract() != 0.0 || !(0.0..=255.0).contains(&code) {
        return Err(format!("invalid {column} '{cell}'"));
    }
    Ok(InstrumentType::from(code as u8))
}

fn parse_bucket(cell: &str) -> Result<MaturityBucket, String> {
    let digits = cell.trim_start_matches(|c: char| !c.is_ascii_digit());
    let index = digits
        .parse::<u8>()
        .map_err(|_| format!("invalid bucket '{cell}'"))?;
    MaturityBucket::try_from(index).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use treasury_core::MaturityUnit;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_bond_returns_crsp_columns() {
        let file = write_csv(
            "KYTREASNO,MCALDT,TMATDT_MONTHS,TMRETNUA\n\
             204046,2020-01-31,3.0,0.01\n\
             204047,2020-01-31,61.2,0.005\n",
        );

        let outcome = read_bond_returns(file.path(), &ReadOptions::default()).unwrap();

        assert!(outcome.is_clean());
        assert_eq!(outcome.records.len(), 2);
        let first = &outcome.records[0];
        assert_eq!(first.security_id.as_str(), "204046");
        assert_eq!(first.period, Period::new(2020, 1).unwrap());
        assert_relative_eq!(first.maturity_months, 3.0);
        assert_relative_eq!(first.total_return, 0.01);
        assert!(first.market_value.is_none());
    }

    #[test]
    fn test_read_bond_returns_converts_years() {
        let file = write_csv("id,period,ttm,ret,market_value\nA,2020-01,0.25,0.01,1500.50\n");
        let options = ReadOptions::new().with_maturity_unit(MaturityUnit::Years);

        let outcome = read_bond_returns(file.path(), &options).unwrap();

        assert_relative_eq!(outcome.records[0].maturity_months, 3.0);
        assert_eq!(outcome.records[0].market_value, Some(dec!(1500.50)));
    }

    #[test]
    fn test_read_bond_returns_isolates_bad_rows() {
        let file = write_csv(
            "security_id,period,maturity,return\n\
             A,2020-01,3,0.01\n\
             B,2020-13,3,0.01\n\
             C,2020-01,abc,0.01\n\
             D,2020-01,3,\n\
             E,2020-01,3,0.03\n",
        );

        let outcome = read_bond_returns(file.path(), &ReadOptions::default()).unwrap();

        assert_eq!(outcome.records.len(), 2);
        let lines: Vec<usize> = outcome.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(outcome.errors[1].reason.contains("maturity"));
        assert_eq!(outcome.errors[2].reason, "missing return");
    }

    #[test]
    fn test_read_daily_returns_with_itype() {
        let file = write_csv(
            "kytreasno,caldt,ttm,tdretnua,itype\n\
             1,20200102,30,0.001,2\n\
             2,20200102,3,0.0001,4.0\n\
             3,20200102,20,0.002,\n",
        );

        let outcome = read_daily_returns(file.path(), &ReadOptions::default()).unwrap();

        assert!(outcome.is_clean());
        assert_eq!(outcome.records[0].instrument_type, Some(InstrumentType::Note));
        assert_eq!(outcome.records[1].instrument_type, Some(InstrumentType::Bill));
        assert_eq!(outcome.records[2].instrument_type, None);
        assert_eq!(outcome.records[0].date, Date::from_ymd(2020, 1, 2).unwrap());
    }

    #[test]
    fn test_read_auctions_treasury_direct_columns() {
        let file = write_csv(
            "cusip,securityType,auctionDate,totalAccepted,totalTendered,bidToCoverRatio\n\
             912797LB1,Bill,2024-01-02T00:00:00,75000000000,215000000000,2.87\n\
             91282CJT9,Note,2024-01-08T00:00:00,,,\n",
        );

        let outcome = read_auctions(file.path()).unwrap();

        assert!(outcome.is_clean());
        let bill = &outcome.records[0];
        assert_eq!(bill.security_type, "Bill");
        assert_eq!(bill.auction_date, Some(Date::from_ymd(2024, 1, 2).unwrap()));
        assert_eq!(bill.total_accepted, Some(dec!(75000000000)));
        assert_eq!(bill.bid_to_cover_ratio, Some(2.87));
        assert!(outcome.records[1].total_accepted.is_none());
        assert!(bill.security_term.is_none());
        assert!(bill.issue_date.is_none());
    }

    #[test]
    fn test_read_auctions_term_and_issue_date() {
        let file = write_csv(
            "cusip,securityType,securityTerm,auctionDate,issueDate,securityTermWeekYear\n\
             91282CJV4,Note,2-Year,2024-01-24T00:00:00,2024-01-31T00:00:00,2-Year\n\
             91282CJW2,Note, 5-Year ,2024-01-25T00:00:00,,5-Year\n",
        );

        let outcome = read_auctions(file.path()).unwrap();

        assert!(outcome.is_clean());
        let two = &outcome.records[0];
        assert_eq!(two.security_term.as_deref(), Some("2-Year"));
        assert_eq!(two.issue_date, Some(Date::from_ymd(2024, 1, 31).unwrap()));
        assert_eq!(outcome.records[1].security_term.as_deref(), Some("5-Year"));
        assert!(outcome.records[1].issue_date.is_none());
    }

    #[test]
    fn test_parse_bucket() {
        assert_eq!(parse_bucket("3").unwrap().index(), 3);
        assert_eq!(parse_bucket("bucket_10").unwrap().index(), 10);
        assert!(parse_bucket("11").is_err());
        assert!(parse_bucket("x").is_err());
    }

    #[test]
    fn test_date_part() {
        assert_eq!(date_part("2020-01-31T00:00:00"), "2020-01-31");
        assert_eq!(date_part("2020-01-31 00:00:00"), "2020-01-31");
        assert_eq!(date_part("2020-01"), "2020-01");
    }
}
