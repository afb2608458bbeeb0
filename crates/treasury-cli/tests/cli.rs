//! End-to-end tests of the `treasury` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// HELPERS
// =============================================================================

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        ws.write("pipeline.toml", "");
        ws
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Command isolated from the user's configuration and log settings.
    fn treasury(&self) -> Command {
        let mut cmd = Command::cargo_bin("treasury").unwrap();
        cmd.env_remove("RUST_LOG")
            .env_remove("TREASURY_CONFIG")
            .arg("--config")
            .arg(self.path("pipeline.toml"));
        cmd
    }
}

const MONTHLY: &str = "\
security_id,period,maturity,return,market_value
A,2020-01,3.0,0.01,100
B,2020-01,3.0,0.03,300
C,2020-01,61.0,0.05,100
D,2020-02,28.0,0.002,100
";

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn approx_eq(value: &serde_json::Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|v| (v - expected).abs() < 1e-12)
}

// =============================================================================
// BUCKETS AND HELP
// =============================================================================

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("treasury")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("aggregate"))
        .stdout(predicate::str::contains("correlation"));
}

#[test]
fn test_buckets_csv() {
    let ws = Workspace::new();
    ws.treasury()
        .args(["buckets", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "bucket,label,lower_months,upper_months",
        ))
        .stdout(predicate::str::contains("10,4.5-5.0Y"));
}

// =============================================================================
// AGGREGATE
// =============================================================================

#[test]
fn test_aggregate_equal_weight_to_stdout() {
    let ws = Workspace::new();
    let input = ws.write("monthly.csv", MONTHLY);

    let rows = json_stdout(ws.treasury().arg("aggregate").arg(&input).args(["-f", "json"]));
    let rows = rows.as_array().unwrap();

    // Bond C is out of range; D sits alone in bucket 5.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["bucket"], 1);
    assert_eq!(rows[0]["period"], "2020-01");
    assert_eq!(rows[0]["constituents"], 2);
    assert!(approx_eq(&rows[0]["return"], 0.02));
    assert_eq!(rows[1]["bucket"], 5);
    assert_eq!(rows[1]["period"], "2020-02");
}

#[test]
fn test_aggregate_value_weight_flag() {
    let ws = Workspace::new();
    let input = ws.write("monthly.csv", MONTHLY);

    let rows = json_stdout(
        ws.treasury()
            .arg("aggregate")
            .arg(&input)
            .args(["--weighting", "value-weight", "--format", "json"]),
    );

    assert!(approx_eq(&rows[0]["return"], 0.025));
}

#[test]
fn test_aggregate_weighting_from_config_file() {
    let ws = Workspace::new();
    let input = ws.write("monthly.csv", MONTHLY);
    ws.write("pipeline.toml", "weighting = \"value-weight\"\n");

    let rows = json_stdout(ws.treasury().arg("aggregate").arg(&input).args(["-f", "json"]));

    assert!(approx_eq(&rows[0]["return"], 0.025));
}

#[test]
fn test_aggregate_writes_parquet_and_reports_counts() {
    let ws = Workspace::new();
    let input = ws.write("monthly.csv", MONTHLY);
    let output = ws.path("out/portfolio.parquet");

    ws.treasury()
        .arg("aggregate")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Input records,4"))
        .stdout(predicate::str::contains("Out of range,1"))
        .stdout(predicate::str::contains("Rows written,2"));

    assert!(output.exists());

    let read = treasury_ext_file::read_portfolio_returns(&output).unwrap();
    assert_eq!(read.records.len(), 2);
    assert!(read.is_clean());
}

#[test]
fn test_aggregate_reports_malformed_rows_and_continues() {
    let ws = Workspace::new();
    let input = ws.write(
        "monthly.csv",
        "security_id,period,maturity,return\nA,2020-01,3.0,0.01\nB,2020-01,abc,0.02\n",
    );

    ws.treasury()
        .arg("aggregate")
        .arg(&input)
        .args(["-f", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped 1 malformed row"))
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_aggregate_without_input_fails() {
    let ws = Workspace::new();
    ws.treasury()
        .arg("aggregate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required argument: input"));
}

#[test]
fn test_aggregate_unsupported_format_fails() {
    let ws = Workspace::new();
    let input = ws.write("monthly.txt", MONTHLY);
    ws.treasury()
        .arg("aggregate")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

// =============================================================================
// COMPOUND
// =============================================================================

#[test]
fn test_compound_daily_to_monthly() {
    let ws = Workspace::new();
    let input = ws.write(
        "daily.csv",
        "\
kytreasno,caldt,tmatdt_months,tdretnua,itype
1,2020-01-02,20,0.01,2
1,2020-01-03,20,0.02,2
2,2020-01-02,2,0.001,4
",
    );
    let output = ws.path("monthly.csv");

    ws.treasury()
        .arg("compound")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filtered (type),1"));

    let read =
        treasury_ext_file::read_bond_returns(&output, &treasury_ext_file::ReadOptions::new())
            .unwrap();
    assert_eq!(read.records.len(), 1);
    assert!((read.records[0].total_return - 0.0302).abs() < 1e-12);
}

// =============================================================================
// ANALYTICS
// =============================================================================

fn portfolio_file(ws: &Workspace) -> PathBuf {
    ws.write(
        "portfolio.csv",
        "\
bucket,period,return,constituents
1,2020-01,0.01,3
1,2020-02,0.02,3
1,2020-03,-0.01,3
2,2020-01,0.02,4
2,2020-02,0.04,4
2,2020-03,-0.02,4
",
    )
}

#[test]
fn test_summary_json() {
    let ws = Workspace::new();
    let input = portfolio_file(&ws);

    let rows = json_stdout(ws.treasury().arg("summary").arg(&input).args(["-f", "json"]));

    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["count"], 3);
    assert!(approx_eq(&rows[0]["max"], 0.02));
    assert_eq!(rows[1]["first_period"], "2020-01");
}

#[test]
fn test_summary_defaults_to_configured_output() {
    let ws = Workspace::new();
    let input = portfolio_file(&ws);
    ws.write(
        "pipeline.toml",
        &format!("output = {:?}\n", input.to_string_lossy()),
    );

    ws.treasury()
        .arg("summary")
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2020-03"));
}

#[test]
fn test_cumulative_final() {
    let ws = Workspace::new();
    let input = portfolio_file(&ws);

    let rows = json_stdout(
        ws.treasury()
            .arg("cumulative")
            .arg(&input)
            .args(["--final", "-f", "json"]),
    );
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["period"], "2020-03");
    assert!(approx_eq(&rows[0]["growth"], 1.01 * 1.02 * 0.99));
}

#[test]
fn test_correlation_csv() {
    let ws = Workspace::new();
    let input = portfolio_file(&ws);

    ws.treasury()
        .arg("correlation")
        .arg(&input)
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bucket,1,2\n"))
        .stdout(predicate::str::is_match(r"\n2,(1|0\.99\d*),(1|0\.99\d*)\n").unwrap());
}

#[test]
fn test_auctions_filter_by_type() {
    let ws = Workspace::new();
    let input = ws.write(
        "auctions.csv",
        "\
cusip,securityType,auctionDate,totalAccepted,totalTendered,bidToCoverRatio
A,Note,2020-01-10,100,250,2.5
B,Note,2020-02-10,300,900,3.0
C,Bill,2020-01-07,50,150,3.0
",
    );

    let rows = json_stdout(
        ws.treasury()
            .arg("auctions")
            .arg(&input)
            .args(["--security-type", "note", "-f", "json"]),
    );
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["security_type"], "Note");
    assert_eq!(rows[0]["auctions"], 2);
    assert_eq!(rows[0]["accepted_count"], 2);
    assert!(approx_eq(&rows[0]["bid_to_cover_mean"], 2.75));
}

const AUCTIONS_WITH_TERMS: &str = "\
cusip,securityType,securityTerm,auctionDate,issueDate
N1,Note,2-Year,2024-01-24,2024-01-31
N2,Note,2-Year,2024-02-26,2024-02-29
N5,Note,5-Year,2024-01-25,2024-01-31
B1,Bill,4-Week,2024-01-02,
";

#[test]
fn test_run_status_on_the_run_as_of() {
    let ws = Workspace::new();
    let input = ws.write("auctions.csv", AUCTIONS_WITH_TERMS);

    let rows = json_stdout(
        ws.treasury()
            .arg("run-status")
            .arg(&input)
            .args(["--on-the-run", "--as-of", "2024-02-15", "-f", "json"]),
    );
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["cusip"], "N1");
    assert_eq!(rows[0]["status"], "on-the-run");
    assert_eq!(rows[1]["security_term"], "5-Year");
}

#[test]
fn test_run_status_writes_file() {
    let ws = Workspace::new();
    let input = ws.write("auctions.csv", AUCTIONS_WITH_TERMS);
    let output = ws.path("out/run_status.csv");

    ws.treasury()
        .arg("run-status")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Securities,3"))
        .stdout(predicate::str::contains("Skipped,1"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("N2,Note,2-Year,2024-02-29,0,on-the-run"));
    assert!(text.contains("N1,Note,2-Year,2024-01-31,1,off-the-run"));
}

#[test]
fn test_aggregate_all_out_of_range_writes_readable_csv() {
    let ws = Workspace::new();
    let input = ws.write(
        "monthly.csv",
        "security_id,period,maturity,return\nA,2020-01,61.0,0.01\n",
    );
    let output = ws.path("portfolio.csv");

    ws.treasury()
        .arg("aggregate")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows written,0"));

    ws.treasury()
        .arg("summary")
        .arg(&output)
        .args(["-f", "json"])
        .assert()
        .success();
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_init_then_show() {
    let ws = Workspace::new();
    let path = ws.path("nested/pipeline.toml");

    let init = |force: bool| {
        let mut cmd = Command::cargo_bin("treasury").unwrap();
        cmd.env_remove("TREASURY_CONFIG")
            .arg("--config")
            .arg(&path)
            .args(["config", "init"]);
        if force {
            cmd.arg("--force");
        }
        cmd
    };

    init(false).assert().success();
    assert!(Path::new(&path).exists());

    init(false)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    init(true).assert().success();

    let config = json_stdout(
        Command::cargo_bin("treasury")
            .unwrap()
            .arg("--config")
            .arg(&path)
            .args(["config", "show", "--format", "json"]),
    );
    assert_eq!(config["weighting"], "equal-weight");
    assert_eq!(config["layout"], "standard");
    assert_eq!(config["parallel"], true);
}

#[test]
fn test_config_show_rejects_bad_file() {
    let ws = Workspace::new();
    ws.write("pipeline.toml", "weighting = \"median\"\n");

    ws.treasury()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
