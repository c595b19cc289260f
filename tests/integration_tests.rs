//! Integration tests for the BPT CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a bpt command
fn bpt() -> Command {
    Command::cargo_bin("bpt").unwrap()
}

/// Write a CSV export into a temp directory and return its path.
fn write_csv(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A small DCB export: header row, two assembled boards (one missing its
/// voltage readings), one unassembled, one "other", and an unrelated row.
fn dcb_csv(tmp: &TempDir) -> PathBuf {
    write_csv(
        tmp,
        "dcb.csv",
        "Serial,ID,Location,Assembled,Fused,PRBS,1.5V,2.5V,Burned_In,JD10,JD11,Comments\n\
         WVJCE-001,D1,Lab 2,yes,yes,yes,1.48,2.51,yes,yes,yes,\n\
         WVJCE-002,D2,Lab 2,yes,yes,yes,,,yes,yes,yes,voltage pending\n\
         WVJCE-003,D3,Storage,,,,,,,,,\n\
         WVJCE-004,D4,Lab 1,damaged,,,,,,,,bent connector\n\
         Some note that is not a board\n",
    )
}

/// A small backplane export with both variants and a QA failure.
fn backplane_csv(tmp: &TempDir) -> PathBuf {
    write_csv(
        tmp,
        "backplane.csv",
        "Type,Variant,SN,ID,Location,Visual_Inspection,Burn_In,QA,Assembly,Note\n\
         True,alpha,SN-01,B1,Bay 2,yes,yes,yes,yes,\n\
         True,alpha,SN-02,B2,Bay 2,yes,yes,,,rework\n\
         Mirror,beta,SN-03,B3,Bay 3,yes,yes,yes,yes,\n",
    )
}

/// A small CCM export: two 12A rolls, one 25A roll, one roll awaiting a count.
fn ccm_csv(tmp: &TempDir) -> PathBuf {
    write_csv(
        tmp,
        "ccm.csv",
        "Roll_ID,Location,CCM_Type,Master_or_Slave,Original_Count,Good_Count,Usage,Comment\n\
         12A01,Cabinet 4,foil,M,30,25,,\n\
         12A02,Cabinet 4,foil,S,20,10,,\n\
         25A01,Cabinet 5,foil,M,10,7,,\n\
         15M01,Cabinet 5,foil,M,12,,,count pending\n",
    )
}

/// A small LVR export with the block at the default anchor (serial in
/// column 6) and all eight bench tests affirmative on the first board.
fn lvr_csv(tmp: &TempDir) -> PathBuf {
    write_csv(
        tmp,
        "lvr.csv",
        ",,,,ID,Location,Serial,CCM,LVR_Type,V,F,UOC,UT,OT,OC,SL,SPI,Asm,SBC,Start,End,QA,Sub,Comment\n\
         ,,,,L1,Rack 3,WVJCZ-001,CCM-17,12A,yes,yes,yes,yes,yes,yes,yes,yes,yes,,,,,,\n\
         ,,,,L2,Rack 3,WVJEN-002,CCM-18,25A,yes,yes,yes,,yes,yes,yes,yes,yes,,,,,,\n\
         ,,,,L3,Rack 4,WVJES-003,CCM-19,15ms,yes,yes,yes,yes,yes,yes,yes,yes,yes,,,,,,\n",
    )
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    bpt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Board production tracking"));
}

#[test]
fn test_version_displays() {
    bpt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bpt"));
}

#[test]
fn test_unknown_command_fails() {
    bpt()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_file_fails() {
    bpt()
        .args(["ingest", "dcb", "no-such-export.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

// ============================================================================
// Ingest Command Tests
// ============================================================================

#[test]
fn test_ingest_dcb_counts_categories() {
    let tmp = TempDir::new().unwrap();
    let csv = dcb_csv(&tmp);

    bpt()
        .args(["ingest", "dcb"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("assembled"))
        .stdout(predicate::str::contains("2"))
        .stdout(predicate::str::contains("total"))
        .stdout(predicate::str::contains("4"));
}

#[test]
fn test_ingest_show_rejected_breaks_down_skips() {
    let tmp = TempDir::new().unwrap();
    let csv = dcb_csv(&tmp);

    // The header row and the free-text note both fail the serial check.
    bpt()
        .args(["ingest", "dcb", "--show-rejected"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("rejected"))
        .stdout(predicate::str::contains("unmatched identifier"));
}

#[test]
fn test_ingest_ccm_counts_good_units() {
    let tmp = TempDir::new().unwrap();
    let csv = ccm_csv(&tmp);

    // 12A counter sums good units across both rolls.
    bpt()
        .args(["ingest", "ccm"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("35"));
}

#[test]
fn test_ingest_lvr_buckets_subtypes() {
    let tmp = TempDir::new().unwrap();
    let csv = lvr_csv(&tmp);

    bpt()
        .args(["ingest", "lvr"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("12A"))
        .stdout(predicate::str::contains("other"))
        .stdout(predicate::str::contains("total"));
}

// ============================================================================
// Report Command Tests
// ============================================================================

#[test]
fn test_report_dcb_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let csv = dcb_csv(&tmp);

    bpt()
        .args(["report", "dcb"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("# DCB Production Report"))
        .stdout(predicate::str::contains("Unassembled Boards"))
        .stdout(predicate::str::contains("N/A"))
        .stdout(predicate::str::contains("No recorded comment."));
}

#[test]
fn test_report_dcb_to_file() {
    let tmp = TempDir::new().unwrap();
    let csv = dcb_csv(&tmp);
    let out = tmp.path().join("dcb-report.md");

    bpt()
        .args(["report", "dcb"])
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let report = fs::read_to_string(&out).unwrap();
    assert!(report.contains("| Metric"));
    assert!(report.contains("Initial QA passed"));
}

#[test]
fn test_report_backplane_qa_summary() {
    let tmp = TempDir::new().unwrap();
    let csv = backplane_csv(&tmp);

    bpt()
        .args(["report", "backplane"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("QA Summary"))
        .stdout(predicate::str::contains("mirror"))
        .stdout(predicate::str::contains("rework"));
}

#[test]
fn test_report_lvr_lists_boards_per_subtype() {
    let tmp = TempDir::new().unwrap();
    let csv = lvr_csv(&tmp);

    // "15ms" is not an exact subtype match, so that board lands in "other".
    bpt()
        .args(["report", "lvr"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("## 12A Boards"))
        .stdout(predicate::str::contains("## other Boards"))
        .stdout(predicate::str::contains("WVJCZ-001"));
}

#[test]
fn test_report_ccm_totals() {
    let tmp = TempDir::new().unwrap();
    let csv = ccm_csv(&tmp);

    bpt()
        .args(["report", "ccm"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Good Units by Roll Type"))
        .stdout(predicate::str::contains("42")) // 25 + 10 + 7
        .stdout(predicate::str::contains("12A01"));
}

// ============================================================================
// Chart Command Tests
// ============================================================================

#[test]
fn test_chart_dcb_emits_parseable_json() {
    let tmp = TempDir::new().unwrap();
    let csv = dcb_csv(&tmp);

    let output = bpt()
        .args(["chart", "dcb"])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());

    let chart: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(chart["family"], "DCB");
    assert_eq!(chart["total"], 4);
    assert_eq!(chart["categories"][0], 2); // assembled
    assert_eq!(chart["initial_qa"][0], 1); // only WVJCE-001 has both voltages
}

#[test]
fn test_chart_backplane_qa_tuple() {
    let tmp = TempDir::new().unwrap();
    let csv = backplane_csv(&tmp);

    let output = bpt()
        .args(["chart", "backplane"])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());

    let chart: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(chart["qa"][0], 1); // true passed
    assert_eq!(chart["qa"][1], 1); // true failed
    assert_eq!(chart["qa"][2], 1); // mirror passed
    assert_eq!(chart["qa"][3], 0); // mirror failed
}

#[test]
fn test_chart_ccm_to_file() {
    let tmp = TempDir::new().unwrap();
    let csv = ccm_csv(&tmp);
    let out = tmp.path().join("ccm-chart.json");

    bpt()
        .args(["chart", "ccm"])
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let chart: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(chart["rolls"], 3);
    assert_eq!(chart["good_units"][0], 35); // 12A
    assert_eq!(chart["good_units"][5], 7); // 25A
}
