use assert_cmd::Command;
use predicates::str::contains;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

const HEADER: &str = "Date,Description,Original Description,Amount,\
Transaction Type,Category,Account Name,Labels,Notes\n";

#[test]
fn script_mode_runs_basic_flow() {
    let temp = tempdir().unwrap();
    let mut file = File::create(temp.path().join("jan.csv")).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    file.write_all(
        b"1/01/2024,COFFEE SHOP,raw,4.50,debit,Dining,Checking,,\n\
1/02/2024,Online Payment Thank You,raw,100.00,debit,Transfer,Checking,,\n",
    )
    .unwrap();

    let input = "files\nload jan.csv\nbreakdown\ntoggle 0\nexit\n";

    let mut cmd = Command::cargo_bin("spendview_cli").unwrap();
    cmd.env("SPENDVIEW_CLI_SCRIPT", "1")
        .env("SPENDVIEW_CSV_DIR", temp.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("jan.csv"))
        .stdout(contains("Total spent: $4.50"))
        .stdout(contains("Dining"))
        .stdout(contains("Row 0 is now ignored."))
        .stdout(contains("Total spent: $0.00"));
}

#[test]
fn script_mode_reports_errors_without_crashing() {
    let temp = tempdir().unwrap();
    let mut file = File::create(temp.path().join("jan.csv")).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    file.write_all(b"1/01/2024,COFFEE SHOP,raw,4.50,debit,Dining,Checking,,\n")
        .unwrap();

    let input = "toggle 0\nload jan.csv\ntoggle 9\nsummary\nexit\n";

    let mut cmd = Command::cargo_bin("spendview_cli").unwrap();
    cmd.env("SPENDVIEW_CLI_SCRIPT", "1")
        .env("SPENDVIEW_CSV_DIR", temp.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("no export loaded"))
        .stdout(contains("out of range"))
        .stdout(contains("Total spent: $4.50"));
}
