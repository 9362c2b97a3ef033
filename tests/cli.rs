use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINANCE_TRACKER_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn add(data_dir: &TempDir, args: &[&str]) {
    fintrack(data_dir)
        .args(["transaction", "add"])
        .args(args)
        .assert()
        .success();
}

#[test]
fn init_creates_default_categories() {
    let data_dir = TempDir::new().unwrap();

    fintrack(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(data_dir.path().join("data/categories.json").exists());

    fintrack(&data_dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary").and(predicate::str::contains("Other Expenses")));
}

#[test]
fn add_and_list_transactions() {
    let data_dir = TempDir::new().unwrap();

    add(&data_dir, &["income", "3000", "-c", "Salary", "-m", "Paycheck", "-d", "2025-01-01"]);
    add(&data_dir, &["expense", "50", "-c", "food", "-m", "Groceries", "-d", "2025-01-15"]);

    fintrack(&data_dir)
        .args(["txn", "list", "--type", "expense"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Groceries")
                .and(predicate::str::contains("-$50.00"))
                .and(predicate::str::contains("Paycheck").not()),
        );
}

#[test]
fn rejects_invalid_transactions() {
    let data_dir = TempDir::new().unwrap();

    fintrack(&data_dir)
        .args(["transaction", "add", "expense", "0", "-c", "Food", "-m", "Nothing"])
        .assert()
        .failure();

    fintrack(&data_dir)
        .args(["transaction", "add", "expense", "10", "-c", "Nowhere", "-m", "Lost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found"));

    fintrack(&data_dir)
        .args(["transaction", "add", "income", "10", "-c", "Food", "-m", "Refund"])
        .assert()
        .failure();
}

#[test]
fn category_in_use_cannot_be_deleted() {
    let data_dir = TempDir::new().unwrap();

    add(&data_dir, &["expense", "20", "-c", "Food", "-m", "Lunch", "-d", "2025-02-02"]);

    fintrack(&data_dir)
        .args(["category", "delete", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is used by 1 transaction(s)"));

    fintrack(&data_dir)
        .args(["category", "delete", "Bills"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted category: Bills"));
}

#[test]
fn category_rename_carries_transactions() {
    let data_dir = TempDir::new().unwrap();

    add(&data_dir, &["expense", "20", "-c", "Food", "-m", "Lunch", "-d", "2025-02-02"]);

    fintrack(&data_dir)
        .args(["category", "edit", "Food", "--name", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transaction(s) moved from 'Food'"));

    fintrack(&data_dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn goal_deposit_reports_completion() {
    let data_dir = TempDir::new().unwrap();

    fintrack(&data_dir)
        .args(["goal", "create", "Trip", "100", "--deadline", "2030-01-01", "--initial", "60"])
        .assert()
        .success();

    fintrack(&data_dir)
        .args(["goal", "deposit", "trip", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$110.00 of $100.00").and(predicate::str::contains("Congratulations")));

    fintrack(&data_dir)
        .args(["goal", "deposit", "Trip", "-5"])
        .assert()
        .failure();

    fintrack(&data_dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"));
}

#[test]
fn report_show_and_document() {
    let data_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();

    add(&data_dir, &["income", "1000", "-c", "Salary", "-m", "Pay", "-d", "2024-06-01"]);
    add(&data_dir, &["expense", "400", "-c", "Housing", "-m", "Rent", "-d", "2024-06-02"]);

    fintrack(&data_dir)
        .args(["report", "show", "--period", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial Report: All time").and(predicate::str::contains("$600.00")));

    let csv_path = data_dir.path().join("summary.csv");
    fintrack(&data_dir)
        .args(["report", "show", "--period", "all", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported to"));
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Section,Name,Amount,Count,Percentage\n"));
    assert!(csv.contains("Summary,Net Balance,600.00,,\n"));
    assert!(csv.contains("Top Expense,Housing,400.00,1,100.00"));

    fintrack(&data_dir)
        .args(["report", "pdf", "--period", "all", "--output"])
        .arg(out_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("finance-report-all-"));

    let written: Vec<_> = std::fs::read_dir(out_dir.path()).unwrap().collect();
    assert_eq!(written.len(), 1);
    let content = std::fs::read_to_string(written[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains("FINANCIAL REPORT"));
    assert!(content.contains("Rent"));
    assert!(content.contains("Page 1 of"));
}

#[test]
fn dashboard_and_charts() {
    let data_dir = TempDir::new().unwrap();

    add(&data_dir, &["expense", "75", "-c", "Transport", "-m", "Train"]);

    fintrack(&data_dir)
        .args(["dashboard", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expenses by Category").and(predicate::str::contains("Train")));

    fintrack(&data_dir)
        .args(["chart", "trend", "--months", "3", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current balance:"));

    fintrack(&data_dir)
        .args(["chart", "monthly", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Income and Expenses"));
}

#[test]
fn export_and_restore() {
    let data_dir = TempDir::new().unwrap();
    let other_dir = TempDir::new().unwrap();
    let export_dir = TempDir::new().unwrap();
    let export_file = export_dir.path().join("backup.json");

    add(&data_dir, &["income", "250", "-c", "Freelance", "-m", "Logo", "-d", "2025-03-03"]);

    fintrack(&data_dir)
        .args(["export", "all", "--pretty"])
        .arg(&export_file)
        .assert()
        .success();

    fintrack(&other_dir)
        .args(["export", "restore", "--force"])
        .arg(&export_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data restored."));

    fintrack(&other_dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logo"));

    fintrack(&other_dir)
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data restored").and(predicate::str::contains("1 transactions")));
}
