use uqr::input::PaymentForm;
use uqr::models::{LogEntry, TransactionStatus};
use uqr::services::{
    PollConfig, PollOutcome, RandomStatusSource, ScriptedStatusSource, StatusPoller,
    StatusSource, TransactionLog,
};
use uqr::session::Session;
use uqr::Money;

use std::{fs, path::Path, process::Command, sync::Arc, time::Duration};

use tempfile::TempDir;

use tokio_util::sync::CancellationToken;

const BIN: &str = env!("CARGO_BIN_EXE_upi-qr-generator");

fn fast_config() -> PollConfig {
    PollConfig {
        interval: Duration::ZERO,
        ..Default::default()
    }
}

fn build_session(log_path: &Path, source: Arc<dyn StatusSource>) -> Session {
    let log = Arc::new(TransactionLog::new(log_path));
    let poller = StatusPoller::new(source, log.clone(), fast_config());

    Session::new(log, poller)
}

fn read_entries(log_path: &Path) -> Vec<LogEntry> {
    fs::read_to_string(log_path)
        .unwrap()
        .lines()
        .map(|line| line.parse().unwrap())
        .collect()
}

#[tokio::test]
async fn submit_and_settle() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");
    let source = Arc::new(ScriptedStatusSource::new([
        TransactionStatus::Pending,
        TransactionStatus::Pending,
        TransactionStatus::Success,
    ]));
    let mut session = build_session(&log_path, source.clone());

    let transaction = session
        .submit(&PaymentForm::new("shop@icbc", "100.00"))
        .unwrap()
        .clone();

    assert_eq!(transaction.status(), TransactionStatus::Pending);
    assert!(!transaction.qr().png_base64().is_empty());

    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].upi_id.as_deref(), Some("shop@icbc"));
    assert_eq!(entries[0].amount, Some(Money(1_000_000)));
    assert_eq!(entries[0].tid, *transaction.id());
    assert_eq!(entries[0].status, None);
    assert!(fs::read_to_string(&log_path)
        .unwrap()
        .contains("| Amount: 100.0 INR |"));

    let outcome = session
        .await_settlement(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Settled(TransactionStatus::Success));
    assert_eq!(source.checks(), 3);

    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].upi_id, None);
    assert_eq!(entries[1].amount, None);
    assert_eq!(entries[1].tid, *transaction.id());
    assert_eq!(entries[1].status, Some(TransactionStatus::Success));

    // terminal status sticks, no further checks or log lines
    let outcome = session
        .await_settlement(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Settled(TransactionStatus::Success));
    assert_eq!(
        session.transaction().unwrap().status(),
        TransactionStatus::Success
    );
    assert_eq!(source.checks(), 3);
    assert_eq!(read_entries(&log_path).len(), 2);
}

#[tokio::test]
async fn random_source_settles_within_attempts() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");
    let mut session = build_session(&log_path, Arc::new(RandomStatusSource::seeded(2024)));

    let mut settled = 0;
    let mut exhausted = 0;

    for _ in 0..50 {
        session
            .submit(&PaymentForm::new("shop@icbc", "100.00"))
            .unwrap();

        match session
            .await_settlement(&CancellationToken::new())
            .await
            .unwrap()
        {
            PollOutcome::Settled(status) => {
                assert!(status.is_terminal());
                assert_eq!(session.transaction().unwrap().status(), status);
                settled += 1;
            }
            PollOutcome::Exhausted { attempts } => {
                assert_eq!(attempts, 10);
                assert_eq!(
                    session.transaction().unwrap().status(),
                    TransactionStatus::Pending
                );
                exhausted += 1;
            }
            PollOutcome::Cancelled { .. } => panic!("nothing cancelled this watch"),
        }
    }

    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 50 + settled);
    assert_eq!(settled + exhausted, 50);
    assert!(settled > exhausted);
}

#[test]
fn invalid_submissions_leave_no_trace() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");
    let mut session = build_session(&log_path, Arc::new(ScriptedStatusSource::default()));

    for (upi_id, amount) in [
        ("shop@icbc", "0"),
        ("shop@icbc", "-10"),
        ("shop", "10"),
        ("", "10"),
        ("shop@icbc", ""),
    ] {
        assert!(session.submit(&PaymentForm::new(upi_id, amount)).is_err());
    }

    assert!(session.transaction().is_none());
    assert!(!log_path.exists());
}

#[test]
fn cli_generate_without_polling() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("logs").join("transactions.log");
    let qr_path = dir.path().join("qr.png");

    let output = Command::new(BIN)
        .args(["generate", "--upi-id", "shop@icbc", "--amount", "100.00", "--no-poll"])
        .arg("--log-file")
        .arg(&log_path)
        .arg("--qr-out")
        .arg(&qr_path)
        .output()
        .unwrap();

    println!("{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("UPI ID: shop@icbc"));
    assert!(stdout.contains("Amount: 100.0 INR"));
    assert!(stdout.contains("Status: Pending"));
    assert!(stdout.contains("QR Code for Payment"));

    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 1);
    assert!(stdout.contains(&format!("Transaction ID: {}", entries[0].tid)));

    let png = fs::read(&qr_path).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn cli_generate_rejects_bad_amount() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");

    let output = Command::new(BIN)
        .args(["generate", "--upi-id", "shop@icbc", "--amount", "-5", "--no-poll"])
        .arg("--log-file")
        .arg(&log_path)
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Amount must be a positive number."));
    assert!(!log_path.exists());
}

#[test]
fn cli_export() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");

    fs::write(
        &log_path,
        "2024-03-09 14:05:07 | UPI ID: shop@icbc | Amount: 100.0 INR | TID: a1b2c3d4e5f6\n\
         2024-03-09 14:05:22 | UPI ID:  | Amount:  INR | TID: a1b2c3d4e5f6 | Status: Success\n",
    )
    .unwrap();

    let output = Command::new(BIN)
        .arg("export")
        .arg("--log-file")
        .arg(&log_path)
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines,
        vec![
            "timestamp,upi_id,amount,tid,status",
            "2024-03-09 14:05:07,shop@icbc,100.0,a1b2c3d4e5f6,",
            "2024-03-09 14:05:22,,,a1b2c3d4e5f6,Success",
        ]
    );
}

#[test]
fn cli_verbosity_controls_stderr() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");

    let run = |verbosity: Option<&str>| {
        let mut cmd = Command::new(BIN);
        cmd.env_remove("RUST_LOG").arg("log").arg("--log-file").arg(&log_path);
        if let Some(flag) = verbosity {
            cmd.arg(flag);
        }

        let output = cmd.output().unwrap();
        assert!(output.status.success());

        String::from_utf8(output.stderr).unwrap()
    };

    assert!(!run(None).contains("Application configured"));
    assert!(run(Some("-vv")).contains("Application configured"));
}

#[test]
fn cli_log_view() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");
    let line = "2024-03-09 14:05:07 | UPI ID: shop@icbc | Amount: 100.0 INR | TID: a1b2c3d4e5f6\n";
    fs::write(&log_path, line).unwrap();

    let output = Command::new(BIN)
        .arg("log")
        .arg("--log-file")
        .arg(&log_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains(line));
}
