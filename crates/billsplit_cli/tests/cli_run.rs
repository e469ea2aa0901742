use billsplit_cli::{run, Cli};
use billsplit_core::{default_log_level, logging_status, AllocationPolicy};
use std::io::Write;
use tempfile::NamedTempFile;

fn bill_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn cli(file: &NamedTempFile) -> Cli {
    Cli {
        file: file.path().to_path_buf(),
        policy: None,
        json: false,
        log_level: None,
        log_dir: None,
    }
}

const RECORDED_COUNTS: &str = r#"{
    "total_bill": 100.0,
    "total_days": 30,
    "period_start": "2024-12-30",
    "members": [
        { "id": "1", "name": "DWIGHT", "days_in": 30, "days_out": 0 },
        { "id": "2", "name": "MYCE", "days_in": 20, "days_out": 10 }
    ]
}"#;

#[test]
fn table_lists_members_by_amount() {
    let file = bill_file(RECORDED_COUNTS);

    let output = run(&cli(&file)).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].contains("policy member_day"));
    assert!(lines[1].starts_with("DWIGHT"));
    assert!(lines[1].ends_with("60.00"));
    assert!(lines[2].starts_with("MYCE"));
    assert!(lines[2].ends_with("40.00"));
    assert_eq!(lines.last().copied(), Some("Difference: 0.00"));
}

#[test]
fn json_output_follows_policy_flag() {
    let file = bill_file(
        r#"{
            "total_bill": 10.0,
            "total_days": 2,
            "period_start": "2025-01-01",
            "members": [
                { "id": "m1", "name": "A", "days_in": 2, "days_out": 0 },
                { "id": "m2", "name": "B", "days_in": 1, "days_out": 1 }
            ]
        }"#,
    );
    let mut args = cli(&file);
    args.json = true;
    args.policy = Some(AllocationPolicy::DailyByAbsence);

    let output = run(&args).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["member_count"], 2);
    assert_eq!(value["breakdown"][0]["member_id"], "m1");
    assert_eq!(value["breakdown"][0]["amount"], 7.5);
    assert_eq!(value["breakdown"][1]["amount"], 2.5);
}

#[test]
fn absences_drive_day_counts() {
    let file = bill_file(
        r#"{
            "total_bill": 100.0,
            "total_days": 30,
            "period_start": "2025-01-01",
            "members": [
                { "id": "1", "name": "DWIGHT", "days_in": 1 },
                { "id": "2", "name": "ANGEL" }
            ],
            "absences": {
                "2025-01-02": ["2"],
                "2025-01-03": ["2"]
            }
        }"#,
    );
    let mut args = cli(&file);
    args.json = true;

    let output = run(&args).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["breakdown"][0]["member_id"], "1");
    assert_eq!(value["breakdown"][0]["days_in"], 30);
    assert_eq!(value["breakdown"][1]["days_in"], 28);
    assert_eq!(value["breakdown"][1]["days_out"], 2);
}

#[test]
fn absences_require_period_start() {
    let file = bill_file(
        r#"{
            "total_bill": 100.0,
            "total_days": 30,
            "members": [{ "id": "1", "name": "DWIGHT", "start_date": "2025-01-01" }],
            "absences": {}
        }"#,
    );

    let err = run(&cli(&file)).unwrap_err();

    assert!(err.to_string().contains("period_start"));
}

#[test]
fn invalid_period_is_reported_with_context() {
    let file = bill_file(
        r#"{
            "total_bill": 100.0,
            "total_days": 0,
            "period_start": "2025-01-01",
            "members": [{ "id": "1", "name": "DWIGHT" }]
        }"#,
    );

    let err = run(&cli(&file)).unwrap_err();

    assert_eq!(err.to_string(), "allocation failed");
    assert!(format!("{err:#}").contains("at least one day"));
}

#[test]
fn missing_file_is_reported() {
    let file = bill_file("{}");
    let mut args = cli(&file);
    args.file = file.path().with_extension("missing");

    let err = run(&args).unwrap_err();

    assert!(err.to_string().contains("failed to read bill file"));
}

#[test]
fn policy_flag_accepts_kebab_case() {
    use clap::Parser;

    let args = Cli::try_parse_from(["billsplit", "--policy", "daily-by-presence", "bill.json"])
        .unwrap();
    assert_eq!(args.policy, Some(AllocationPolicy::DailyByPresence));

    assert!(Cli::try_parse_from(["billsplit", "--policy", "weekly", "bill.json"]).is_err());
}

#[test]
fn log_level_without_log_dir_is_rejected() {
    use clap::Parser;

    let err = Cli::try_parse_from(["billsplit", "--log-level", "debug", "bill.json"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

    let args = Cli::try_parse_from([
        "billsplit",
        "--log-level",
        "debug",
        "--log-dir",
        "/tmp/billsplit-logs",
        "bill.json",
    ])
    .unwrap();
    assert_eq!(args.log_level.as_deref(), Some("debug"));
}

#[test]
fn log_dir_starts_logging_at_default_level() {
    let file = bill_file(RECORDED_COUNTS);
    let log_dir = tempfile::tempdir().unwrap();
    let mut args = cli(&file);
    args.log_dir = Some(log_dir.path().to_str().unwrap().to_string());

    let output = run(&args).unwrap();

    assert!(output.contains("DWIGHT"));
    let (level, active_dir) = logging_status().unwrap();
    assert_eq!(level, default_log_level());
    assert_eq!(active_dir, log_dir.path());
}
