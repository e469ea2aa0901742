use billsplit_core::{AbsenceLedger, AllocationPolicy, BillingPeriod, Member};
use chrono::NaiveDate;

#[test]
fn member_serializes_with_iso_start_date() {
    let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
    let member = Member::with_id("6", "ANGEL", start, 30).with_days(10, 13);

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["id"], "6");
    assert_eq!(json["start_date"], "2024-12-30");
    assert_eq!(json["days_in"], 10);
    assert_eq!(json["days_out"], 13);

    let decoded: Member = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, member);
}

#[test]
fn ledger_uses_date_keys() {
    let mut ledger = AbsenceLedger::new();
    let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    ledger.set_absences(["2", "1"], day, true);

    let json = serde_json::to_value(&ledger).unwrap();
    assert_eq!(json, serde_json::json!({ "2025-01-02": ["1", "2"] }));

    let decoded: AbsenceLedger = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, ledger);
}

#[test]
fn ledger_counts_only_period_dates() {
    let ledger: AbsenceLedger = serde_json::from_value(serde_json::json!({
        "2024-12-31": ["1"],
        "2025-01-01": ["1"],
        "2025-01-30": ["1", "2"],
        "2025-01-31": ["1"]
    }))
    .unwrap();
    let period = BillingPeriod::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 30);

    assert_eq!(ledger.absences_in("1", &period), 2);
    assert_eq!(ledger.absences_in("2", &period), 1);
    assert_eq!(ledger.absences_in("3", &period), 0);
}

#[test]
fn policy_uses_snake_case_labels() {
    assert_eq!(
        serde_json::to_value(AllocationPolicy::DailyByPresence).unwrap(),
        "daily_by_presence"
    );
    let policy: AllocationPolicy = serde_json::from_value("member_day".into()).unwrap();
    assert_eq!(policy, AllocationPolicy::MemberDay);
}
