//! Command-line front end for `billsplit_core`.
//!
//! # Responsibility
//! - Load a JSON bill file, run the allocation, render the breakdown.
//! - Keep rendering deterministic so output can be diffed.

use anyhow::{bail, Context, Result};
use billsplit_core::{
    calculate_bill, default_log_level, init_logging, AbsenceLedger, AllocationPolicy,
    BillSettings, BillSummary, BillingSession, Member,
};
use chrono::NaiveDate;
use clap::Parser;
use log::info;
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Split a shared bill among members by attendance.
#[derive(Debug, Parser)]
#[command(name = "billsplit", version)]
pub struct Cli {
    /// JSON bill file.
    pub file: PathBuf,
    /// Allocation policy; overrides the one in the file.
    #[arg(long)]
    pub policy: Option<AllocationPolicy>,
    /// Print the summary as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
    /// Log level for the file logs; needs `--log-dir`.
    #[arg(long, requires = "log_dir")]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long, env = "BILLSPLIT_LOG_DIR")]
    pub log_dir: Option<String>,
}

/// Bill file layout.
#[derive(Debug, Deserialize)]
pub struct BillFile {
    pub total_bill: f64,
    pub total_days: i64,
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    #[serde(default)]
    pub policy: Option<AllocationPolicy>,
    pub members: Vec<BillFileMember>,
    /// When present, day counts are derived from these dates.
    #[serde(default)]
    pub absences: Option<AbsenceLedger>,
}

#[derive(Debug, Deserialize)]
pub struct BillFileMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub days_in: Option<i64>,
    #[serde(default)]
    pub days_out: i64,
}

/// Runs one CLI invocation and returns the rendered report.
pub fn run(cli: &Cli) -> Result<String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let bill = load_bill_file(&cli.file)?;
    let policy = cli.policy.or(bill.policy).unwrap_or_default();
    let summary = summarize(&bill, policy)?;
    info!(
        "event=cli_report module=cli policy={} members={} status=ok",
        policy, summary.member_count
    );

    if cli.json {
        return serde_json::to_string_pretty(&summary).context("failed to encode summary");
    }
    Ok(render_table(&summary, policy))
}

pub fn load_bill_file(path: &Path) -> Result<BillFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bill file `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse bill file `{}`", path.display()))
}

/// Allocates `bill` with `policy`.
///
/// With an `absences` ledger the roster goes through a [`BillingSession`]
/// so day counts come from the dates; otherwise the recorded counts are used.
pub fn summarize(bill: &BillFile, policy: AllocationPolicy) -> Result<BillSummary> {
    match &bill.absences {
        Some(absences) => summarize_from_absences(bill, absences, policy),
        None => {
            let members = bill
                .members
                .iter()
                .map(|member| to_member(member, bill))
                .collect::<Result<Vec<_>>>()?;
            let calculation = calculate_bill(&members, bill.total_bill, bill.total_days, policy)
                .context("allocation failed")?;
            Ok(BillSummary::from_calculation(
                bill.total_bill,
                bill.total_days,
                &calculation,
            ))
        }
    }
}

fn summarize_from_absences(
    bill: &BillFile,
    absences: &AbsenceLedger,
    policy: AllocationPolicy,
) -> Result<BillSummary> {
    let Some(period_start) = bill.period_start else {
        bail!("period_start is required when absences are given");
    };
    let settings = BillSettings {
        total_bill: bill.total_bill,
        total_days: bill.total_days,
        period_start,
        policy,
    };
    let mut session = BillingSession::new(settings).context("invalid bill settings")?;
    for member in &bill.members {
        session
            .insert_member(to_member(member, bill)?)
            .with_context(|| format!("invalid member `{}`", member.id))?;
    }
    for date in absences.dates() {
        session
            .set_absences(&absences.absent_on(date), date, true)
            .with_context(|| format!("invalid absences on {date}"))?;
    }
    session.summary().context("allocation failed")
}

fn to_member(member: &BillFileMember, bill: &BillFile) -> Result<Member> {
    let Some(start_date) = member.start_date.or(bill.period_start) else {
        bail!(
            "member `{}` needs a start_date (or set period_start)",
            member.id
        );
    };
    let days_in = member
        .days_in
        .unwrap_or(bill.total_days.saturating_sub(member.days_out));
    Ok(
        Member::with_id(member.id.clone(), member.name.clone(), start_date, 0)
            .with_days(days_in, member.days_out),
    )
}

pub fn render_table(summary: &BillSummary, policy: AllocationPolicy) -> String {
    let mut out = String::new();
    let name_width = summary
        .breakdown
        .iter()
        .map(|line| line.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let _ = writeln!(
        out,
        "Bill {:.2} over {} day(s), {:.2}/day, policy {}",
        summary.total_bill, summary.total_days, summary.per_day, policy
    );
    for line in &summary.breakdown {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>3} in  {:>3} out  {:>12.2}",
            line.name, line.days_in, line.days_out, line.amount
        );
    }
    let _ = writeln!(out, "Total calculated: {:.2}", summary.total_calculated);
    let _ = writeln!(out, "Average per member: {:.2}", summary.average_per_member);
    let _ = write!(out, "Difference: {:.2}", summary.difference);
    out
}
