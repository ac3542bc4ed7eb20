//! Offline snapshot checker.
//!
//! Reads a snapshot from a local file (first argument) or from the
//! configured DATA_URL, then prints what the daemon would see: parse
//! result, section coverage, and the aggregate cross-check.

use anyhow::{Context, Result};
use budgetview::fetch::{parse_snapshot_bytes, HttpSource, SnapshotSource};
use budgetview::format::{format_currency_opt, format_percent_opt};
use budgetview::state::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let fetched = match std::env::args().nth(1) {
        Some(path) => {
            let body =
                std::fs::read(&path).with_context(|| format!("cannot read {}", path))?;
            parse_snapshot_bytes(&body)?
        }
        None => {
            let source = HttpSource::new(&cfg.data_url, cfg.http_timeout_secs)?;
            println!("fetching {}", source.describe());
            source.fetch().await?
        }
    };

    let snap = &fetched.snapshot;
    println!("parsed {} bytes, hash {}", fetched.bytes, &fetched.body_hash[..16]);
    println!(
        "update stamp: {} {}",
        snap.update_date.as_deref().unwrap_or("-"),
        snap.update_time.as_deref().unwrap_or("-")
    );
    println!("units: {}", snap.units.len());
    println!("milestones: {}", snap.milestones.len());
    let risk_count = snap
        .risks
        .as_ref()
        .map(|r| r.critical.len() + r.high.len() + r.medium.len())
        .unwrap_or(0);
    println!("risks: {}", risk_count);

    match &snap.summary {
        None => println!("summary: missing"),
        Some(summary) => {
            println!(
                "summary: 총예산 {} / 총집행 {} / 집행률 {}",
                format_currency_opt(summary.total_budget),
                format_currency_opt(summary.total_executed),
                format_percent_opt(summary.execution_rate),
            );
            let report = summary.consistency_report();
            if report.ok {
                println!("consistency: ok");
            } else {
                println!("consistency: {} warning(s)", report.warnings.len());
                for warning in &report.warnings {
                    println!("  - {}", warning);
                }
            }
        }
    }

    Ok(())
}
