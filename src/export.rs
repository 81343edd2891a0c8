use crate::config::Config;
use crate::error::{status_line, ScoreError};
use crate::model::{CommitRecord, ExportOutput, SCHEMA_VERSION};
use crate::score::aggregate;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::process::ExitCode;

pub async fn exec(config: &Config, username: &str, json: bool, ndjson: bool) -> anyhow::Result<ExitCode> {
    let collector = config.collector().context("Failed to set up the GitHub client")?;
    let username = username.trim();

    let mut records = match collector.collect(username).await {
        Ok(records) if records.is_empty() => return Ok(report(&ScoreError::NoCommits)),
        Ok(records) => records,
        Err(err) => return Ok(report(&err)),
    };
    sort_records(&mut records);

    if json {
        output_json(&records, username)?;
    } else if ndjson {
        output_ndjson(&records)?;
    } else {
        output_summary(&records);
    }

    Ok(ExitCode::SUCCESS)
}

fn report(err: &ScoreError) -> ExitCode {
    if let Some(line) = status_line(Some(&err.to_string())) {
        eprintln!("{}", style(line).red());
    }
    if err.is_empty_result() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Oldest first; commits pushed in the same event keep a stable order by sha.
pub fn sort_records(records: &mut [CommitRecord]) {
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.sha.cmp(&b.sha)));
}

fn output_json(records: &[CommitRecord], username: &str) -> anyhow::Result<()> {
    let output = ExportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        username: username.to_string(),
        entries: records.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(records: &[CommitRecord]) -> anyhow::Result<()> {
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

fn output_summary(records: &[CommitRecord]) {
    let (totals, buckets) = aggregate(records);

    println!("{}", style("Export Summary").bold());
    println!("{}", "─".repeat(50));
    println!("Total commits: {}", style(records.len()).cyan());
    println!("Active days: {}", style(buckets.days().len()).cyan());
    println!("Total files changed: {}", style(totals.no_of_files).cyan());
    println!("Total lines added: {}", style(totals.additions).green());
    println!("Total lines deleted: {}", style(totals.deletions).red());

    if let (Some(first), Some(last)) = (records.first(), records.last()) {
        println!(
            "Date range: {} to {}",
            style(first.created_at.format("%Y-%m-%d")).dim(),
            style(last.created_at.format("%Y-%m-%d")).dim()
        );
    }

    println!("\nUse --json or --ndjson flags to export the raw data.");
}
