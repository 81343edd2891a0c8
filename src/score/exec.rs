use super::aggregate;
use crate::config::Config;
use crate::error::{Result, ScoreError};
use crate::github::PublicEventsCollector;
use crate::model::{AggregateTotals, DailyBucketSet};
use crate::render::{ConsoleRenderer, JsonFormat, JsonRenderer, Renderer};
use anyhow::Context;
use std::process::ExitCode;

const LOG_TARGET: &str = "score";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    Console,
    Json,
    Ndjson,
    Interactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    pub commits: usize,
    pub totals: AggregateTotals,
    pub buckets: DailyBucketSet,
}

pub async fn exec(config: &Config, username: &str, mode: ScoreMode) -> anyhow::Result<ExitCode> {
    let collector = config.collector().context("Failed to set up the GitHub client")?;
    let username = username.trim();

    let result = match mode {
        ScoreMode::Console => {
            let mut renderer = ConsoleRenderer::stdio();
            get_commit_status(&collector, username, &mut renderer).await
        }
        ScoreMode::Json | ScoreMode::Ndjson => {
            let format = if mode == ScoreMode::Json {
                JsonFormat::Document
            } else {
                JsonFormat::Lines
            };
            let mut renderer = JsonRenderer::stdio(format, username);
            get_commit_status(&collector, username, &mut renderer).await
        }
        ScoreMode::Interactive => {
            let mut state = crate::tui::TuiState::new(username);
            let result = get_commit_status(&collector, username, &mut state).await;
            crate::tui::run(state).context("Interactive view failed")?;
            result
        }
    };

    Ok(exit_code(&result))
}

/// The whole "get commit status" action: hide the view, fetch, then either
/// report the failure or show totals and the chart.
pub async fn get_commit_status<R: Renderer + ?Sized>(
    collector: &PublicEventsCollector,
    username: &str,
    renderer: &mut R,
) -> Result<Scorecard> {
    renderer.hide();
    renderer.show_loading()?;

    let records = match collector.collect(username).await {
        Ok(records) => records,
        Err(err) => return report(renderer, err),
    };
    if records.is_empty() {
        return report(renderer, ScoreError::NoCommits);
    }

    let (totals, buckets) = aggregate(&records);
    log::info!(
        target: LOG_TARGET,
        "Aggregated {} commits over {} days",
        records.len(),
        buckets.days().len()
    );

    renderer.show_error(None)?;
    renderer.show();
    renderer.render_totals(&totals)?;
    renderer.render_series(&buckets)?;

    Ok(Scorecard {
        commits: records.len(),
        totals,
        buckets,
    })
}

fn report<R: Renderer + ?Sized>(renderer: &mut R, err: ScoreError) -> Result<Scorecard> {
    log::debug!(target: LOG_TARGET, "Score run ended without a chart: {err:?}");
    renderer.hide();
    renderer.show_error(Some(&err.to_string()))?;
    Err(err)
}

fn exit_code(result: &Result<Scorecard>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if e.is_empty_result() => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
