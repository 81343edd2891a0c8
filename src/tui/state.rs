use crate::error::{status_line, Result, LOADING_MESSAGE};
use crate::model::{AggregateTotals, DailyBucketSet, Metric};
use crate::render::{Renderer, TimeSeriesChart};

/// Everything the interactive view draws. Filled through [`Renderer`] while
/// fetching, then handed to [`super::run`].
pub struct TuiState {
    pub username: String,
    pub status: Option<String>,
    pub visible: bool,
    pub totals: AggregateTotals,
    pub chart: TimeSeriesChart,
    pub enabled: [bool; 4],
    pub show_help: bool,
}

impl TuiState {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            status: None,
            visible: false,
            totals: AggregateTotals::default(),
            chart: TimeSeriesChart::new(),
            enabled: [true; 4],
            show_help: false,
        }
    }

    pub fn is_enabled(&self, metric: Metric) -> bool {
        self.enabled[metric_index(metric)]
    }

    pub fn toggle(&mut self, metric: Metric) {
        let idx = metric_index(metric);
        self.enabled[idx] = !self.enabled[idx];
    }

    pub fn enable_all(&mut self) {
        self.enabled = [true; 4];
    }

    /// Show a single metric, moving to the next one in [`Metric::ALL`] when
    /// exactly one is already shown.
    pub fn cycle_solo(&mut self) {
        let next = match self.enabled.iter().filter(|on| **on).count() {
            1 => self.enabled.iter().position(|on| *on).map_or(0, |i| (i + 1) % self.enabled.len()),
            _ => 0,
        };
        self.enabled = [false; 4];
        self.enabled[next] = true;
    }
}

fn metric_index(metric: Metric) -> usize {
    Metric::ALL.iter().position(|m| *m == metric).unwrap_or(0)
}

impl Renderer for TuiState {
    fn show_error(&mut self, message: Option<&str>) -> Result<()> {
        self.status = status_line(message);
        Ok(())
    }

    fn show_loading(&mut self) -> Result<()> {
        self.chart.show_loading();
        self.status = Some(LOADING_MESSAGE.to_string());
        Ok(())
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn render_totals(&mut self, totals: &AggregateTotals) -> Result<()> {
        self.totals = *totals;
        Ok(())
    }

    fn render_series(&mut self, buckets: &DailyBucketSet) -> Result<()> {
        self.chart.update(buckets);
        Ok(())
    }
}
