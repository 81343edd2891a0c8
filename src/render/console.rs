use super::{Renderer, TimeSeriesChart};
use crate::error::{status_line, Result, LOADING_MESSAGE};
use crate::model::{AggregateTotals, DailyBucketSet, Metric, Series};
use console::{style, StyledObject};
use std::io::{self, Stderr, Stdout, Write};

const LOG_TARGET: &str = "console";
const BAR_WIDTH: u64 = 40;

/// Plain terminal output: totals and per-metric bar charts go to `out`, the
/// status line goes to `err`. Nothing reaches `out` while hidden.
pub struct ConsoleRenderer<O: Write = Stdout, E: Write = Stderr> {
    out: O,
    err: E,
    chart: TimeSeriesChart,
    visible: bool,
}

impl ConsoleRenderer {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleRenderer<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            chart: TimeSeriesChart::new(),
            visible: true,
        }
    }

    pub fn chart(&self) -> &TimeSeriesChart {
        &self.chart
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_series(&mut self, series: &Series) -> io::Result<()> {
        let metric = series.name;
        writeln!(self.out, "\n{}", paint(metric, metric.label()).bold())?;
        writeln!(self.out, "{}", "─".repeat(60))?;

        if series.data.is_empty() {
            writeln!(self.out, "  no data")?;
            return Ok(());
        }

        let max = series.data.iter().map(|p| p.value).max().unwrap_or(1).max(1);
        for point in &series.data {
            let width = (point.value * BAR_WIDTH).div_ceil(max);
            writeln!(
                self.out,
                "{} {}{} {:>8}",
                point.date.format("%Y-%m-%d"),
                paint(metric, "█".repeat(width as usize)),
                " ".repeat((BAR_WIDTH - width) as usize),
                point.value
            )?;
        }
        Ok(())
    }
}

fn paint<D>(metric: Metric, value: D) -> StyledObject<D> {
    match metric {
        Metric::Total => style(value).cyan(),
        Metric::Additions => style(value).green(),
        Metric::Deletions => style(value).red(),
        Metric::NoOfFiles => style(value).yellow(),
    }
}

impl<O: Write, E: Write> Renderer for ConsoleRenderer<O, E> {
    fn show_error(&mut self, message: Option<&str>) -> Result<()> {
        if let Some(line) = status_line(message) {
            writeln!(self.err, "{}", style(line).red())?;
        }
        Ok(())
    }

    fn show_loading(&mut self) -> Result<()> {
        self.chart.show_loading();
        writeln!(self.err, "{}", style(LOADING_MESSAGE).dim())?;
        Ok(())
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn render_totals(&mut self, totals: &AggregateTotals) -> Result<()> {
        if !self.visible {
            log::debug!(target: LOG_TARGET, "Skipping totals while hidden");
            return Ok(());
        }

        writeln!(self.out, "{}", style("Commit Score").bold())?;
        writeln!(self.out, "{}", "─".repeat(60))?;
        for metric in Metric::ALL {
            writeln!(
                self.out,
                "{:<10} {}",
                format!("{}:", metric.label()),
                paint(metric, totals.get(metric))
            )?;
        }
        Ok(())
    }

    fn render_series(&mut self, buckets: &DailyBucketSet) -> Result<()> {
        self.chart.update(buckets);
        if !self.visible {
            log::debug!(target: LOG_TARGET, "Skipping chart while hidden");
            return Ok(());
        }

        let series = self.chart.series().to_vec();
        for s in &series {
            self.write_series(s)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn renderer() -> ConsoleRenderer<Vec<u8>, Vec<u8>> {
        ConsoleRenderer::new(Vec::new(), Vec::new())
    }

    fn text(bytes: &[u8]) -> String {
        console::strip_ansi_codes(&String::from_utf8_lossy(bytes)).to_string()
    }

    fn buckets() -> DailyBucketSet {
        let mut set = DailyBucketSet::default();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        set.total.insert(day, 9);
        set.additions.insert(day, 8);
        set.deletions.insert(day, 1);
        set.no_of_files.insert(day, 3);
        set
    }

    #[test]
    fn errors_go_to_stderr_with_prefix() {
        let mut r = renderer();
        r.show_error(Some("Not Found")).unwrap();
        r.show_error(Some("No data available")).unwrap();
        r.show_error(None).unwrap();

        let (out, err) = r.into_inner();
        assert!(out.is_empty());
        assert_eq!(text(&err), "API error : Not Found\nNo data available\n");
    }

    #[test]
    fn hidden_renderer_writes_nothing_to_stdout() {
        let mut r = renderer();
        r.hide();
        r.render_totals(&AggregateTotals::default()).unwrap();
        r.render_series(&buckets()).unwrap();

        assert!(!r.is_visible());
        assert_eq!(r.chart().series().len(), 4);
        let (out, _) = r.into_inner();
        assert!(out.is_empty());
    }

    #[test]
    fn visible_renderer_prints_totals_and_chart() {
        let mut r = renderer();
        r.show_loading().unwrap();
        r.show();
        r.render_totals(&AggregateTotals {
            total: 11,
            additions: 9,
            deletions: 2,
            no_of_files: 4,
        })
        .unwrap();
        r.render_series(&buckets()).unwrap();
        assert!(!r.chart().is_loading());

        let (out, err) = r.into_inner();
        let out = text(&out);
        assert!(out.contains("Additions: 9"));
        assert!(out.contains("Files:     4"));
        assert!(out.contains("2024-03-05"));
        assert!(out.contains("Deletions"));
        assert_eq!(text(&err), "Loading...\n");
    }
}
