use super::{Renderer, TimeSeriesChart};
use crate::error::{status_line, Result};
use crate::model::{AggregateTotals, DailyBucketSet, ScoreOutput, SCHEMA_VERSION};
use crate::score::day_rows;
use chrono::Utc;
use std::io::{self, Stderr, Stdout, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
    /// One pretty-printed document with totals and series.
    Document,
    /// One line per day carrying all four metrics.
    Lines,
}

/// Machine-readable output. Totals are held until the series arrive and both
/// are written together; status messages go to `err` as plain text.
pub struct JsonRenderer<O: Write = Stdout, E: Write = Stderr> {
    format: JsonFormat,
    username: String,
    out: O,
    err: E,
    chart: TimeSeriesChart,
    totals: AggregateTotals,
    visible: bool,
}

impl JsonRenderer {
    pub fn stdio(format: JsonFormat, username: &str) -> Self {
        Self::new(format, username, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> JsonRenderer<O, E> {
    pub fn new(format: JsonFormat, username: &str, out: O, err: E) -> Self {
        Self {
            format,
            username: username.to_string(),
            out,
            err,
            chart: TimeSeriesChart::new(),
            totals: AggregateTotals::default(),
            visible: true,
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_document(&mut self) -> io::Result<()> {
        let output = ScoreOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            username: self.username.clone(),
            totals: self.totals,
            series: self.chart.series().to_vec(),
        };
        serde_json::to_writer_pretty(&mut self.out, &output)?;
        writeln!(self.out)
    }

    fn write_lines(&mut self, buckets: &DailyBucketSet) -> io::Result<()> {
        for row in day_rows(buckets) {
            serde_json::to_writer(&mut self.out, &row)?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<O: Write, E: Write> Renderer for JsonRenderer<O, E> {
    fn show_error(&mut self, message: Option<&str>) -> Result<()> {
        if let Some(line) = status_line(message) {
            writeln!(self.err, "{line}")?;
        }
        Ok(())
    }

    fn show_loading(&mut self) -> Result<()> {
        self.chart.show_loading();
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
        if !self.visible {
            return Ok(());
        }

        match self.format {
            JsonFormat::Document => self.write_document()?,
            JsonFormat::Lines => self.write_lines(buckets)?,
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn buckets() -> DailyBucketSet {
        let mut set = DailyBucketSet::default();
        for (d, add) in [(6, 1), (5, 8)] {
            let day = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
            set.total.insert(day, add + 1);
            set.additions.insert(day, add);
            set.deletions.insert(day, 1);
            set.no_of_files.insert(day, 2);
        }
        set
    }

    fn totals() -> AggregateTotals {
        AggregateTotals {
            total: 11,
            additions: 9,
            deletions: 2,
            no_of_files: 4,
        }
    }

    #[test]
    fn document_holds_totals_and_sorted_series() {
        let mut r = JsonRenderer::new(JsonFormat::Document, "octocat", Vec::new(), Vec::new());
        r.show();
        r.render_totals(&totals()).unwrap();
        r.render_series(&buckets()).unwrap();

        let (out, _) = r.into_inner();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["username"], "octocat");
        assert_eq!(v["totals"]["noOfFiles"], 4);
        assert_eq!(v["series"].as_array().unwrap().len(), 4);
        assert_eq!(v["series"][1]["name"], "additions");
        assert_eq!(v["series"][1]["type"], "areaspline");
        assert_eq!(v["series"][1]["data"][0]["date"], "2024-03-05");
        assert_eq!(v["series"][1]["data"][0]["value"], 8);
        assert_eq!(v["series"][1]["data"][1]["value"], 1);
    }

    #[test]
    fn lines_emit_one_row_per_day() {
        let mut r = JsonRenderer::new(JsonFormat::Lines, "octocat", Vec::new(), Vec::new());
        r.render_totals(&totals()).unwrap();
        r.render_series(&buckets()).unwrap();

        let (out, _) = r.into_inner();
        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["date"], "2024-03-05");
        assert_eq!(lines[0]["additions"], 8);
        assert_eq!(lines[1]["total"], 2);
    }

    #[test]
    fn errors_are_plain_text_on_stderr() {
        let mut r = JsonRenderer::new(JsonFormat::Document, "octocat", Vec::new(), Vec::new());
        r.hide();
        r.show_error(Some("Forbidden")).unwrap();

        let (out, err) = r.into_inner();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "API error : Forbidden\n");
    }
}
