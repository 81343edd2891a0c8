use crate::model::{DailyBucketSet, Metric, Series, SeriesKind, SeriesPoint};
use crate::util::day_timestamp_ms;

/// Owned chart state. Updates always clear every series first, then add the
/// new ones and redraw once.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesChart {
    series: Vec<Series>,
    loading: bool,
    redraws: u64,
}

impl TimeSeriesChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_loading(&mut self) {
        self.loading = true;
    }

    pub fn hide_loading(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    /// Queue a series; nothing is drawn until [`TimeSeriesChart::redraw`].
    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn redraw(&mut self) {
        self.redraws += 1;
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, metric: Metric) -> Option<&Series> {
        self.series.iter().find(|s| s.name == metric)
    }

    pub fn update(&mut self, buckets: &DailyBucketSet) {
        self.clear();
        for metric in Metric::ALL {
            self.add_series(build_series(buckets, metric));
        }
        self.redraw();
        self.hide_loading();
    }
}

/// One metric's buckets as points sorted ascending by day.
pub fn build_series(buckets: &DailyBucketSet, metric: Metric) -> Series {
    let data = buckets
        .sorted(metric)
        .into_iter()
        .map(|(date, value)| SeriesPoint {
            date,
            timestamp: day_timestamp_ms(date),
            value,
        })
        .collect();

    Series {
        name: metric,
        kind: SeriesKind::AreaSpline,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn buckets() -> DailyBucketSet {
        let mut set = DailyBucketSet::default();
        for (d, v) in [(9, 4), (2, 7), (5, 1)] {
            let day = NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
            for metric in Metric::ALL {
                set.bucket_mut(metric).insert(day, v);
            }
        }
        set
    }

    #[test]
    fn series_points_are_sorted_by_day() {
        let series = build_series(&buckets(), Metric::Additions);
        let days: Vec<u32> = series.data.iter().map(|p| chrono::Datelike::day(&p.date)).collect();
        assert_eq!(days, vec![2, 5, 9]);
        assert!(series.data.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(series.kind, SeriesKind::AreaSpline);
    }

    #[test]
    fn update_replaces_previous_series() {
        let mut chart = TimeSeriesChart::new();
        chart.show_loading();
        chart.update(&buckets());
        chart.update(&buckets());

        assert_eq!(chart.series().len(), 4);
        assert_eq!(chart.redraws(), 2);
        assert!(!chart.is_loading());
        let names: Vec<Metric> = chart.series().iter().map(|s| s.name).collect();
        assert_eq!(names, Metric::ALL.to_vec());
    }

    #[test]
    fn update_with_empty_buckets_leaves_empty_series() {
        let mut chart = TimeSeriesChart::new();
        chart.update(&buckets());
        chart.update(&DailyBucketSet::default());
        assert!(chart.series().iter().all(|s| s.data.is_empty()));
    }
}
