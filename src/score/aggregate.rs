use crate::model::{AggregateTotals, CommitRecord, DailyBucketSet, DayRow, Metric};
use crate::util::day_key;
use chrono::NaiveDate;

/// Grand totals plus per-day sums for each metric.
///
/// Only sums are involved, so the result does not depend on record order.
/// Callers are expected to turn an empty list into "No commits available"
/// before getting here; an empty slice simply yields zeros and empty buckets.
pub fn aggregate(records: &[CommitRecord]) -> (AggregateTotals, DailyBucketSet) {
    let mut totals = AggregateTotals::default();
    let mut buckets = DailyBucketSet::default();

    for record in records {
        let day = day_key(&record.created_at);
        totals.add(record);

        for metric in Metric::ALL {
            *buckets.bucket_mut(metric).entry(day).or_insert(0) += record.metric(metric);
        }
    }

    (totals, buckets)
}

/// One row per day with all four metrics, ascending by day.
pub fn day_rows(buckets: &DailyBucketSet) -> Vec<DayRow> {
    let value = |metric: Metric, day: NaiveDate| buckets.bucket(metric).get(&day).copied().unwrap_or(0);

    buckets
        .days()
        .into_iter()
        .map(|date| DayRow {
            date,
            total: value(Metric::Total, date),
            additions: value(Metric::Additions, date),
            deletions: value(Metric::Deletions, date),
            no_of_files: value(Metric::NoOfFiles, date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommitStatsPayload, FileEntry, LineStats};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record(y: i32, m: u32, d: u32, hour: u32, additions: u64, deletions: u64, total: u64, files: usize) -> CommitRecord {
        CommitRecord {
            created_at: Utc.with_ymd_and_hms(y, m, d, hour, 30, 0).unwrap(),
            sha: None,
            stats: CommitStatsPayload {
                sha: None,
                stats: LineStats {
                    total,
                    additions,
                    deletions,
                },
                files: vec![FileEntry::default(); files],
            },
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<CommitRecord> {
        vec![
            record(2024, 3, 5, 9, 3, 1, 4, 2),
            record(2024, 3, 5, 17, 5, 0, 5, 1),
            record(2024, 3, 6, 11, 1, 1, 2, 1),
        ]
    }

    #[test]
    fn totals_and_buckets_for_two_days() {
        let (totals, buckets) = aggregate(&sample());

        assert_eq!(
            totals,
            AggregateTotals {
                total: 11,
                additions: 9,
                deletions: 2,
                no_of_files: 4,
            }
        );
        assert_eq!(buckets.sorted(Metric::Additions), vec![(date(2024, 3, 5), 8), (date(2024, 3, 6), 1)]);
        assert_eq!(buckets.sorted(Metric::Deletions), vec![(date(2024, 3, 5), 1), (date(2024, 3, 6), 1)]);
        assert_eq!(buckets.sorted(Metric::Total), vec![(date(2024, 3, 5), 9), (date(2024, 3, 6), 2)]);
        assert_eq!(buckets.sorted(Metric::NoOfFiles), vec![(date(2024, 3, 5), 3), (date(2024, 3, 6), 1)]);
    }

    #[test]
    fn order_does_not_matter() {
        let forward = sample();
        let mut reversed = sample();
        reversed.reverse();
        let mut rotated = sample();
        rotated.rotate_left(1);

        let expected = aggregate(&forward);
        assert_eq!(aggregate(&reversed), expected);
        assert_eq!(aggregate(&rotated), expected);
    }

    #[test]
    fn buckets_sum_to_grand_totals() {
        let mut records = sample();
        records.push(record(2023, 12, 31, 23, 40, 2, 42, 7));
        records.push(record(2024, 1, 1, 0, 0, 9, 9, 3));

        let (totals, buckets) = aggregate(&records);
        for metric in Metric::ALL {
            let sum: u64 = buckets.bucket(metric).values().sum();
            assert_eq!(sum, totals.get(metric), "{}", metric.name());
        }
    }

    #[test]
    fn same_day_of_month_in_two_months_is_two_buckets() {
        let records = vec![record(2024, 1, 5, 12, 2, 0, 2, 1), record(2024, 2, 5, 12, 3, 0, 3, 1)];

        let (_, buckets) = aggregate(&records);
        assert_eq!(buckets.sorted(Metric::Additions), vec![(date(2024, 1, 5), 2), (date(2024, 2, 5), 3)]);
    }

    #[test]
    fn same_weekday_in_two_weeks_is_two_buckets() {
        let records = vec![record(2024, 3, 4, 8, 1, 0, 1, 1), record(2024, 3, 11, 8, 1, 0, 1, 1)];

        let (_, buckets) = aggregate(&records);
        assert_eq!(buckets.bucket(Metric::Total).len(), 2);
    }

    #[test]
    fn empty_input_yields_zeros() {
        let (totals, buckets) = aggregate(&[]);
        assert_eq!(totals, AggregateTotals::default());
        assert!(buckets.is_empty());
    }

    #[test]
    fn day_rows_line_up_metrics() {
        let (_, buckets) = aggregate(&sample());
        let rows = day_rows(&buckets);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, date(2024, 3, 5));
        assert_eq!((rows[0].total, rows[0].additions, rows[0].deletions, rows[0].no_of_files), (9, 8, 1, 3));
        assert_eq!((rows[1].total, rows[1].additions, rows[1].deletions, rows[1].no_of_files), (2, 1, 1, 1));
    }
}
