use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// One entry of a user's public activity feed. Only the fields the pipeline
/// reads are modelled; everything else in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Option<Vec<PushCommit>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushCommit {
    pub url: String,
    #[serde(default)]
    pub sha: Option<String>,
}

impl Event {
    /// Commits carried by a push payload; empty for every other event kind.
    pub fn push_commits(&self) -> &[PushCommit] {
        self.payload.commits.as_deref().unwrap_or(&[])
    }
}

/// A commit waiting to be fetched, stamped with its event's time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub url: String,
    pub sha: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changes: u64,
}

/// Detail document returned for a single commit URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatsPayload {
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub stats: LineStats,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One joined fan-out result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub created_at: DateTime<Utc>,
    pub sha: Option<String>,
    pub stats: CommitStatsPayload,
}

impl CommitRecord {
    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Total => self.stats.stats.total,
            Metric::Additions => self.stats.stats.additions,
            Metric::Deletions => self.stats.stats.deletions,
            Metric::NoOfFiles => self.stats.files.len() as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "total")]
    Total,
    #[serde(rename = "additions")]
    Additions,
    #[serde(rename = "deletions")]
    Deletions,
    #[serde(rename = "noOfFiles")]
    NoOfFiles,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Total,
        Metric::Additions,
        Metric::Deletions,
        Metric::NoOfFiles,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Total => "total",
            Metric::Additions => "additions",
            Metric::Deletions => "deletions",
            Metric::NoOfFiles => "noOfFiles",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Total => "Total",
            Metric::Additions => "Additions",
            Metric::Deletions => "Deletions",
            Metric::NoOfFiles => "Files",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub total: u64,
    pub additions: u64,
    pub deletions: u64,
    #[serde(rename = "noOfFiles")]
    pub no_of_files: u64,
}

impl AggregateTotals {
    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Total => self.total,
            Metric::Additions => self.additions,
            Metric::Deletions => self.deletions,
            Metric::NoOfFiles => self.no_of_files,
        }
    }

    pub fn add(&mut self, record: &CommitRecord) {
        self.total += record.metric(Metric::Total);
        self.additions += record.metric(Metric::Additions);
        self.deletions += record.metric(Metric::Deletions);
        self.no_of_files += record.metric(Metric::NoOfFiles);
    }
}

pub type DayBucket = HashMap<NaiveDate, u64>;

/// Per-day sums for each metric. Keys carry no ordering; use [`DailyBucketSet::sorted`]
/// for playback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyBucketSet {
    pub total: DayBucket,
    pub additions: DayBucket,
    pub deletions: DayBucket,
    pub no_of_files: DayBucket,
}

impl DailyBucketSet {
    pub fn bucket(&self, metric: Metric) -> &DayBucket {
        match metric {
            Metric::Total => &self.total,
            Metric::Additions => &self.additions,
            Metric::Deletions => &self.deletions,
            Metric::NoOfFiles => &self.no_of_files,
        }
    }

    pub fn bucket_mut(&mut self, metric: Metric) -> &mut DayBucket {
        match metric {
            Metric::Total => &mut self.total,
            Metric::Additions => &mut self.additions,
            Metric::Deletions => &mut self.deletions,
            Metric::NoOfFiles => &mut self.no_of_files,
        }
    }

    pub fn sorted(&self, metric: Metric) -> Vec<(NaiveDate, u64)> {
        let mut points: Vec<_> = self.bucket(metric).iter().map(|(d, v)| (*d, *v)).collect();
        points.sort_by(|a, b| a.0.cmp(&b.0));
        points
    }

    /// All days present in any bucket, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = Metric::ALL
            .iter()
            .flat_map(|m| self.bucket(*m).keys().copied())
            .collect();
        days.sort();
        days.dedup();
        days
    }

    pub fn is_empty(&self) -> bool {
        Metric::ALL.iter().all(|m| self.bucket(*m).is_empty())
    }
}

/// A rendered point: day, its UTC-midnight timestamp in milliseconds, and the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub timestamp: i64,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    AreaSpline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub name: Metric,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub total: u64,
    pub additions: u64,
    pub deletions: u64,
    #[serde(rename = "noOfFiles")]
    pub no_of_files: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub username: String,
    pub totals: AggregateTotals,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub username: String,
    pub entries: Vec<CommitRecord>,
}
