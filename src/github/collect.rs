use super::HttpJsonFetcher;
use crate::error::{Result, ScoreError};
use crate::model::{CommitRecord, CommitRef, CommitStatsPayload, Event};
use futures::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;

const LOG_TARGET: &str = "collect";

/// Fetches a user's public events and the stats of every pushed commit in them.
#[derive(Debug, Clone)]
pub struct PublicEventsCollector {
    fetcher: HttpJsonFetcher,
    api_base: Url,
    show_progress: bool,
}

impl PublicEventsCollector {
    pub fn new(fetcher: HttpJsonFetcher, api_base: Url) -> Self {
        Self {
            fetcher,
            api_base,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// `{api_base}/users/{username}/events/public`, with the username as one escaped segment.
    pub fn events_url(&self, username: &str) -> Result<Url> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ScoreError::InvalidUsername(username.to_string()));
        }

        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ScoreError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["users", username, "events", "public"]);
        Ok(url)
    }

    /// Joined `(created_at, stats)` records for every pushed commit.
    ///
    /// An empty events list is [`ScoreError::NoData`] and stops before any
    /// commit is fetched. Events without commits are skipped, so a feed of
    /// only non-push events yields `Ok` with no records. The first failing
    /// commit fetch fails the whole collection.
    pub async fn collect(&self, username: &str) -> Result<Vec<CommitRecord>> {
        let url = self.events_url(username)?;
        log::info!(target: LOG_TARGET, "Fetching public events for '{}'", username.trim());

        let events: Vec<Event> = self.fetcher.fetch(url).await?;
        if events.is_empty() {
            log::info!(target: LOG_TARGET, "No public events found");
            return Err(ScoreError::NoData);
        }

        let refs = commit_refs(&events);
        log::info!(
            target: LOG_TARGET,
            "{} events, {} pushed commits to fetch",
            events.len(),
            refs.len()
        );

        let pb = self.progress_bar(refs.len() as u64);
        let fetches = refs.into_iter().map(|commit| {
            let pb = pb.clone();
            async move {
                let stats = self.fetch_commit(&commit).await?;
                pb.inc(1);
                Ok::<_, ScoreError>(CommitRecord {
                    created_at: commit.created_at,
                    sha: commit.sha.or_else(|| stats.sha.clone()),
                    stats,
                })
            }
        });

        let joined = try_join_all(fetches).await;
        pb.finish_and_clear();

        let records = joined?;
        log::debug!(target: LOG_TARGET, "Joined {} commit records", records.len());
        Ok(records)
    }

    async fn fetch_commit(&self, commit: &CommitRef) -> Result<CommitStatsPayload> {
        let url = Url::parse(&commit.url)
            .map_err(|e| ScoreError::InvalidUrl(format!("{}: {e}", commit.url)))?;
        self.fetcher.fetch(url).await
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress || len == 0 {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Fetching commit stats...");
        pb
    }
}

/// Every commit of every push event, stamped with its event's time.
pub fn commit_refs(events: &[Event]) -> Vec<CommitRef> {
    events
        .iter()
        .flat_map(|event| {
            if event.push_commits().is_empty() {
                log::debug!(
                    target: LOG_TARGET,
                    "Skipping {} event at {}",
                    event.kind.as_deref().unwrap_or("untyped"),
                    event.created_at
                );
            }
            event.push_commits().iter().map(move |commit| CommitRef {
                url: commit.url.clone(),
                sha: commit.sha.clone(),
                created_at: event.created_at,
            })
        })
        .collect()
}
