//! Per-keyword candidate selection.

use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, warn};

use super::score::composite_score;
use super::{LyricFetch, Query, ScoredResult, SongCandidate, best_of};
use crate::lyrics::{ParsedLyrics, merge};

/// Tunables for candidate selection.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Maximum absolute difference between query and candidate duration.
    pub duration_tolerance_secs: f64,
    /// How many duration-matching candidates are fetched per search.
    pub max_candidates: usize,
    /// Candidates with fewer distinct timed lines are rejected.
    pub min_timed_lines: usize,
    /// Upper bound for one lyric fetch.
    pub fetch_timeout: Duration,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            duration_tolerance_secs: 3.0,
            max_candidates: 3,
            min_timed_lines: 5,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    config: SelectorConfig,
}

impl CandidateSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Fetch, parse and score the leading candidates of one search.
    ///
    /// Results keep the search order of the candidates; ranking is left to the
    /// caller. Fetches run concurrently and a failing fetch only drops its own
    /// candidate.
    pub async fn select<F: LyricFetch>(
        &self,
        fetcher: &F,
        query: &Query,
        candidates: &[SongCandidate],
    ) -> Vec<ScoredResult> {
        let considered = candidates
            .iter()
            .filter(|c| self.duration_matches(query, c))
            .take(self.config.max_candidates);

        join_all(considered.map(|song| self.evaluate(fetcher, query, song)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// The highest scoring accepted candidate; the first one wins a tie.
    pub async fn select_best<F: LyricFetch>(
        &self,
        fetcher: &F,
        query: &Query,
        candidates: &[SongCandidate],
    ) -> Option<ScoredResult> {
        best_of(self.select(fetcher, query, candidates).await)
    }

    fn duration_matches(&self, query: &Query, candidate: &SongCandidate) -> bool {
        // An unset (zero, negative or non-finite) duration disables the filter.
        if !(query.duration_secs.is_finite() && query.duration_secs > 0.0) {
            return true;
        }
        let diff = (candidate.duration_secs - query.duration_secs).abs();
        diff <= self.config.duration_tolerance_secs
    }

    async fn evaluate<F: LyricFetch>(
        &self,
        fetcher: &F,
        query: &Query,
        song: &SongCandidate,
    ) -> Option<ScoredResult> {
        let fetched = tokio::time::timeout(self.config.fetch_timeout, fetcher.fetch(song.id)).await;
        let blobs = match fetched {
            Ok(Ok(blobs)) => blobs,
            Ok(Err(e)) => {
                warn!(song_id = song.id, "lyric fetch failed: {e:#}");
                return None;
            }
            Err(_) => {
                warn!(song_id = song.id, "lyric fetch timed out");
                return None;
            }
        };

        let original = ParsedLyrics::parse(blobs.original.as_deref());
        if original.timed_len() < self.config.min_timed_lines {
            debug!(
                song_id = song.id,
                timed_lines = original.timed_len(),
                "rejecting candidate with too few timed lines"
            );
            return None;
        }

        let translation = ParsedLyrics::parse(blobs.translation.as_deref());
        let lyrics = merge(&original, &translation);
        let score = composite_score(query, song);
        debug!(song_id = song.id, name = %song.name, score, "candidate accepted");

        Some(ScoredResult {
            song: song.clone(),
            lyrics,
            score,
        })
    }
}
