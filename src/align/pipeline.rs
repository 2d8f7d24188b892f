//! Multi-keyword search and ranking.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use super::{
    Alignment, CandidateSelector, LyricFetch, Mode, Query, ScoredResult, SongSearch, best_of,
};

/// Shared flag for stopping an alignment run between keyword variants.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Search keywords in the order they are tried.
///
/// Different phrasings surface different result sets on the catalog index, so
/// every variant is searched even after an earlier one produced matches.
pub fn keyword_variants(query: &Query) -> [String; 3] {
    let Query {
        title,
        artist,
        album,
        ..
    } = query;
    [
        format!("{artist} - {album} - {title}"),
        format!("{album} - {title}"),
        format!("{artist} - {title}"),
    ]
}

pub struct AlignmentPipeline<S, F> {
    search: S,
    fetch: F,
    selector: CandidateSelector,
}

impl<S: SongSearch, F: LyricFetch> AlignmentPipeline<S, F> {
    pub fn new(search: S, fetch: F, selector: CandidateSelector) -> Self {
        Self {
            search,
            fetch,
            selector,
        }
    }

    pub async fn align(&self, query: &Query, mode: Mode) -> Alignment {
        self.align_until(query, mode, &CancelFlag::default()).await
    }

    /// Run the pipeline, checking `cancel` before each keyword variant.
    ///
    /// A cancelled run still ranks whatever the finished variants produced.
    pub async fn align_until(&self, query: &Query, mode: Mode, cancel: &CancelFlag) -> Alignment {
        let mut collected = Vec::new();

        for keyword in keyword_variants(query) {
            if cancel.is_cancelled() {
                info!("alignment cancelled, skipping remaining keywords");
                break;
            }
            collected.extend(self.run_keyword(query, &keyword, mode).await);
        }

        let ranked = rank(collected);
        info!(title = %query.title, accepted = ranked.len(), "alignment finished");

        match mode {
            _ if ranked.is_empty() => Alignment::NotFound,
            Mode::RankAll => Alignment::Ranked(ranked),
            Mode::BestOnly => best_of(ranked)
                .map_or(Alignment::NotFound, |best| Alignment::Best(best.lyrics)),
        }
    }

    /// Search one keyword and select among its songs. In best-only mode at most
    /// the keyword's winner is returned.
    async fn run_keyword(&self, query: &Query, keyword: &str, mode: Mode) -> Vec<ScoredResult> {
        let timeout = self.selector.config().fetch_timeout;
        let songs = match tokio::time::timeout(timeout, self.search.search(keyword)).await {
            Ok(Ok(Some(songs))) if !songs.is_empty() => songs,
            Ok(Ok(_)) => {
                debug!(keyword, "no search results");
                return Vec::new();
            }
            Ok(Err(e)) => {
                warn!(keyword, "search failed: {e:#}");
                return Vec::new();
            }
            Err(_) => {
                warn!(keyword, "search timed out");
                return Vec::new();
            }
        };

        let results = match mode {
            Mode::RankAll => self.selector.select(&self.fetch, query, &songs).await,
            Mode::BestOnly => self
                .selector
                .select_best(&self.fetch, query, &songs)
                .await
                .into_iter()
                .collect(),
        };
        debug!(keyword, found = songs.len(), accepted = results.len(), "keyword searched");
        results
    }
}

/// Sort by score, best first, keeping discovery order among equal scores, and
/// drop repeated songs found through more than one keyword.
fn rank(mut results: Vec<ScoredResult>) -> Vec<ScoredResult> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    let mut seen = HashSet::new();
    results.retain(|r| seen.insert(r.song.id));
    results
}
