//! Candidate search, scoring and ranking
//!
//! The pipeline talks to the outside world only through [`SongSearch`] and
//! [`LyricFetch`], so it can run against the NetEase client or in-memory stubs.

pub mod pipeline;
pub mod score;
pub mod select;

pub use pipeline::{AlignmentPipeline, CancelFlag};
pub use select::{CandidateSelector, SelectorConfig};

use serde::Serialize;

/// What the caller is looking for.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Track length in seconds. Zero disables duration filtering.
    pub duration_secs: f64,
}

/// Song metadata as reported by the catalog search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongCandidate {
    pub id: u64,
    pub name: String,
    /// All artist names joined with ", ".
    pub artists: String,
    pub album: String,
    pub duration_secs: f64,
}

/// Raw lyric text for one song. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricBlobs {
    pub original: Option<String>,
    pub translation: Option<String>,
}

/// A candidate that passed selection, with its merged lyrics and score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub song: SongCandidate,
    pub lyrics: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    RankAll,
    BestOnly,
}

/// Outcome of one alignment run.
#[derive(Debug, Clone, PartialEq)]
pub enum Alignment {
    /// All accepted candidates, best first.
    Ranked(Vec<ScoredResult>),
    /// Merged lyrics of the single best candidate.
    Best(String),
    NotFound,
}

/// Catalog search by free-text keyword.
///
/// `Ok(None)` and `Ok(Some(vec![]))` both mean "nothing found".
#[allow(async_fn_in_trait)]
pub trait SongSearch {
    async fn search(&self, keyword: &str) -> anyhow::Result<Option<Vec<SongCandidate>>>;
}

/// Lyric download for a catalog song id.
#[allow(async_fn_in_trait)]
pub trait LyricFetch {
    async fn fetch(&self, song_id: u64) -> anyhow::Result<LyricBlobs>;
}

impl<T: SongSearch + ?Sized> SongSearch for &T {
    async fn search(&self, keyword: &str) -> anyhow::Result<Option<Vec<SongCandidate>>> {
        (**self).search(keyword).await
    }
}

impl<T: LyricFetch + ?Sized> LyricFetch for &T {
    async fn fetch(&self, song_id: u64) -> anyhow::Result<LyricBlobs> {
        (**self).fetch(song_id).await
    }
}

/// Pick the highest scoring result; the first one wins a tie.
pub(crate) fn best_of(results: Vec<ScoredResult>) -> Option<ScoredResult> {
    results.into_iter().fold(None, |best, r| match best {
        Some(b) if b.score >= r.score => Some(b),
        _ => Some(r),
    })
}


#[cfg(test)]
mod tests {
    use super::stub::song;
    use super::*;

    fn scored(id: u64, score: f64) -> ScoredResult {
        ScoredResult {
            song: song(id, "t", "a", "b", 1.0),
            lyrics: String::new(),
            score,
        }
    }

    #[test]
    fn test_best_of_prefers_first_on_tie() {
        let best = best_of(vec![scored(1, 0.5), scored(2, 0.9), scored(3, 0.9)]).unwrap();
        assert_eq!(best.song.id, 2);
        assert!(best_of(Vec::new()).is_none());
    }
}
