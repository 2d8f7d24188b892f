//! Metadata similarity scoring.

use super::{Query, SongCandidate};

/// Normalized edit-distance similarity in [0, 1].
///
/// 1.0 for identical strings (two empty strings included), 0.0 when exactly one
/// side is empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Unweighted mean of the title, artist and album similarities.
pub fn composite_score(query: &Query, candidate: &SongCandidate) -> f64 {
    let title = similarity(&query.title, &candidate.name);
    let artist = similarity(&query.artist, &candidate.artists);
    let album = similarity(&query.album, &candidate.album);
    (title + artist + album) / 3.0
}
