//! Wire types for the NetEase Cloud Music web API.

use serde::Deserialize;

use crate::align::{LyricBlobs, SongCandidate};

/// `GET /api/search/get` response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub songs: Vec<SongRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SongRecord {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<Named>,
    #[serde(default)]
    pub album: Option<Named>,
    /// Track length in milliseconds.
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /api/song/lyric` response
#[derive(Debug, Deserialize)]
pub struct LyricResponse {
    pub lrc: Option<LyricBody>,
    pub tlyric: Option<LyricBody>,
}

#[derive(Debug, Deserialize)]
pub struct LyricBody {
    pub lyric: Option<String>,
}

impl SearchResponse {
    pub fn into_candidates(self) -> Option<Vec<SongCandidate>> {
        self.result
            .map(|r| r.songs.into_iter().map(SongCandidate::from).collect())
    }
}

impl From<SongRecord> for SongCandidate {
    fn from(song: SongRecord) -> Self {
        let artists = song
            .artists
            .into_iter()
            .filter_map(|a| a.name)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: song.id,
            name: song.name.unwrap_or_default(),
            artists,
            album: song.album.and_then(|a| a.name).unwrap_or_default(),
            duration_secs: song.duration as f64 / 1000.0,
        }
    }
}

impl From<LyricResponse> for LyricBlobs {
    fn from(resp: LyricResponse) -> Self {
        fn text(body: Option<LyricBody>) -> Option<String> {
            body.and_then(|b| b.lyric).filter(|s| !s.trim().is_empty())
        }

        Self {
            original: text(resp.lrc),
            translation: text(resp.tlyric),
        }
    }
}
