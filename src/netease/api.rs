use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;

use super::models::{LyricResponse, SearchResponse};
use crate::align::{LyricFetch, LyricBlobs, SongCandidate, SongSearch};
use crate::config::NeteaseConfig;

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    search_url: String,
    lyric_url: String,
    search_limit: u32,
}

/// NetEase Cloud Music client
#[derive(Debug, Clone)]
pub struct NeteaseClient {
    inner: Arc<Inner>,
}

impl NeteaseClient {
    pub fn new(cfg: &NeteaseConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&cfg.user_agent)?);
        headers.insert(REFERER, HeaderValue::from_static("https://music.163.com/"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                search_url: cfg.search_url.clone(),
                lyric_url: cfg.lyric_url.clone(),
                search_limit: cfg.search_limit,
            }),
        })
    }

    /// Search songs by keyword. `None` when the response carries no result block.
    pub async fn search_songs(&self, keyword: &str) -> anyhow::Result<Option<Vec<SongCandidate>>> {
        let url = format!(
            "{}?s={}&type=1&limit={}",
            self.inner.search_url,
            urlencoding::encode(keyword),
            self.inner.search_limit
        );

        let resp: SearchResponse = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .context("send search request")?
            .error_for_status()
            .context("search http status")?
            .json()
            .await
            .context("parse search json")?;
        Ok(resp.into_candidates())
    }

    /// Download the original and translated lyric of one song.
    pub async fn song_lyric(&self, song_id: u64) -> anyhow::Result<LyricBlobs> {
        let url = format!("{}?tv=-1&lv=-1&kv=-1&id={}", self.inner.lyric_url, song_id);

        let resp: LyricResponse = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .context("send lyric request")?
            .error_for_status()
            .context("lyric http status")?
            .json()
            .await
            .context("parse lyric json")?;
        Ok(resp.into())
    }
}

impl SongSearch for NeteaseClient {
    async fn search(&self, keyword: &str) -> anyhow::Result<Option<Vec<SongCandidate>>> {
        tracing::debug!(keyword, "netease search");
        self.search_songs(keyword).await
    }
}

impl LyricFetch for NeteaseClient {
    async fn fetch(&self, song_id: u64) -> anyhow::Result<LyricBlobs> {
        tracing::debug!(song_id, "netease lyric");
        self.song_lyric(song_id).await
    }
}
