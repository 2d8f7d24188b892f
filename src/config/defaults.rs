use directories::ProjectDirs;
use std::path::PathBuf;

pub const SEARCH_URL: &str = "https://music.163.com/api/search/get";
pub const LYRIC_URL: &str = "https://music.163.com/api/song/lyric";
pub const SEARCH_LIMIT: u32 = 50;
pub const TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

pub const DURATION_TOLERANCE_SECS: f64 = 3.0;
pub const MAX_CANDIDATES: usize = 3;
pub const MIN_TIMED_LINES: usize = 5;

pub fn lrc_dir() -> PathBuf {
    ProjectDirs::from("dev", "lrc-align", "lrc-align")
        .map(|p| p.data_dir().join("lrcs"))
        .unwrap_or_else(|| std::env::temp_dir().join("lrc-align").join("lrcs"))
}
