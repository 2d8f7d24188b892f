use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::align::SelectorConfig;

pub mod defaults;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub netease: NeteaseConfig,
    pub align: AlignConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding local `.lrc` files, checked before any network lookup.
    pub lrc_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeteaseConfig {
    pub search_url: String,
    pub lyric_url: String,
    /// Number of songs requested per search.
    pub search_limit: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    pub duration_tolerance_secs: f64,
    pub max_candidates: usize,
    pub min_timed_lines: usize,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            lrc_dir: defaults::lrc_dir(),
        }
    }
}

impl Default for NeteaseConfig {
    fn default() -> Self {
        Self {
            search_url: defaults::SEARCH_URL.to_string(),
            lyric_url: defaults::LYRIC_URL.to_string(),
            search_limit: defaults::SEARCH_LIMIT,
            timeout_secs: defaults::TIMEOUT_SECS,
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            duration_tolerance_secs: defaults::DURATION_TOLERANCE_SECS,
            max_candidates: defaults::MAX_CANDIDATES,
            min_timed_lines: defaults::MIN_TIMED_LINES,
        }
    }
}

impl Config {
    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            duration_tolerance_secs: self.align.duration_tolerance_secs,
            max_candidates: self.align.max_candidates,
            min_timed_lines: self.align.min_timed_lines,
            fetch_timeout: Duration::from_secs(self.netease.timeout_secs),
        }
    }
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    write_config(cfg, &path)
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj =
        ProjectDirs::from("dev", "lrc-align", "lrc-align").context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = Config::default();
        write_config(&cfg, &path)?;
        tracing::info!(path = %path.display(), "wrote default config");
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

fn write_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = load(Some(path.as_path())).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.align.max_candidates, 3);
        assert_eq!(cfg.align.min_timed_lines, 5);
        assert_eq!(cfg.netease.search_limit, 50);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let raw = "[paths]\nlrc_dir = \"/music/lrc\"\n\n[align]\nmax_candidates = 5\n";
        fs::write(&path, raw).unwrap();

        let cfg = load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.paths.lrc_dir, PathBuf::from("/music/lrc"));
        assert_eq!(cfg.align.max_candidates, 5);
        assert_eq!(cfg.align.duration_tolerance_secs, 3.0);
        assert_eq!(cfg.netease.lyric_url, defaults::LYRIC_URL);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.netease.timeout_secs = 4;
        save(&cfg, Some(path.as_path())).unwrap();

        let loaded = load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.selector_config().fetch_timeout, Duration::from_secs(4));
    }
}
