use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Flat-file lyric store.
///
/// Lookups read `.lrc` files from one directory; confirmed lyrics are written
/// next to the media file they belong to.
#[derive(Debug, Clone)]
pub struct LyricStore {
    lrc_dir: PathBuf,
}

impl LyricStore {
    pub fn new(lrc_dir: impl Into<PathBuf>) -> Self {
        Self {
            lrc_dir: lrc_dir.into(),
        }
    }

    /// Find a local lyric whose file name starts with `title` and ends in `.lrc`.
    ///
    /// Matching files are tried in file name order. A missing directory is not
    /// an error, just a miss.
    pub fn lookup(&self, title: &str) -> anyhow::Result<Option<String>> {
        let entries = match fs::read_dir(&self.lrc_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %self.lrc_dir.display(), "lrc dir missing");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read dir {}", self.lrc_dir.display()));
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.starts_with(title) && name.ends_with(".lrc"))
            .collect();
        names.sort();

        let Some(name) = names.into_iter().next() else {
            return Ok(None);
        };
        let path = self.lrc_dir.join(&name);
        let content =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        tracing::info!(path = %path.display(), "using local lyrics");
        Ok(Some(content))
    }

    /// Write user-confirmed lyrics next to `media_path`, with its extension
    /// replaced by `.lrc`. Returns the written path.
    pub fn save_confirmed(&self, media_path: &Path, lyrics: &str) -> anyhow::Result<PathBuf> {
        if media_path.as_os_str().is_empty() || lyrics.is_empty() {
            anyhow::bail!("invalid request data: path and lyrics are required");
        }

        let lrc_path = lrc_path_for(media_path);
        fs::write(&lrc_path, lyrics).with_context(|| format!("write {}", lrc_path.display()))?;
        tracing::info!(path = %lrc_path.display(), "saved confirmed lyrics");
        Ok(lrc_path)
    }
}

/// `song.flac` -> `song.lrc`; a path without extension gains `.lrc`.
pub fn lrc_path_for(media_path: &Path) -> PathBuf {
    media_path.with_extension("lrc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_title_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Song - Artist.lrc"), "[00:01.00]local").unwrap();
        fs::write(dir.path().join("Song - Artist.txt"), "wrong").unwrap();
        fs::write(dir.path().join("Other.lrc"), "other").unwrap();

        let store = LyricStore::new(dir.path());
        assert_eq!(store.lookup("Song").unwrap().as_deref(), Some("[00:01.00]local"));
        assert!(store.lookup("Missing").unwrap().is_none());
    }

    #[test]
    fn test_lookup_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = LyricStore::new(dir.path().join("nope"));
        assert!(store.lookup("Song").unwrap().is_none());
    }

    #[test]
    fn test_save_confirmed() {
        let dir = tempfile::tempdir().unwrap();
        let store = LyricStore::new(dir.path());
        let media = dir.path().join("track.flac");

        let written = store.save_confirmed(&media, "[00:01.000]fixed").unwrap();
        assert_eq!(written, dir.path().join("track.lrc"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "[00:01.000]fixed");
    }

    #[test]
    fn test_save_confirmed_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LyricStore::new(dir.path());
        assert!(store.save_confirmed(&dir.path().join("a.mp3"), "").is_err());
        assert!(store.save_confirmed(Path::new(""), "x").is_err());
    }

    #[test]
    fn test_lrc_path_for() {
        assert_eq!(lrc_path_for(Path::new("/m/a.b.mp3")), PathBuf::from("/m/a.b.lrc"));
        assert_eq!(lrc_path_for(Path::new("/m/noext")), PathBuf::from("/m/noext.lrc"));
    }
}
