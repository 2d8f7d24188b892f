//! LRC timestamp normalization
//!
//! Lyric providers disagree on how the fractional part of a timestamp is written:
//! [03:45.50], [03:45.500], [03:45:500] and [03:45] all show up in the wild.
//! Every variant is folded into one canonical `[MM:SS.mmm]` key so that original
//! and translated lines can be matched by time.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TIMED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{2}):(\d{2})(?:[.:](\d{1,3}))?\](.*)$").unwrap()
});

/// A lyric timestamp with millisecond precision.
///
/// Field order matters: the derived `Ord` compares minutes, then seconds, then
/// milliseconds, which is the numeric order of the timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalTimestamp {
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl CanonicalTimestamp {
    pub fn new(minutes: u32, seconds: u32, millis: u32) -> Self {
        Self {
            minutes,
            seconds,
            millis,
        }
    }

    /// Build a timestamp from the raw digit groups of a timed line.
    ///
    /// The fraction is right-padded with zeros (or truncated) to three digits,
    /// so "5" and "50" both mean 500ms.
    fn from_parts(minutes: &str, seconds: &str, fraction: Option<&str>) -> Option<Self> {
        let minutes = minutes.parse().ok()?;
        let seconds = seconds.parse().ok()?;
        let millis = match fraction {
            Some(f) => {
                let mut digits: String = f.chars().take(3).collect();
                while digits.len() < 3 {
                    digits.push('0');
                }
                digits.parse().ok()?
            }
            None => 0,
        };
        Some(Self::new(minutes, seconds, millis))
    }
}

impl fmt::Display for CanonicalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}.{:03}]",
            self.minutes, self.seconds, self.millis
        )
    }
}

/// A timed lyric line: canonical timestamp plus the text after the bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub timestamp: CanonicalTimestamp,
    pub text: String,
}

/// Result of classifying one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedLine {
    Timed(LyricLine),
    /// Anything that is not a timed line (metadata tags, blank lines, plain text).
    Unformatted(String),
}

/// Classify a single raw lyric line.
///
/// Never fails: a line that does not look like `[MM:SS(.fff)]text` is returned
/// verbatim as [`NormalizedLine::Unformatted`].
pub fn normalize_line(line: &str) -> NormalizedLine {
    let timed = TIMED_LINE.captures(line).and_then(|caps| {
        let timestamp = CanonicalTimestamp::from_parts(
            caps.get(1)?.as_str(),
            caps.get(2)?.as_str(),
            caps.get(3).map(|m| m.as_str()),
        )?;
        let text = caps.get(4).map_or("", |m| m.as_str()).to_string();
        Some(LyricLine { timestamp, text })
    });

    match timed {
        Some(line) => NormalizedLine::Timed(line),
        None => NormalizedLine::Unformatted(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(line: &str) -> LyricLine {
        match normalize_line(line) {
            NormalizedLine::Timed(l) => l,
            NormalizedLine::Unformatted(raw) => panic!("expected timed line, got {raw:?}"),
        }
    }

    #[test]
    fn test_fraction_variants() {
        assert_eq!(timed("[03:45.5]x").timestamp.to_string(), "[03:45.500]");
        assert_eq!(timed("[03:45.50]x").timestamp.to_string(), "[03:45.500]");
        assert_eq!(timed("[03:45:500]x").timestamp.to_string(), "[03:45.500]");
        assert_eq!(timed("[03:45]x").timestamp.to_string(), "[03:45.000]");
        assert_eq!(timed("[00:01.07]x").timestamp.to_string(), "[00:01.070]");
    }

    #[test]
    fn test_text_kept_verbatim() {
        let line = timed("[00:12.34]  Hello world ");
        assert_eq!(line.text, "  Hello world ");
        assert_eq!(timed("[00:12.34]").text, "");
    }

    #[test]
    fn test_unformatted_lines() {
        for raw in ["[by:artist]", "", "plain text", "[1:23.45]short minutes", "[00:12.3456]x"] {
            assert_eq!(normalize_line(raw), NormalizedLine::Unformatted(raw.to_string()));
        }
    }

    #[test]
    fn test_ordering_is_numeric() {
        let a = timed("[00:59.999]a").timestamp;
        let b = timed("[01:00]b").timestamp;
        assert!(a < b);
        assert_eq!(timed("[01:02.3]x").timestamp, timed("[01:02:300]y").timestamp);
        assert_eq!(b, CanonicalTimestamp::new(1, 0, 0));
    }
}
