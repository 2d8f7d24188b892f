//! LRC format parser
//!
//! Splits a raw lyric blob into a time-keyed map plus the lines that carry no
//! timestamp:
//! [ti:Title]          <- unformatted
//! [00:12.34]Hello     <- timed, keyed as [00:12.340]

use std::collections::BTreeMap;

use super::timestamp::{CanonicalTimestamp, NormalizedLine, normalize_line};

/// Parsed lyrics keyed by canonical timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLyrics {
    /// Timed lines, sorted by timestamp. A later line with the same timestamp
    /// replaces the earlier one.
    pub lines: BTreeMap<CanonicalTimestamp, String>,
    /// Lines that did not match the timestamp pattern, in input order.
    pub unformatted: Vec<String>,
    /// How many timed lines were overwritten by a later duplicate timestamp.
    pub collisions: usize,
}

impl ParsedLyrics {
    /// Parse a lyric blob. An absent blob parses to an empty result.
    pub fn parse(content: Option<&str>) -> Self {
        let mut parsed = Self::default();
        let Some(content) = content else {
            return parsed;
        };

        for line in content.lines() {
            match normalize_line(line) {
                NormalizedLine::Timed(timed) => {
                    if parsed.lines.insert(timed.timestamp, timed.text).is_some() {
                        parsed.collisions += 1;
                    }
                }
                NormalizedLine::Unformatted(raw) => parsed.unformatted.push(raw),
            }
        }

        if parsed.collisions > 0 {
            tracing::debug!(
                collisions = parsed.collisions,
                "duplicate timestamps overwritten"
            );
        }

        parsed
    }

    /// Number of distinct timed lines.
    pub fn timed_len(&self) -> usize {
        self.lines.len()
    }
}
