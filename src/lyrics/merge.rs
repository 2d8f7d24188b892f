//! Bilingual merge of an original lyric and its translation.

use std::collections::BTreeSet;

use super::parser::ParsedLyrics;

/// Merge original and translated lyrics into one LRC text block.
///
/// The original's unformatted lines come first. Then, for every timestamp of
/// either side in ascending order, the original line is emitted (with empty text
/// when only the translation has that timestamp), followed by the translated line
/// when the translation has non-empty text at exactly that timestamp.
pub fn merge(original: &ParsedLyrics, translation: &ParsedLyrics) -> String {
    let timestamps: BTreeSet<_> = original
        .lines
        .keys()
        .chain(translation.lines.keys())
        .collect();

    let mut out: Vec<String> = original.unformatted.clone();
    out.reserve(timestamps.len() * 2);

    for ts in timestamps {
        let text = original.lines.get(ts).map_or("", String::as_str);
        out.push(format!("{ts}{text}"));

        if let Some(translated) = translation.lines.get(ts)
            && !translated.is_empty()
        {
            out.push(format!("{ts}{translated}"));
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ParsedLyrics {
        ParsedLyrics::parse(Some(s))
    }

    #[test]
    fn test_original_precedes_translation() {
        let original = parse("[ti:Song]\n[00:02.00]world\n[00:01.00]hello");
        let translation = parse("[by:translator]\n[00:01.000]你好\n[00:02.00]世界");
        assert_eq!(
            merge(&original, &translation),
            "[ti:Song]\n[00:01.000]hello\n[00:01.000]你好\n[00:02.000]world\n[00:02.000]世界"
        );
    }

    #[test]
    fn test_empty_translation() {
        let original = parse("[ar:Artist]\n[00:03.5]c\n[00:01]a\n[00:02.25]b");
        let merged = merge(&original, &ParsedLyrics::default());
        assert_eq!(
            merged,
            "[ar:Artist]\n[00:01.000]a\n[00:02.250]b\n[00:03.500]c"
        );
    }

    #[test]
    fn test_translation_only_timestamp_keeps_timeline() {
        let original = parse("[00:01.00]a");
        let translation = parse("[00:01.00]\n[00:05.00]only translated");
        assert_eq!(
            merge(&original, &translation),
            "[00:01.000]a\n[00:05.000]\n[00:05.000]only translated"
        );
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(merge(&ParsedLyrics::default(), &ParsedLyrics::default()), "");
        let header_only = parse("[ti:x]\nplain");
        assert_eq!(merge(&header_only, &ParsedLyrics::default()), "[ti:x]\nplain");
    }
}
