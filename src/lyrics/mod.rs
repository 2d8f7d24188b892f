//! Lyrics module for parsing and merging synchronized lyrics
//!
//! This module provides:
//! - Timestamp normalization for the LRC dialects found in the wild
//! - LRC format parser producing a time-keyed map
//! - Bilingual merge of original and translated lyrics

pub mod merge;
pub mod parser;
pub mod timestamp;

pub use merge::merge;
pub use parser::ParsedLyrics;
