//! NetEase Cloud Music catalog client
//!
//! Supplies song search and lyric download to the alignment pipeline.

pub mod api;
pub mod models;

pub use api::NeteaseClient;
