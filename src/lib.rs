//! Concurrent scraper for ACB basketball box scores.
//!
//! [`AcbClient::scrape_range`] fetches one page per game ID with bounded
//! concurrency, retries and rate limiting, and normalizes every player row
//! and the game metadata into fixed-schema records ready for CSV export.

mod acb_scraper;
mod client;
pub mod config;
mod error;
pub mod model;
pub mod output;

pub use acb_scraper::{
    extract_game, normalize_game_info, normalize_row, normalize_table, parse_game, ColumnMap,
    ExtractedGame, FetchSettings, Layout, MetadataBlock, NormalizedTable, RawRow, RawTable,
    Transport, ACB_BASE_URL,
};
pub use client::AcbClient;
pub use error::{AcbError, Result};
pub use model::*;
