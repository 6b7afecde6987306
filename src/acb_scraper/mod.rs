pub(crate) mod batch;
pub(crate) mod extract;
pub(crate) mod fetch;
pub(crate) mod game_info;
pub(crate) mod rows;

pub use batch::parse_game;
pub use extract::{extract_game, ExtractedGame, Layout, MetadataBlock};
pub use fetch::{FetchSettings, Transport};
pub use game_info::normalize_game_info;
pub use rows::{normalize_row, normalize_table, ColumnMap, NormalizedTable, RawRow, RawTable};

use ::scraper::ElementRef;
use itertools::Itertools;

/// Default address of the ACB box-score pages; the game ID is appended as is.
pub const ACB_BASE_URL: &str = "https://www.acb.com/partido/estadisticas/id/";

/// All text below `element`, with runs of whitespace collapsed to one space.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).join(" ")
}
