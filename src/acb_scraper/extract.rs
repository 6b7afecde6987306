use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::acb_scraper::element_text;
use crate::acb_scraper::rows::{RawRow, RawTable};
use crate::error::{AcbError, Result};

/// CSS selectors locating the parts of a box-score page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub team_headers: &'static str,
    pub stats_tables: &'static str,
    pub table_rows: &'static str,
    pub table_cells: &'static str,
    /// Container of everything below; the rest are searched inside it.
    pub metadata_block: &'static str,
    pub schedule: &'static str,
    pub venue: &'static str,
    pub referees: &'static str,
    pub results: &'static str,
    pub partials: &'static str,
}

impl Layout {
    /// Current acb.com game statistics page.
    pub const ACB: Layout = Layout {
        team_headers: "div.cabecera_partido h4",
        stats_tables: "table[data-toggle='table-estadisticas']",
        table_rows: "tr",
        table_cells: "td",
        metadata_block: "div.cabecera_partido div.info_partido",
        schedule: "div.datos_fecha",
        venue: "span.clase_mostrar1280",
        referees: "div.datos_arbitros",
        results: "div.resultado",
        partials: "div.parciales_por_cuarto",
    };
}

impl Default for Layout {
    fn default() -> Self {
        Self::ACB
    }
}

/// Raw texts of the game metadata block, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    /// Pipe-separated round, date, time, venue and attendance line.
    pub schedule: String,
    /// Venue from its own element, when the page has one.
    pub venue: Option<String>,
    pub referees: String,
    /// Text of every result element, home first.
    pub results: Vec<String>,
    /// Whitespace-separated `home|away` quarter scores.
    pub partials: String,
}

/// The structural pieces of one game page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedGame {
    pub home_team: String,
    pub away_team: String,
    pub home_table: RawTable,
    pub away_table: RawTable,
    /// `None` when the page has no metadata block.
    pub metadata: Option<MetadataBlock>,
}

/// Locate team names, statistics tables and metadata in a game page.
///
/// Missing team headers or tables fail the whole game; a missing metadata
/// block only leaves the game info empty.
pub fn extract_game(html: &str, game_id: u32, layout: &Layout) -> Result<ExtractedGame> {
    let document = Html::parse_document(html);

    let team_selector = Selector::parse(layout.team_headers)?;
    let teams = document
        .select(&team_selector)
        .map(|e| element_text(&e))
        .collect_vec();
    let [home_team, away_team] = match teams.as_slice() {
        [home, away, ..] => [home.clone(), away.clone()],
        _ => return Err(AcbError::TeamHeadersNotFound { found: teams.len() }),
    };
    debug!(game_id, home_team, away_team, "teams found");

    let table_selector = Selector::parse(layout.stats_tables)?;
    let tables = document.select(&table_selector).collect_vec();
    let (home_table, away_table) = match tables.as_slice() {
        [home, away, ..] => (read_table(home, layout)?, read_table(away, layout)?),
        _ => {
            return Err(AcbError::StatsTablesNotFound {
                found: tables.len(),
            })
        }
    };

    let block_selector = Selector::parse(layout.metadata_block)?;
    let metadata = match document.select(&block_selector).next() {
        Some(block) => Some(read_metadata(&block, layout)?),
        None => {
            warn!(game_id, "metadata block not found, game info left empty");
            None
        }
    };

    Ok(ExtractedGame {
        home_team,
        away_team,
        home_table,
        away_table,
        metadata,
    })
}

fn read_table(table: &ElementRef, layout: &Layout) -> Result<RawTable> {
    let row_selector = Selector::parse(layout.table_rows)?;
    let cell_selector = Selector::parse(layout.table_cells)?;
    let rows = table
        .select(&row_selector)
        .map(|row| {
            row.select(&cell_selector)
                .map(|cell| element_text(&cell))
                .collect::<RawRow>()
        })
        .collect_vec();
    Ok(RawTable { rows })
}

fn read_metadata(block: &ElementRef, layout: &Layout) -> Result<MetadataBlock> {
    let first_text = |selector: &str| -> Result<Option<String>> {
        let selector = Selector::parse(selector)?;
        Ok(block.select(&selector).next().map(|e| element_text(&e)))
    };

    let results_selector = Selector::parse(layout.results)?;
    let results = block
        .select(&results_selector)
        .map(|e| element_text(&e))
        .collect_vec();

    Ok(MetadataBlock {
        schedule: first_text(layout.schedule)?.unwrap_or_default(),
        venue: first_text(layout.venue)?.filter(|v| !v.is_empty()),
        referees: first_text(layout.referees)?.unwrap_or_default(),
        results,
        partials: first_text(layout.partials)?.unwrap_or_default(),
    })
}
