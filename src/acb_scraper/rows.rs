use tracing::{debug, warn};

use crate::model::PlayerStatRecord;

/// Sequence of cell texts of one table row.
pub type RawRow = Vec<String>;

/// All rows of one team's statistics table, header and footer included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

/// Positions of the statistics in a box-score row, plus how many header and
/// footer rows surround the player rows.
///
/// Markup changes on the site should only ever require a new constant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub header_rows: usize,
    pub footer_rows: usize,
    /// Rows with fewer cells than this are skipped.
    pub min_cells: usize,
    /// Jersey number, prefixed with the starter marker for starters.
    pub jersey: usize,
    pub name: usize,
    pub minutes: usize,
    pub points: usize,
    pub two_pointers: usize,
    pub two_point_pct: usize,
    pub three_pointers: usize,
    pub three_point_pct: usize,
    pub free_throws: usize,
    pub free_throw_pct: usize,
    pub total_rebounds: usize,
    /// Combined `D+O` rebounds cell.
    pub rebounds_split: usize,
    pub assists: usize,
    pub steals: usize,
    pub turnovers: usize,
    pub c: usize,
    pub blocks_for: usize,
    pub blocks_against: usize,
    pub dunks: usize,
    pub fouls_committed: usize,
    pub fouls_received: usize,
    pub plus_minus: usize,
    pub valuation: usize,
}

impl ColumnMap {
    /// Current acb.com statistics table.
    pub const ACB: ColumnMap = ColumnMap {
        header_rows: 2,
        footer_rows: 4,
        min_cells: 23,
        jersey: 0,
        name: 1,
        minutes: 2,
        points: 3,
        two_pointers: 4,
        two_point_pct: 5,
        three_pointers: 6,
        three_point_pct: 7,
        free_throws: 8,
        free_throw_pct: 9,
        total_rebounds: 10,
        rebounds_split: 11,
        assists: 12,
        steals: 13,
        turnovers: 14,
        c: 15,
        blocks_for: 16,
        blocks_against: 17,
        dunks: 18,
        fouls_committed: 19,
        fouls_received: 20,
        plus_minus: 21,
        valuation: 22,
    };

    /// The player rows of `table`: a fixed number of header and footer rows
    /// are cut off, whatever they contain.
    pub fn player_rows<'t>(&self, table: &'t RawTable) -> &'t [RawRow] {
        let end = table.rows.len().saturating_sub(self.footer_rows);
        table.rows.get(self.header_rows..end).unwrap_or_default()
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::ACB
    }
}

const STARTER_MARKER: char = '*';

/// Player records of one table and the number of rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTable {
    pub records: Vec<PlayerStatRecord>,
    pub skipped: usize,
}

/// Normalize the player rows of a team's table.
pub fn normalize_table(
    table: &RawTable,
    team: &str,
    game_id: u32,
    columns: &ColumnMap,
) -> NormalizedTable {
    let mut normalized = NormalizedTable::default();
    for row in columns.player_rows(table) {
        match normalize_row(row, team, game_id, columns) {
            Some(record) => normalized.records.push(record),
            None => normalized.skipped += 1,
        }
    }
    debug!(
        game_id,
        team,
        players = normalized.records.len(),
        skipped = normalized.skipped,
        "table normalized"
    );
    normalized
}

/// Turn one raw row into a [`PlayerStatRecord`].
///
/// Returns `None` for rows with fewer than `columns.min_cells` cells. A row
/// with an empty minutes cell is a player who did not play: all of their
/// statistics are replaced by zero-forms.
pub fn normalize_row(
    row: &[String],
    team: &str,
    game_id: u32,
    columns: &ColumnMap,
) -> Option<PlayerStatRecord> {
    if row.len() < columns.min_cells {
        warn!(
            game_id,
            team,
            cells = row.len(),
            "incomplete player row, skipping"
        );
        return None;
    }

    let cell = |index: usize| row.get(index).cloned().unwrap_or_default();

    let jersey = cell(columns.jersey);
    let starter = if jersey.starts_with(STARTER_MARKER) {
        STARTER_MARKER.to_string()
    } else {
        String::new()
    };
    let (defensive_rebounds, offensive_rebounds) = split_rebounds(&cell(columns.rebounds_split));

    let mut record = PlayerStatRecord {
        game_id,
        team: team.to_string(),
        starter,
        jersey: jersey.trim_matches(STARTER_MARKER).trim().to_string(),
        name: cell(columns.name),
        minutes: cell(columns.minutes),
        points: cell(columns.points),
        two_pointers: cell(columns.two_pointers),
        two_point_pct: cell(columns.two_point_pct),
        three_pointers: cell(columns.three_pointers),
        three_point_pct: cell(columns.three_point_pct),
        free_throws: cell(columns.free_throws),
        free_throw_pct: cell(columns.free_throw_pct),
        defensive_rebounds,
        offensive_rebounds,
        total_rebounds: cell(columns.total_rebounds),
        assists: cell(columns.assists),
        steals: cell(columns.steals),
        turnovers: cell(columns.turnovers),
        c: cell(columns.c),
        blocks_for: cell(columns.blocks_for),
        blocks_against: cell(columns.blocks_against),
        dunks: cell(columns.dunks),
        fouls_committed: cell(columns.fouls_committed),
        fouls_received: cell(columns.fouls_received),
        plus_minus: cell(columns.plus_minus),
        valuation: cell(columns.valuation),
    };

    if record.did_not_play() {
        debug!(game_id, team, player = %record.name, "did not play");
        record.zero_stats();
    }

    Some(record)
}

/// Split a `D+O` rebounds cell. Missing parts count as `0`.
fn split_rebounds(raw: &str) -> (String, String) {
    let mut parts = raw.split('+').map(str::trim);
    let mut next_or_zero = || match parts.next() {
        Some(part) if !part.is_empty() => part.to_string(),
        _ => "0".to_string(),
    };
    let defensive = next_or_zero();
    let offensive = next_or_zero();
    (defensive, offensive)
}
