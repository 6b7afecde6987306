use serde::Serialize;

use super::{GameInfoRecord, PlayerStatRecord};
use crate::error::AcbError;

/// Everything scraped from one game page.
#[derive(Debug, Clone, Serialize)]
pub struct GameBoxScore {
    pub game_id: u32,
    pub home_team: String,
    pub away_team: String,
    /// Home rows first, then away rows, in table order.
    pub players: Vec<PlayerStatRecord>,
    pub info: GameInfoRecord,
    /// Rows dropped because they had too few cells.
    pub skipped_rows: usize,
}

/// The pipeline step at which a game was given up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FailureStage {
    Fetch,
    Extract,
}

/// A game that produced no data, and why.
#[derive(Debug)]
pub struct GameFailure {
    pub game_id: u32,
    pub stage: FailureStage,
    pub error: AcbError,
}

/// Outcome of scraping a range of game IDs.
///
/// Collections are ordered by game ID once the batch is finalized, whatever
/// order the fetches completed in.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub players: Vec<PlayerStatRecord>,
    pub games: Vec<GameInfoRecord>,
    pub failures: Vec<GameFailure>,
    /// Number of game IDs dispatched.
    pub attempted: usize,
    /// Incomplete player rows skipped across all games.
    pub skipped_rows: usize,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.games.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// True when no game in the range produced data.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.failures.iter().map(|f| f.game_id).collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn push_game(&mut self, game: GameBoxScore) {
        self.skipped_rows += game.skipped_rows;
        self.players.extend(game.players);
        self.games.push(game.info);
    }

    pub(crate) fn push_failure(&mut self, failure: GameFailure) {
        self.failures.push(failure);
    }

    /// Restore game ID order. Sorting is stable, so rows of one game keep
    /// their table order.
    pub(crate) fn finalize(mut self) -> Self {
        self.players.sort_by_key(|p| p.game_id);
        self.games.sort_by_key(|g| g.game_id);
        self.failures.sort_by_key(|f| f.game_id);
        self
    }
}
