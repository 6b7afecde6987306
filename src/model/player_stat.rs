use serde::Serialize;

use super::TableRecord;

/// One player's line of a box score.
///
/// Every field is always present: values the source omitted are empty
/// strings, and players who did not play carry zero-forms (`00:00`, `0/0`,
/// `0%`, `0`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStatRecord {
    #[serde(rename = "id_partido")]
    pub game_id: u32,
    #[serde(rename = "equipo")]
    pub team: String,
    /// `*` for starters, empty otherwise.
    #[serde(rename = "titular")]
    pub starter: String,
    #[serde(rename = "dorsal")]
    pub jersey: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "minutos")]
    pub minutes: String,
    #[serde(rename = "puntos")]
    pub points: String,
    #[serde(rename = "T2")]
    pub two_pointers: String,
    #[serde(rename = "T2 %")]
    pub two_point_pct: String,
    #[serde(rename = "T3")]
    pub three_pointers: String,
    #[serde(rename = "T3 %")]
    pub three_point_pct: String,
    #[serde(rename = "T1")]
    pub free_throws: String,
    #[serde(rename = "T1 %")]
    pub free_throw_pct: String,
    #[serde(rename = "rebotes_defensivos")]
    pub defensive_rebounds: String,
    #[serde(rename = "rebotes_ofensivos")]
    pub offensive_rebounds: String,
    #[serde(rename = "rebotes_totales")]
    pub total_rebounds: String,
    #[serde(rename = "asistencias")]
    pub assists: String,
    #[serde(rename = "robos")]
    pub steals: String,
    #[serde(rename = "perdidas")]
    pub turnovers: String,
    /// Opaque "C" column of the source box score.
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "tapones_favor")]
    pub blocks_for: String,
    #[serde(rename = "tapones_contra")]
    pub blocks_against: String,
    #[serde(rename = "mates")]
    pub dunks: String,
    #[serde(rename = "faltas_cometidas")]
    pub fouls_committed: String,
    #[serde(rename = "faltas_recibidas")]
    pub fouls_received: String,
    #[serde(rename = "+/-")]
    pub plus_minus: String,
    /// Valuation index, kept as the site prints it.
    #[serde(rename = "V")]
    pub valuation: String,
}

impl PlayerStatRecord {
    /// A player with an empty minutes cell never entered the game.
    pub fn did_not_play(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Overwrite every statistic with its zero-form, keeping identity fields.
    pub(crate) fn zero_stats(&mut self) {
        self.minutes = "00:00".to_string();
        for split in [
            &mut self.two_pointers,
            &mut self.three_pointers,
            &mut self.free_throws,
        ] {
            *split = "0/0".to_string();
        }
        for pct in [
            &mut self.two_point_pct,
            &mut self.three_point_pct,
            &mut self.free_throw_pct,
        ] {
            *pct = "0%".to_string();
        }
        for count in [
            &mut self.points,
            &mut self.defensive_rebounds,
            &mut self.offensive_rebounds,
            &mut self.total_rebounds,
            &mut self.assists,
            &mut self.steals,
            &mut self.turnovers,
            &mut self.c,
            &mut self.blocks_for,
            &mut self.blocks_against,
            &mut self.dunks,
            &mut self.fouls_committed,
            &mut self.fouls_received,
            &mut self.plus_minus,
            &mut self.valuation,
        ] {
            *count = "0".to_string();
        }
    }
}

impl TableRecord for PlayerStatRecord {
    const COLUMNS: &'static [&'static str] = &[
        "id_partido",
        "equipo",
        "titular",
        "dorsal",
        "nombre",
        "minutos",
        "puntos",
        "T2",
        "T2 %",
        "T3",
        "T3 %",
        "T1",
        "T1 %",
        "rebotes_defensivos",
        "rebotes_ofensivos",
        "rebotes_totales",
        "asistencias",
        "robos",
        "perdidas",
        "C",
        "tapones_favor",
        "tapones_contra",
        "mates",
        "faltas_cometidas",
        "faltas_recibidas",
        "+/-",
        "V",
    ];
}
