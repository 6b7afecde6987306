use serde::Serialize;

use super::TableRecord;

/// Metadata of a single game: schedule, venue, officials and scoring.
///
/// Fields that could not be extracted are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameInfoRecord {
    #[serde(rename = "id_partido")]
    pub game_id: u32,
    #[serde(rename = "jornada")]
    pub round: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "pabellon")]
    pub venue: String,
    #[serde(rename = "asistencia")]
    pub attendance: String,
    #[serde(rename = "arbitro_1")]
    pub referee_1: String,
    #[serde(rename = "arbitro_2")]
    pub referee_2: String,
    #[serde(rename = "arbitro_3")]
    pub referee_3: String,
    #[serde(rename = "resultado_local")]
    pub home_score: String,
    #[serde(rename = "resultado_visitante")]
    pub away_score: String,
    /// Comma-joined per-quarter points of the home side.
    #[serde(rename = "parciales_local")]
    pub home_partials: String,
    /// Comma-joined per-quarter points of the away side.
    #[serde(rename = "parciales_visitante")]
    pub away_partials: String,
}

impl TableRecord for GameInfoRecord {
    const COLUMNS: &'static [&'static str] = &[
        "id_partido",
        "jornada",
        "fecha",
        "hora",
        "pabellon",
        "asistencia",
        "arbitro_1",
        "arbitro_2",
        "arbitro_3",
        "resultado_local",
        "resultado_visitante",
        "parciales_local",
        "parciales_visitante",
    ];
}
