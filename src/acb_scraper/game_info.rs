use itertools::Itertools;
use tracing::warn;

use crate::acb_scraper::extract::MetadataBlock;
use crate::model::GameInfoRecord;

const ATTENDANCE_LABEL: &str = "Público:";
const REFEREES_LABEL: &str = "Árb:";
const SCHEDULE_SEPARATOR: char = '|';
const PARTIAL_SEPARATOR: char = '|';

/// Build the game info record from a metadata block.
///
/// A game without metadata still gets a record, with everything but the
/// game ID empty.
pub fn normalize_game_info(metadata: Option<&MetadataBlock>, game_id: u32) -> GameInfoRecord {
    let mut info = GameInfoRecord {
        game_id,
        ..Default::default()
    };
    let Some(metadata) = metadata else {
        return info;
    };

    let segments = metadata
        .schedule
        .split(SCHEDULE_SEPARATOR)
        .map(str::trim)
        .collect_vec();
    let segment = |index: usize| segments.get(index).copied().unwrap_or_default().to_string();
    info.round = segment(0);
    info.date = segment(1);
    info.time = segment(2);
    info.venue = match &metadata.venue {
        Some(venue) => venue.clone(),
        None => segments
            .get(3)
            .filter(|s| !s.contains(ATTENDANCE_LABEL))
            .map(|s| s.to_string())
            .unwrap_or_default(),
    };
    info.attendance = parse_attendance(&metadata.schedule);

    let mut referees = parse_referees(&metadata.referees).into_iter();
    info.referee_1 = referees.next().unwrap_or_default();
    info.referee_2 = referees.next().unwrap_or_default();
    info.referee_3 = referees.next().unwrap_or_default();

    if let [home, away] = metadata.results.as_slice() {
        info.home_score = home.clone();
        info.away_score = away.clone();
    } else {
        warn!(
            game_id,
            found = metadata.results.len(),
            "expected two result elements, final score left empty"
        );
    }

    let (home_partials, away_partials) = parse_partials(&metadata.partials, game_id);
    info.home_partials = home_partials;
    info.away_partials = away_partials;

    info
}

/// Everything after the attendance label, up to the next schedule separator.
fn parse_attendance(schedule: &str) -> String {
    schedule
        .split_once(ATTENDANCE_LABEL)
        .and_then(|(_, rest)| rest.split(SCHEDULE_SEPARATOR).next())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// At most three referee names, each kept in its position even when empty.
fn parse_referees(raw: &str) -> Vec<String> {
    raw.replace(REFEREES_LABEL, "")
        .split(',')
        .map(str::trim)
        .take(3)
        .map(str::to_string)
        .collect()
}

/// Comma-joined home and away quarter scores. Tokens that are not exactly
/// two non-empty sides around one separator are skipped.
fn parse_partials(raw: &str, game_id: u32) -> (String, String) {
    let (home, away): (Vec<&str>, Vec<&str>) = raw
        .split_whitespace()
        .filter_map(|token| {
            let pair = token
                .split_once(PARTIAL_SEPARATOR)
                .filter(|(home, away)| {
                    !home.is_empty() && !away.is_empty() && !away.contains(PARTIAL_SEPARATOR)
                });
            if pair.is_none() {
                warn!(game_id, token, "malformed quarter score, skipping");
            }
            pair
        })
        .unzip();
    (home.join(","), away.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> MetadataBlock {
        MetadataBlock {
            schedule: "JORNADA 5 | 21/10/2023 | 18:30 | WiZink Center | Público: 9.876".to_string(),
            venue: None,
            referees: "Árb: Pérez, García, López".to_string(),
            results: vec!["88".to_string(), "80".to_string()],
            partials: "22|18 20|21 25|19 21|22".to_string(),
        }
    }

    #[test]
    fn test_normalize_game_info() {
        let info = normalize_game_info(Some(&block()), 104224);
        assert_eq!(
            info,
            GameInfoRecord {
                game_id: 104224,
                round: "JORNADA 5".to_string(),
                date: "21/10/2023".to_string(),
                time: "18:30".to_string(),
                venue: "WiZink Center".to_string(),
                attendance: "9.876".to_string(),
                referee_1: "Pérez".to_string(),
                referee_2: "García".to_string(),
                referee_3: "López".to_string(),
                home_score: "88".to_string(),
                away_score: "80".to_string(),
                home_partials: "22,20,25,21".to_string(),
                away_partials: "18,21,19,22".to_string(),
            }
        );
    }

    #[test]
    fn test_dedicated_venue_element_wins() {
        let metadata = MetadataBlock {
            venue: Some("Palau Blaugrana".to_string()),
            ..block()
        };
        let info = normalize_game_info(Some(&metadata), 1);
        assert_eq!(info.venue, "Palau Blaugrana");
    }

    #[test]
    fn test_schedule_without_venue() {
        let metadata = MetadataBlock {
            schedule: "JORNADA 1 | 01/10/2023 | 12:30 | Público: 4.100".to_string(),
            ..block()
        };
        let info = normalize_game_info(Some(&metadata), 1);
        assert_eq!(info.venue, "");
        assert_eq!(info.attendance, "4.100");
        assert_eq!(info.time, "12:30");
    }

    #[test]
    fn test_missing_metadata_gives_empty_record() {
        let info = normalize_game_info(None, 42);
        assert_eq!(
            info,
            GameInfoRecord {
                game_id: 42,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_only_three_referees_kept() {
        let refs = parse_referees("Árb: Pérez, GarcÍa, López, Extra");
        assert_eq!(refs, vec!["Pérez", "GarcÍa", "López"]);
    }

    #[test]
    fn test_empty_referee_keeps_its_slot() {
        let metadata = MetadataBlock {
            referees: "Árb: , García, López".to_string(),
            ..block()
        };
        let info = normalize_game_info(Some(&metadata), 1);
        assert_eq!(info.referee_1, "");
        assert_eq!(info.referee_2, "García");
        assert_eq!(info.referee_3, "López");
    }

    #[test]
    fn test_fewer_referees_leave_rest_empty() {
        let metadata = MetadataBlock {
            referees: "Árb: Pérez".to_string(),
            ..block()
        };
        let info = normalize_game_info(Some(&metadata), 1);
        assert_eq!(info.referee_1, "Pérez");
        assert_eq!(info.referee_2, "");
        assert_eq!(info.referee_3, "");
    }

    #[test]
    fn test_score_needs_exactly_two_results() {
        for results in [vec!["88".to_string()], vec![], vec!["1".into(), "2".into(), "3".into()]] {
            let metadata = MetadataBlock {
                results,
                ..block()
            };
            let info = normalize_game_info(Some(&metadata), 1);
            assert_eq!(info.home_score, "");
            assert_eq!(info.away_score, "");
        }
    }

    #[test]
    fn test_malformed_partial_is_skipped() {
        let (home, away) = parse_partials("22|18 20-21 25|19 10|8", 7);
        assert_eq!(home, "22,25,10");
        assert_eq!(away, "18,19,8");

        let (home, away) = parse_partials("22|18|5 20|21 |18 9| 12|14", 7);
        assert_eq!(home, "20,12");
        assert_eq!(away, "21,14");
    }

    #[test]
    fn test_no_partials() {
        assert_eq!(parse_partials("", 7), (String::new(), String::new()));
    }
}
