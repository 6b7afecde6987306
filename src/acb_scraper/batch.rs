use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

use crate::acb_scraper::extract::{extract_game, Layout};
use crate::acb_scraper::fetch::{fetch_game, Transport};
use crate::acb_scraper::game_info::normalize_game_info;
use crate::acb_scraper::rows::{normalize_table, ColumnMap};
use crate::client::AcbClient;
use crate::error::{AcbError, Result};
use crate::model::{BatchResult, FailureStage, GameBoxScore, GameFailure};

/// Extract and normalize an already fetched game page.
pub fn parse_game(
    html: &str,
    game_id: u32,
    layout: &Layout,
    columns: &ColumnMap,
) -> Result<GameBoxScore> {
    let game = extract_game(html, game_id, layout)?;
    let home = normalize_table(&game.home_table, &game.home_team, game_id, columns);
    let away = normalize_table(&game.away_table, &game.away_team, game_id, columns);
    let info = normalize_game_info(game.metadata.as_ref(), game_id);

    let mut players = home.records;
    players.extend(away.records);
    info!(
        game_id,
        home = %game.home_team,
        away = %game.away_team,
        players = players.len(),
        "game parsed"
    );

    Ok(GameBoxScore {
        game_id,
        home_team: game.home_team,
        away_team: game.away_team,
        players,
        info,
        skipped_rows: home.skipped + away.skipped,
    })
}

/// Fetch and parse one game, tagging a failure with the step it happened in.
#[instrument(skip(client))]
pub(crate) async fn scrape_game<T: Transport>(
    client: &AcbClient<T>,
    game_id: u32,
) -> std::result::Result<GameBoxScore, GameFailure> {
    let url = client.game_url(game_id);
    debug!(url, "scraping game");

    let html = fetch_game(&client.transport, game_id, &url, &client.settings)
        .await
        .map_err(|error| GameFailure {
            game_id,
            stage: FailureStage::Fetch,
            error,
        })?;

    parse_game(&html, game_id, &client.layout, &client.columns).map_err(|error| GameFailure {
        game_id,
        stage: FailureStage::Extract,
        error,
    })
}

/// Scrape every game ID in `start_id..=end_id`.
///
/// At most `concurrency` games are in flight at once; `None` dispatches the
/// whole range together and relies on the rate limit for pacing. Failed games
/// are recorded in the result and never stop the others.
pub(crate) async fn scrape_range<T: Transport>(
    client: &AcbClient<T>,
    start_id: u32,
    end_id: u32,
    concurrency: Option<usize>,
) -> Result<BatchResult> {
    if start_id > end_id {
        return Err(AcbError::Config(format!(
            "start_id {start_id} is greater than end_id {end_id}"
        )));
    }
    if concurrency == Some(0) {
        return Err(AcbError::Config("concurrency must be at least 1".to_string()));
    }

    let total = (end_id - start_id) as usize + 1;
    let limit = concurrency.unwrap_or(total);
    let span = info_span!("batch", start_id, end_id);

    async move {
        info!(total, concurrency = limit, "starting batch");

        let mut outcomes = stream::iter(start_id..=end_id)
            .map(|game_id| scrape_game(client, game_id))
            .buffer_unordered(limit);

        let mut batch = BatchResult {
            attempted: total,
            ..Default::default()
        };
        let mut completed = 0usize;
        while let Some(outcome) = outcomes.next().await {
            completed += 1;
            match outcome {
                Ok(game) => batch.push_game(game),
                Err(failure) => {
                    error!(
                        game_id = failure.game_id,
                        stage = %failure.stage,
                        error = %failure.error,
                        "game yielded no data"
                    );
                    batch.push_failure(failure);
                }
            }
            info!(completed, total, "progress");
        }

        let batch = batch.finalize();
        if batch.is_empty() {
            warn!(
                failed = batch.failure_count(),
                "no game in the range produced data"
            );
        } else {
            info!(
                games = batch.succeeded(),
                players = batch.players.len(),
                failed = batch.failure_count(),
                skipped_rows = batch.skipped_rows,
                "batch finished"
            );
        }
        Ok(batch)
    }
    .instrument(span)
    .await
}
