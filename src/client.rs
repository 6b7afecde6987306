use tracing::instrument;

use crate::acb_scraper::{self, ColumnMap, FetchSettings, Layout, Transport, ACB_BASE_URL};
use crate::error::Result;
use crate::model::{BatchResult, GameBoxScore};

/// The main entry point for scraping ACB box scores.
///
/// `AcbClient` wraps a [`Transport`] (a [`reqwest::Client`] unless told
/// otherwise) together with the page address, the fetch pacing and the
/// markup lookup tables.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> acb_box_scraper::Result<()> {
/// use acb_box_scraper::AcbClient;
///
/// let client = AcbClient::new();
/// let batch = client.scrape_range(104220, 104229, Some(4)).await?;
/// println!("{} games, {} player rows", batch.succeeded(), batch.players.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AcbClient<T = reqwest::Client> {
    pub(crate) transport: T,
    pub(crate) base_url: String,
    pub(crate) settings: FetchSettings,
    pub(crate) layout: Layout,
    pub(crate) columns: ColumnMap,
}

impl AcbClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_transport(reqwest::Client::new())
    }
}

impl Default for AcbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> AcbClient<T> {
    /// Create a client on top of any [`Transport`].
    ///
    /// Pass a configured [`reqwest::Client`] when you need timeouts or proxies.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_url: ACB_BASE_URL.to_string(),
            settings: FetchSettings::default(),
            layout: Layout::ACB,
            columns: ColumnMap::ACB,
        }
    }

    /// Prefix the game ID is appended to; include the trailing `/`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    pub fn game_url(&self, game_id: u32) -> String {
        format!("{}{game_id}", self.base_url)
    }

    /// Fetch the raw page of one game, with retries and rate limiting.
    #[instrument(skip(self))]
    pub async fn fetch_game(&self, game_id: u32) -> Result<String> {
        let url = self.game_url(game_id);
        acb_scraper::fetch::fetch_game(&self.transport, game_id, &url, &self.settings).await
    }

    /// Fetch and parse the box score of one game.
    pub async fn scrape_game(&self, game_id: u32) -> Result<GameBoxScore> {
        acb_scraper::batch::scrape_game(self, game_id)
            .await
            .map_err(|failure| failure.error)
    }

    /// Scrape every game in `start_id..=end_id`, at most `concurrency` at a
    /// time (`None` for no bound).
    #[instrument(skip(self))]
    pub async fn scrape_range(
        &self,
        start_id: u32,
        end_id: u32,
        concurrency: Option<usize>,
    ) -> Result<BatchResult> {
        acb_scraper::batch::scrape_range(self, start_id, end_id, concurrency).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_url_appends_id() {
        let client = AcbClient::new();
        assert_eq!(
            client.game_url(104224),
            "https://www.acb.com/partido/estadisticas/id/104224"
        );

        let client = AcbClient::new().base_url("http://localhost:8080/partido/");
        assert_eq!(client.game_url(7), "http://localhost:8080/partido/7");
    }

    #[tokio::test]
    async fn test_scrape_game_against_local_server() {
        let mut server = mockito::Server::new_async().await;
        let page = crate::acb_scraper::extract::tests::game_page("Joventut", "Bilbao", true);
        let _mock = server
            .mock("GET", "/id/55")
            .with_status(200)
            .with_body(page)
            .create_async()
            .await;

        let client = AcbClient::new()
            .base_url(format!("{}/id/", server.url()))
            .settings(FetchSettings {
                rate_limit: std::time::Duration::ZERO,
                ..FetchSettings::default()
            });
        let game = client.scrape_game(55).await.unwrap();

        assert_eq!(game.home_team, "Joventut");
        assert_eq!(game.away_team, "Bilbao");
        assert_eq!(game.players.len(), 4);
        assert_eq!(game.info.game_id, 55);
    }
}
