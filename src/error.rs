use ::scraper::error::SelectorErrorKind;

/// All errors that can occur while scraping ACB box scores.
#[derive(thiserror::Error, Debug)]
pub enum AcbError {
    /// The run configuration is missing or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// Every fetch attempt failed; carries the error of the last one.
    #[error("giving up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        last: Box<AcbError>,
    },

    /// The page does not contain both team headers.
    #[error("team headers not found (found {found})")]
    TeamHeadersNotFound { found: usize },

    /// The page does not contain both statistics tables.
    #[error("stats tables not found (found {found})")]
    StatsTablesNotFound { found: usize },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl<'a> From<SelectorErrorKind<'a>> for AcbError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        AcbError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AcbError>;
