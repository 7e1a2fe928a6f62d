use thiserror::Error;

/// Errors that can occur while fetching a candidate page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS, redirect or body decoding failure
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// The robots.txt file could not be retrieved
#[derive(Error, Debug)]
#[error("robots.txt unavailable for {url}: {reason}")]
pub struct PermissionError {
    pub url: String,
    pub reason: String,
}

/// Errors raised by a search provider
#[derive(Error, Debug)]
pub enum SearchError {
    /// The search request itself failed
    #[error("Search request failed: {0}")]
    Request(#[from] FetchError),

    /// The configured search URL is not a valid absolute URL
    #[error("Invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Why a single candidate URL did not yield a recipe.
///
/// None of these abort the search; the `Display` form is the reason string
/// collected for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeFailure {
    #[error("robots disallow {0}")]
    RobotsDisallow(String),

    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    #[error("no recipe found")]
    NoRecipeFound,
}

/// Errors that can occur during a recipe search
#[derive(Error, Debug)]
pub enum FinderError {
    /// The search provider failed; the query may be retried
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The search returned no candidate URLs
    #[error("No results")]
    NoResults,

    /// Every candidate was tried and none produced a recipe
    #[error("Couldn't extract a recipe from {} candidate(s)", .reasons.len())]
    NotFound { reasons: Vec<String> },

    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),
}

impl FinderError {
    /// First `n` failure reasons in attempt order, empty for other variants
    pub fn top_reasons(&self, n: usize) -> &[String] {
        match self {
            FinderError::NotFound { reasons } => &reasons[..reasons.len().min(n)],
            _ => &[],
        }
    }
}
