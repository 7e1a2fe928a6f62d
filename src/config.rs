use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Settings shared by every component of a finder.
///
/// Built once (defaults, then `recipe-finder.toml`, then environment) and
/// read-only afterwards.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FinderConfig {
    /// Column at which the presenter soft-wraps ingredients and steps
    pub wrap_width: usize,
    /// Host suffixes ranked above every other candidate
    pub preferred_domains: Vec<String>,
    /// Timeout in seconds for page, robots.txt and search requests
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Pause between unsuccessful candidates in milliseconds
    pub request_delay_ms: u64,
    /// Maximum number of search results considered per query
    pub max_candidates: usize,
    /// Endpoint of the DuckDuckGo HTML search
    pub search_url: String,
    /// Agent name matched against robots.txt groups
    pub robots_agent: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            wrap_width: default_wrap_width(),
            preferred_domains: default_preferred_domains(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            max_candidates: default_max_candidates(),
            search_url: default_search_url(),
            robots_agent: default_robots_agent(),
        }
    }
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

fn default_wrap_width() -> usize {
    92
}

fn default_preferred_domains() -> Vec<String> {
    [
        "allrecipes.com",
        "bbcgoodfood.com",
        "seriouseats.com",
        "foodnetwork.com",
        "tasty.co",
        "epicurious.com",
        "thekitchn.com",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

fn default_timeout_secs() -> u64 {
    12
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome Safari"
        .to_string()
}

fn default_request_delay_ms() -> u64 {
    600
}

fn default_max_candidates() -> usize {
    12
}

fn default_search_url() -> String {
    "https://duckduckgo.com/html/".to_string()
}

fn default_robots_agent() -> String {
    "*".to_string()
}

/// Load configuration from file and environment variables
///
/// Environment variable format: RECIPE_FINDER__WRAP_WIDTH=100, lists are
/// comma separated: RECIPE_FINDER__PREFERRED_DOMAINS=a.com,b.org
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-finder").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("preferred_domains")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
