use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::FinderConfig;
use crate::error::{FinderError, ScrapeFailure};
use crate::model::RecipeRecord;
use crate::pipelines;
use crate::presenter::render_recipe;
use crate::search::{DuckDuckGoSearch, SearchProvider};
use crate::url_to_text::fetchers::{Fetcher, RequestFetcher};
use crate::url_to_text::robots::{PermissionChecker, RobotsChecker};

/// Builder for configuring a [`RecipeFinder`]
///
/// Every collaborator left unset is built from the configuration: a shared
/// HTTP client for page fetches, robots.txt checks and DuckDuckGo search.
#[derive(Default)]
pub struct RecipeFinderBuilder {
    config: Option<FinderConfig>,
    wrap_width: Option<usize>,
    preferred_domains: Option<Vec<String>>,
    timeout: Option<Duration>,
    request_delay: Option<Duration>,
    max_candidates: Option<usize>,
    fetcher: Option<Arc<dyn Fetcher>>,
    permissions: Option<Arc<dyn PermissionChecker>>,
    search: Option<Arc<dyn SearchProvider>>,
}

impl RecipeFinderBuilder {
    /// Start from a loaded configuration instead of the defaults
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder().config(FinderConfig::default());
    /// ```
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the column at which rendered recipes wrap
    pub fn wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = Some(width);
        self
    }

    /// Replace the list of preferred domain suffixes
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder().preferred_domains(["seriouseats.com", "tasty.co"]);
    /// ```
    pub fn preferred_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the pause taken between unsuccessful candidates
    pub fn request_delay(mut self, duration: Duration) -> Self {
        self.request_delay = Some(duration);
        self
    }

    /// Set how many search results are considered per query
    pub fn max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = Some(max);
        self
    }

    /// Use a custom page fetcher
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use a custom robots.txt policy
    pub fn permissions(mut self, permissions: Arc<dyn PermissionChecker>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Use a custom search provider
    pub fn search(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    /// Validate the configuration and create the finder
    ///
    /// # Errors
    /// Returns `FinderError` if:
    /// - `max_candidates` or `wrap_width` is zero
    /// - the HTTP client cannot be built
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let finder = RecipeFinder::builder().wrap_width(80).build().unwrap();
    /// assert_eq!(finder.config().wrap_width, 80);
    /// ```
    pub fn build(self) -> Result<RecipeFinder, FinderError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(width) = self.wrap_width {
            config.wrap_width = width;
        }
        if let Some(domains) = self.preferred_domains {
            config.preferred_domains = domains;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout.as_secs().max(1);
        }
        if let Some(delay) = self.request_delay {
            config.request_delay_ms = delay.as_millis() as u64;
        }
        if let Some(max) = self.max_candidates {
            config.max_candidates = max;
        }

        if config.max_candidates == 0 {
            return Err(FinderError::Builder(
                "max_candidates must be at least 1".to_string(),
            ));
        }
        if config.wrap_width == 0 {
            return Err(FinderError::Builder(
                "wrap_width must be at least 1".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Arc::new(RequestFetcher::with_client(client.clone())));
        let permissions = self
            .permissions
            .unwrap_or_else(|| Arc::new(RobotsChecker::new(client.clone())));
        let search = self.search.unwrap_or_else(|| {
            Arc::new(DuckDuckGoSearch::new(client, config.search_url.clone()))
        });

        Ok(RecipeFinder {
            config: Arc::new(config),
            fetcher,
            permissions,
            search,
        })
    }
}

/// Searches the web for a dish and extracts the first recipe found.
///
/// Cheap to clone; configuration is fixed once built.
#[derive(Clone)]
pub struct RecipeFinder {
    config: Arc<FinderConfig>,
    fetcher: Arc<dyn Fetcher>,
    permissions: Arc<dyn PermissionChecker>,
    search: Arc<dyn SearchProvider>,
}

impl RecipeFinder {
    /// Creates a new builder for a finder
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Extract a recipe from a single URL
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_finder::RecipeFinder;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let finder = RecipeFinder::builder().build()?;
    /// let recipe = finder
    ///     .scrape("https://www.bbcgoodfood.com/recipes/classic-cottage-pie")
    ///     .await?;
    /// println!("{}", recipe.name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scrape(&self, url: &str) -> Result<RecipeRecord, ScrapeFailure> {
        pipelines::url::process(
            url,
            self.fetcher.as_ref(),
            self.permissions.as_ref(),
            &self.config,
        )
        .await
    }

    /// Search for a dish and return the first recipe in rank order
    pub async fn find(&self, dish: &str) -> Result<RecipeRecord, FinderError> {
        self.find_with_progress(dish, |_, _| {}).await
    }

    /// Like [`find`](Self::find), calling `on_attempt(rank, url)` before each candidate
    pub async fn find_with_progress<F>(
        &self,
        dish: &str,
        mut on_attempt: F,
    ) -> Result<RecipeRecord, FinderError>
    where
        F: FnMut(usize, &str) + Send,
    {
        pipelines::search::process(
            dish,
            self.search.as_ref(),
            self.fetcher.as_ref(),
            self.permissions.as_ref(),
            &self.config,
            &mut on_attempt,
        )
        .await
    }

    /// Render a recipe with the configured wrap width
    pub fn render(&self, recipe: &RecipeRecord) -> String {
        render_recipe(recipe, self.config.wrap_width)
    }
}
