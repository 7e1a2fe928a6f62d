//! Find a recipe for a dish name.
//!
//! The finder searches DuckDuckGo for `"<dish> recipe"`, ranks the result
//! URLs (preferred recipe sites first), and walks them in order until one
//! page carries a JSON-LD Recipe it can turn into a [`RecipeRecord`].
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recipe = recipe_finder::find_recipe("masala chai").await?;
//! println!("{}", recipe.name);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod pipelines;
pub mod presenter;
pub mod ranking;
pub mod search;
pub mod url_to_text;

pub use builder::{RecipeFinder, RecipeFinderBuilder};
pub use config::{load_config, FinderConfig};
pub use error::{FetchError, FinderError, PermissionError, ScrapeFailure, SearchError};
pub use model::{DataNode, FetchedPage, RecipeRecord};
pub use presenter::render_recipe;

/// Find a recipe with configuration loaded from file and environment
pub async fn find_recipe(dish: &str) -> Result<RecipeRecord, FinderError> {
    let config = load_config()?;
    RecipeFinder::builder().config(config).build()?.find(dish).await
}

/// Extract a recipe from one page with default configuration
pub async fn extract_recipe_from_url(url: &str) -> Result<RecipeRecord, FinderError> {
    let finder = RecipeFinder::builder().build()?;
    finder
        .scrape(url)
        .await
        .map_err(|failure| FinderError::NotFound {
            reasons: vec![failure.to_string()],
        })
}
