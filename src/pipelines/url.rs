use crate::config::FinderConfig;
use crate::error::ScrapeFailure;
use crate::model::RecipeRecord;
use crate::url_to_text::fetchers::Fetcher;
use crate::url_to_text::html::extractors::{Extractor, JsonLdExtractor, ParsingContext};
use crate::url_to_text::robots::PermissionChecker;
use log::debug;

/// Extract a recipe from one candidate URL
///
/// This pipeline:
/// 1. Checks robots.txt (an unreadable robots.txt counts as allowed)
/// 2. Fetches the page
/// 3. Parses its JSON-LD blocks and returns the first usable recipe
///
/// # Returns
/// * `Ok(RecipeRecord)` - The first recipe found on the page
/// * `Err(ScrapeFailure)` - Why this URL produced nothing; never fatal to a search
pub async fn process(
    url: &str,
    fetcher: &dyn Fetcher,
    permissions: &dyn PermissionChecker,
    config: &FinderConfig,
) -> Result<RecipeRecord, ScrapeFailure> {
    // 1. Permission check
    match permissions.allowed(url, &config.robots_agent).await {
        Ok(true) => {}
        Ok(false) => return Err(ScrapeFailure::RobotsDisallow(url.to_string())),
        Err(e) => debug!("Treating {} as allowed: {}", url, e),
    }

    // 2. Fetch
    let page = fetcher.fetch(url).await?;

    // 3. Extract, locate, assemble
    extract_recipe(url, &page.body)
}

fn extract_recipe(url: &str, html: &str) -> Result<RecipeRecord, ScrapeFailure> {
    let context = ParsingContext::new(url, html);
    JsonLdExtractor.parse(&context)
}
