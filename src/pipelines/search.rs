use crate::config::FinderConfig;
use crate::error::FinderError;
use crate::model::RecipeRecord;
use crate::ranking::{dedupe_candidates, rank_candidates};
use crate::search::SearchProvider;
use crate::url_to_text::fetchers::Fetcher;
use crate::url_to_text::robots::PermissionChecker;
use log::{debug, info, warn};
use tokio::time::sleep;

/// Find a recipe for a dish
///
/// This pipeline:
/// 1. Searches for "<dish> recipe"
/// 2. Ranks the candidates (preferred domains first, then longer URLs)
/// 3. Runs the URL pipeline on each candidate in rank order, pausing between
///    failed attempts, and returns the first recipe found
///
/// `on_attempt` is told the 1-based rank and URL before each attempt.
///
/// # Returns
/// * `Ok(RecipeRecord)` - The recipe from the best-ranked candidate that had one
/// * `Err(FinderError::NotFound)` - Every candidate failed; carries the reasons in attempt order
pub async fn process(
    dish: &str,
    search: &dyn SearchProvider,
    fetcher: &dyn Fetcher,
    permissions: &dyn PermissionChecker,
    config: &FinderConfig,
    on_attempt: &mut (dyn FnMut(usize, &str) + Send),
) -> Result<RecipeRecord, FinderError> {
    let query = format!("{} recipe", dish.trim());
    info!("Searching: {}", query);

    let urls = search.search(&query, config.max_candidates).await?;
    if urls.is_empty() {
        return Err(FinderError::NoResults);
    }

    let candidates = rank_candidates(
        dedupe_candidates(urls, config.max_candidates),
        &config.preferred_domains,
    );
    debug!("Ranked candidates: {:?}", candidates);

    let mut reasons = Vec::new();
    for (index, url) in candidates.iter().enumerate() {
        if index > 0 {
            sleep(config.request_delay()).await;
        }

        info!("Checking {}: {}", index + 1, url);
        on_attempt(index + 1, url);

        match super::url::process(url, fetcher, permissions, config).await {
            Ok(recipe) => return Ok(recipe),
            Err(failure) => {
                warn!("{}: {}", url, failure);
                reasons.push(failure.to_string());
            }
        }
    }

    Err(FinderError::NotFound { reasons })
}
