use std::cmp::Reverse;
use std::collections::HashSet;
use url::Url;

/// Drop repeated URLs, keeping the first occurrence, and stop after `max`.
pub fn dedupe_candidates<I>(urls: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .take(max)
        .collect()
}

/// Whether the URL's host ends with one of the preferred domain suffixes.
pub fn is_preferred(url: &str, preferred_domains: &[String]) -> bool {
    let Some(host) = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    else {
        return false;
    };

    preferred_domains
        .iter()
        .any(|domain| host.ends_with(&domain.to_ascii_lowercase()))
}

/// Order candidates: preferred domains first, then longer URLs first.
///
/// The sort is stable, so candidates with equal keys keep their search order.
pub fn rank_candidates(mut urls: Vec<String>, preferred_domains: &[String]) -> Vec<String> {
    urls.sort_by_cached_key(|url| {
        (
            Reverse(is_preferred(url, preferred_domains)),
            Reverse(url.len()),
        )
    });
    urls
}
