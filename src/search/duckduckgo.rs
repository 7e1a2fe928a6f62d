use super::SearchProvider;
use crate::error::{FetchError, SearchError};
use crate::ranking::dedupe_candidates;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Searches through the DuckDuckGo HTML endpoint.
pub struct DuckDuckGoSearch {
    client: Client,
    search_url: String,
}

impl DuckDuckGoSearch {
    pub fn new(client: Client, search_url: impl Into<String>) -> Self {
        Self {
            client,
            search_url: search_url.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, SearchError> {
        let mut endpoint = Url::parse(&self.search_url)?;
        endpoint.query_pairs_mut().append_pair("q", query);
        debug!("Searching {}", endpoint);

        let body = self
            .client
            .get(endpoint.as_str())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::from)?
            .text()
            .await
            .map_err(FetchError::from)?;

        let links = parse_result_links(&body, &endpoint);
        debug!("Search returned {} result links", links.len());
        Ok(dedupe_candidates(links, max_results))
    }
}

/// Pull result URLs out of a DuckDuckGo HTML results page.
///
/// Relative links are resolved against `base`, and redirect links carrying
/// the target in a `uddg` parameter are unwrapped.
pub fn parse_result_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a.result__a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| {
            let resolved = base.join(href).ok()?;
            let target = resolved
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned());
            Some(target.unwrap_or_else(|| resolved.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"
        <html><body>
        <div class="result">
          <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.allrecipes.com%2Frecipe%2F1%2Ftea%2F&amp;rut=abc">Tea</a>
        </div>
        <div class="result">
          <a class="result__a" href="https://blog.example.com/chai">Chai</a>
        </div>
        <div class="result">
          <a class="result__snippet" href="https://ignored.example.com/">Snippet</a>
        </div>
        <div class="result">
          <a class="result__a" href="/l/?uddg=https%3A%2F%2Fblog.example.com%2Fchai">Chai again</a>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_result_links() {
        let base = Url::parse("https://duckduckgo.com/html/?q=tea+recipe").unwrap();
        let links = parse_result_links(RESULTS, &base);

        assert_eq!(
            links,
            vec![
                "https://www.allrecipes.com/recipe/1/tea/",
                "https://blog.example.com/chai",
                "https://blog.example.com/chai",
            ]
        );
    }

    #[tokio::test]
    async fn test_search_dedupes_and_caps() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/html/")
            .match_query(mockito::Matcher::UrlEncoded(
                "q".into(),
                "tea recipe".into(),
            ))
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(RESULTS)
            .create_async()
            .await;

        let search = DuckDuckGoSearch::new(Client::new(), format!("{}/html/", server.url()));

        let links = search.search("tea recipe", 12).await.unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.allrecipes.com/recipe/1/tea/",
                "https://blog.example.com/chai",
            ]
        );

        let links = search.search("tea recipe", 1).await.unwrap();
        assert_eq!(links, vec!["https://www.allrecipes.com/recipe/1/tea/"]);
    }

    #[tokio::test]
    async fn test_search_failure() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/html/")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let search = DuckDuckGoSearch::new(Client::new(), format!("{}/html/", server.url()));
        let err = search.search("tea recipe", 12).await.unwrap_err();
        assert!(matches!(
            err,
            SearchError::Request(FetchError::HttpStatus(500))
        ));
    }
}
