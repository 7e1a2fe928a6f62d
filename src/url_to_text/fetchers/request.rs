use super::Fetcher;
use crate::config::FinderConfig;
use crate::error::FetchError;
use crate::model::FetchedPage;
use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    /// Build a client carrying the configured user agent and timeout
    pub fn new(config: &FinderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for RequestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type)
            .unwrap_or_else(|| "utf-8".to_string());
        debug!("Fetched {} ({})", url, charset);

        // text() decodes with the declared charset and replaces invalid sequences
        let body = response.text().await?;
        Ok(FetchedPage { body, charset })
    }
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches('"');
            (!value.is_empty()).then(|| value.to_ascii_lowercase())
        } else {
            None
        }
    })
}
