//! robots.txt permission checks

use crate::error::PermissionError;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use texting_robots::Robot;
use url::Url;

/// Decides whether a URL may be crawled.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    /// `Err` means the policy could not be determined; callers treat that as allowed.
    async fn allowed(&self, url: &str, user_agent: &str) -> Result<bool, PermissionError>;
}

/// Fetches `<scheme>://<host>/robots.txt` for every check.
pub struct RobotsChecker {
    client: Client,
}

impl RobotsChecker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PermissionChecker for RobotsChecker {
    async fn allowed(&self, url: &str, user_agent: &str) -> Result<bool, PermissionError> {
        let unavailable = |reason: String| PermissionError {
            url: url.to_string(),
            reason,
        };

        let robots_url = robots_url_for(url).map_err(|e| unavailable(e.to_string()))?;
        let response = self
            .client
            .get(robots_url.as_str())
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!("{} answered {}, disallowing all", robots_url, status);
            return Ok(false);
        }
        if status.is_client_error() {
            return Ok(true);
        }
        if !status.is_success() {
            return Err(unavailable(format!("HTTP status {}", status.as_u16())));
        }

        let robots_txt = response
            .text()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        Ok(robots_allows(&robots_txt, user_agent, url))
    }
}

fn robots_url_for(url: &str) -> Result<Url, url::ParseError> {
    Url::parse(url)?.join("/robots.txt")
}

/// Evaluate `url` against robots.txt content; unparsable content allows.
pub fn robots_allows(robots_txt: &str, user_agent: &str, url: &str) -> bool {
    Robot::new(user_agent, robots_txt.as_bytes())
        .map(|robot| robot.allowed(url))
        .unwrap_or(true)
}
