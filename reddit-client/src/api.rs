use async_trait::async_trait;
use nichelens_core::{
    ApiCredentials, CollaboratorError, CommunityCandidate, CommunitySearch, ContentFetch,
    ContentItem, TimeWindow,
};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::parse;

const SEARCH_ENDPOINT: &str = "/v1/reddit/search";
const POSTS_ENDPOINT: &str = "/v1/reddit/posts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the RapidAPI-hosted Reddit scraping proxy.
///
/// Authenticates with the `X-RapidAPI-Key` / `X-RapidAPI-Host` header pair.
/// No retries happen here; failures surface as [`CollaboratorError`] and the
/// pipeline decides what to skip.
#[derive(Debug)]
pub struct RapidApiRedditClient {
    http_client: Client,
    base_url: String,
    credentials: ApiCredentials,
}

impl RapidApiRedditClient {
    pub fn new(credentials: ApiCredentials) -> Self {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        let base_url = format!("https://{}", credentials.host);

        Self {
            http_client,
            base_url,
            credentials,
        }
    }

    async fn request(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value, CollaboratorError> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("Requesting {} with {} params", endpoint, params.len());
        let response = self
            .http_client
            .get(&url)
            .header("X-RapidAPI-Key", &self.credentials.api_key)
            .header("X-RapidAPI-Host", &self.credentials.host)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for {}: {}", endpoint, e);
                if e.is_timeout() {
                    CollaboratorError::RequestTimeout {
                        endpoint: endpoint.to_string(),
                    }
                } else {
                    CollaboratorError::RequestFailed {
                        endpoint: endpoint.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(CollaboratorError::RateLimitExceeded { retry_after });
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(CollaboratorError::AuthenticationFailed {
                reason: format!("{} for {}", status, endpoint),
            });
        }
        if status.is_server_error() {
            return Err(CollaboratorError::ServerError {
                status_code: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(CollaboratorError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: format!("unexpected status {}", status),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CollaboratorError::InvalidResponse {
                details: format!("non-JSON body from {}: {}", endpoint, e),
            })?;

        // The proxy reports some failures in-band with a 200 status
        if let Some(err) = body.get("error") {
            return Err(CollaboratorError::ErrorIndicator {
                message: err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string()),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl CommunitySearch for RapidApiRedditClient {
    async fn search_communities(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CommunityCandidate>, CollaboratorError> {
        let params = [
            ("search", query.to_string()),
            ("type", "subreddits".to_string()),
            ("sort", "relevance".to_string()),
            ("time", "all".to_string()),
            ("limit", limit.to_string()),
        ];

        let body = self.request(SEARCH_ENDPOINT, &params).await?;
        let communities = parse::parse_community_listing(&body);
        info!("Search '{}' returned {} communities", query, communities.len());
        Ok(communities)
    }
}

#[async_trait]
impl ContentFetch for RapidApiRedditClient {
    async fn fetch_top_content(
        &self,
        community: &str,
        time_window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<ContentItem>, CollaboratorError> {
        let params = [
            (
                "url",
                format!("https://www.reddit.com/r/{community}"),
            ),
            ("filter", "top".to_string()),
            ("time", time_window.as_str().to_string()),
            ("limit", limit.to_string()),
        ];

        let body = self.request(POSTS_ENDPOINT, &params).await?;
        let posts = parse::parse_post_listing(&body, community);
        info!("Retrieved {} posts from r/{}", posts.len(), community);
        Ok(posts)
    }
}
