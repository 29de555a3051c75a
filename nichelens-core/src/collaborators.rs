use async_trait::async_trait;

use crate::error::CollaboratorError;
use crate::types::{CommunityCandidate, ContentItem, TimeWindow};

/// Community-search collaborator. Backed in production by a scraping
/// proxy; mocked in tests. An `Err` is treated by callers as
/// "no results for this query".
#[async_trait]
pub trait CommunitySearch: Send + Sync {
    async fn search_communities(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CommunityCandidate>, CollaboratorError>;
}

/// Content-fetch collaborator: top posts of a community within a
/// time window. Same error contract as [`CommunitySearch`].
#[async_trait]
pub trait ContentFetch: Send + Sync {
    async fn fetch_top_content(
        &self,
        community: &str,
        time_window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<ContentItem>, CollaboratorError>;
}
