//! Community discovery: niche keyword expansion and ranked search.

use std::collections::HashMap;

use nichelens_core::{CommunityCandidate, CommunitySearch, ResearchSettings};
use tracing::{debug, info, warn};

const VARIATION_SUFFIXES: &[&str] = &["software", "tool", "app", "automation", "help", "tips"];

/// Deterministic search-term variations for a niche keyword, deduplicated
/// preserving first occurrence. Only the leading few are actually queried
/// (see `ResearchSettings::variations_queried`).
pub fn generate_niche_variations(niche: &str) -> Vec<String> {
    let base = niche.to_lowercase().trim().to_string();
    let words: Vec<&str> = base.split_whitespace().collect();

    let mut variations = vec![base.clone()];
    for suffix in VARIATION_SUFFIXES {
        variations.push(format!("{base} {suffix}"));
    }
    variations.push(format!("best {base}"));
    variations.push(format!("{base} for beginners"));
    variations.push(format!("{base} problems"));

    // Singular/plural flip
    if let Some(stripped) = base.strip_suffix('s') {
        variations.push(stripped.to_string());
    } else {
        variations.push(format!("{base}s"));
    }

    // Word combinations for multi-word niches
    if words.len() > 1 {
        variations.push(words[0].to_string());
        variations.push(words[words.len() - 1].to_string());
        let reversed: Vec<&str> = words.iter().rev().copied().collect();
        variations.push(reversed.join(" "));
    }

    let mut seen = HashMap::new();
    variations.retain(|v| seen.insert(v.clone(), ()).is_none());
    variations
}

/// Expands a niche into search variations, queries the community-search
/// collaborator per variation, and merges the results ranked by audience
/// size. A failed variation is logged and skipped; it never aborts
/// discovery.
pub struct SubredditDiscovery<'a> {
    search: &'a dyn CommunitySearch,
}

impl<'a> SubredditDiscovery<'a> {
    pub fn new(search: &'a dyn CommunitySearch) -> Self {
        Self { search }
    }

    /// Discover up to `max_communities` communities for `niche`, sorted by
    /// subscriber count descending. Duplicate names across variations keep
    /// their first-seen record.
    pub async fn discover(
        &self,
        niche: &str,
        max_communities: usize,
        settings: &ResearchSettings,
    ) -> Vec<CommunityCandidate> {
        info!("Discovering communities for niche '{}'", niche);

        let variations = generate_niche_variations(niche);
        let mut merged: HashMap<String, CommunityCandidate> = HashMap::new();

        for variation in variations.iter().take(settings.variations_queried) {
            debug!("Searching communities: '{}'", variation);
            match self
                .search
                .search_communities(variation, settings.communities_per_query)
                .await
            {
                Ok(candidates) => {
                    for candidate in candidates {
                        merged.entry(candidate.name.clone()).or_insert(candidate);
                    }
                }
                Err(e) => {
                    warn!("Search for '{}' failed, skipping: {}", variation, e);
                }
            }

            // Courtesy pause between variation queries
            tokio::time::sleep(settings.search_pause()).await;
        }

        let mut candidates: Vec<CommunityCandidate> = merged.into_values().collect();
        candidates.sort_by(|a, b| b.subscribers.cmp(&a.subscribers));
        candidates.truncate(max_communities);

        info!("Found {} communities for '{}'", candidates.len(), niche);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nichelens_core::CollaboratorError;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct StubSearch {
        // One response list per call, in order; None simulates a failure
        responses: Mutex<Vec<Option<Vec<CommunityCandidate>>>>,
        queries: Mutex<Vec<String>>,
    }

    impl StubSearch {
        fn new(responses: Vec<Option<Vec<CommunityCandidate>>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommunitySearch for StubSearch {
        async fn search_communities(
            &self,
            query: &str,
            _limit: u32,
        ) -> Result<Vec<CommunityCandidate>, CollaboratorError> {
            self.queries.lock().unwrap().push(query.to_string());
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Ok(Vec::new());
            }
            responses.remove(0).ok_or(CollaboratorError::ErrorIndicator {
                message: "quota exceeded".to_string(),
            })
        }
    }

    fn fast_settings() -> ResearchSettings {
        ResearchSettings {
            search_pause_ms: 0,
            community_pause_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn variations_cover_all_generation_rules() {
        let variations = generate_niche_variations("email marketing");
        let set: HashSet<&str> = variations.iter().map(String::as_str).collect();

        assert!(set.contains("email marketing"));
        assert!(set.contains("email marketing software"));
        assert!(set.contains("best email marketing"));
        assert!(set.contains("email marketing for beginners"));
        assert!(set.contains("email marketing problems"));
        assert!(set.contains("email marketings"));
        assert!(set.contains("email"));
        assert!(set.contains("marketing"));
        assert!(set.contains("marketing email"));
    }

    #[test]
    fn variations_flip_trailing_s_and_skip_word_splits_for_single_words() {
        let variations = generate_niche_variations("Podcasts");
        let set: HashSet<&str> = variations.iter().map(String::as_str).collect();
        assert!(set.contains("podcasts"));
        assert!(set.contains("podcast"));
        // Single-word niches get no word-combination variations
        assert!(!variations.iter().any(|v| v == "podcasts podcasts"));
    }

    #[test]
    fn variations_are_deterministic_and_unique() {
        let first = generate_niche_variations("crm");
        let second = generate_niche_variations("crm");
        assert_eq!(first, second);
        let set: HashSet<&String> = first.iter().collect();
        assert_eq!(set.len(), first.len());
    }

    #[tokio::test]
    async fn discovery_merges_first_wins_and_ranks_by_subscribers() {
        let search = StubSearch::new(vec![
            Some(vec![
                CommunityCandidate::new("smallbiz", 100, "original description"),
                CommunityCandidate::new("crm", 5_000, ""),
            ]),
            Some(vec![
                // Duplicate name with a different count must not overwrite
                CommunityCandidate::new("smallbiz", 999_999, "other description"),
                CommunityCandidate::new("sales", 2_000, ""),
            ]),
        ]);

        let discovery = SubredditDiscovery::new(&search);
        let candidates = discovery.discover("crm", 10, &fast_settings()).await;

        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["crm", "sales", "smallbiz"]);
        let smallbiz = candidates.iter().find(|c| c.name == "smallbiz").unwrap();
        assert_eq!(smallbiz.subscribers, 100);
        assert_eq!(smallbiz.description, "original description");
    }

    #[tokio::test]
    async fn discovery_never_returns_duplicate_names() {
        let search = StubSearch::new(vec![
            Some(vec![CommunityCandidate::new("dup", 10, "")]),
            Some(vec![CommunityCandidate::new("dup", 20, "")]),
            Some(vec![CommunityCandidate::new("dup", 30, "")]),
        ]);

        let discovery = SubredditDiscovery::new(&search);
        let candidates = discovery.discover("niche", 10, &fast_settings()).await;
        assert_eq!(candidates.len(), 1);
    }

    #[tokio::test]
    async fn failed_variations_are_skipped_not_fatal() {
        let search = StubSearch::new(vec![
            None,
            Some(vec![CommunityCandidate::new("found", 42, "")]),
            None,
        ]);

        let discovery = SubredditDiscovery::new(&search);
        let candidates = discovery.discover("niche", 10, &fast_settings()).await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "found");
    }

    #[tokio::test]
    async fn all_failures_yield_empty_sequence() {
        let search = StubSearch::new(vec![None, None, None, None, None]);
        let discovery = SubredditDiscovery::new(&search);
        let candidates = discovery.discover("niche", 10, &fast_settings()).await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn only_the_configured_number_of_variations_is_queried() {
        let search = StubSearch::new(Vec::new());
        let discovery = SubredditDiscovery::new(&search);
        discovery.discover("email marketing", 10, &fast_settings()).await;
        assert_eq!(search.queries.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn result_is_truncated_to_requested_maximum() {
        let many: Vec<CommunityCandidate> = (0..8)
            .map(|i| CommunityCandidate::new(format!("c{i}"), i as u64, ""))
            .collect();
        let search = StubSearch::new(vec![Some(many)]);
        let discovery = SubredditDiscovery::new(&search);
        let candidates = discovery.discover("niche", 3, &fast_settings()).await;
        assert_eq!(candidates.len(), 3);
        // Ranked by subscribers descending before truncation
        assert_eq!(candidates[0].name, "c7");
    }
}
