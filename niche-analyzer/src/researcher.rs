//! End-to-end niche research workflow.
//!
//! Discover communities, fetch and classify their top content, accumulate
//! insights, and assemble the final report. Sequential by design: external
//! calls are awaited one at a time with a courtesy pause between them.

use chrono::Utc;
use nichelens_core::{
    CommunityAnalysis, CommunityCandidate, CommunitySearch, ContentFetch, ContentItem,
    InsightBuckets, IntentCounts, ResearchReport, ResearchSettings,
};
use tracing::{debug, info, warn};

use crate::aggregator::{generate_opportunities, InsightAggregator};
use crate::classifier::SignalClassifier;
use crate::discovery::SubredditDiscovery;
use crate::themes;

/// Top posts retained per community for the report corpus.
const TOP_POSTS_PER_COMMUNITY: usize = 10;
/// Posts kept in the final report after the score sort.
const REPORT_TOP_POSTS: usize = 20;
/// Themes extracted per community and kept in the merged ranking.
const THEME_COUNT: usize = 20;

/// Terminal outcome of a research run. `NoCommunities` is deliberately not
/// an error: it lets callers distinguish "nothing found" from a report that
/// found nothing interesting.
#[derive(Debug)]
pub enum ResearchOutcome {
    Report(ResearchReport),
    NoCommunities,
}

pub struct NicheResearcher<'a> {
    search: &'a dyn CommunitySearch,
    fetch: &'a dyn ContentFetch,
    classifier: SignalClassifier,
    settings: ResearchSettings,
}

impl<'a> NicheResearcher<'a> {
    pub fn new(
        search: &'a dyn CommunitySearch,
        fetch: &'a dyn ContentFetch,
        settings: ResearchSettings,
    ) -> Self {
        Self {
            search,
            fetch,
            classifier: SignalClassifier::new(),
            settings,
        }
    }

    /// Discovery-only mode: ranked candidates, no analysis.
    pub async fn discover(&self, niche: &str) -> Vec<CommunityCandidate> {
        SubredditDiscovery::new(self.search)
            .discover(niche, self.settings.max_communities, &self.settings)
            .await
    }

    /// Single-community mode: fetch and classify one community's top
    /// content. A fetch failure is logged and treated as zero posts.
    pub async fn analyze_community(&self, community: &str) -> CommunityAnalysis {
        info!("Analyzing r/{}", community);

        let posts = match self
            .fetch
            .fetch_top_content(
                community,
                self.settings.time_window,
                self.settings.posts_per_community,
            )
            .await
        {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Fetching r/{} failed, treating as empty: {}", community, e);
                Vec::new()
            }
        };

        let mut intent_counts = IntentCounts::default();
        let mut insights = InsightBuckets::default();
        for post in &posts {
            intent_counts.record(self.classifier.categorize_intent(&post.title));
            insights.extend_from(self.classifier.classify_post(&post.title, &post.body_text));
        }

        let titles = posts.iter().map(|p| p.title.as_str());
        let community_themes = themes::extract_common_themes(titles, THEME_COUNT);

        debug!(
            "r/{}: {} posts, intents {:?}",
            community,
            posts.len(),
            intent_counts
        );

        let posts_analyzed = posts.len();
        let top_posts: Vec<ContentItem> =
            posts.into_iter().take(TOP_POSTS_PER_COMMUNITY).collect();

        CommunityAnalysis {
            community: community.to_string(),
            posts_analyzed,
            top_posts,
            intent_counts,
            insights,
            themes: community_themes,
        }
    }

    /// Full workflow: discover, analyze each community in ranked order,
    /// aggregate, and assemble the report.
    pub async fn research(&self, niche: &str) -> ResearchOutcome {
        info!("Starting niche research: {}", niche);

        let communities = self.discover(niche).await;
        if communities.is_empty() {
            warn!("No communities found for '{}'", niche);
            return ResearchOutcome::NoCommunities;
        }

        let mut aggregator = InsightAggregator::new(self.settings.caps);
        let mut corpus: Vec<ContentItem> = Vec::new();
        let mut community_themes: Vec<String> = Vec::new();
        let mut total_posts = 0;

        for candidate in &communities {
            let analysis = self.analyze_community(&candidate.name).await;

            total_posts += analysis.posts_analyzed;
            corpus.extend(analysis.top_posts);
            community_themes.extend(analysis.themes);
            aggregator.accumulate(analysis.insights);

            // Courtesy pause before the next community
            tokio::time::sleep(self.settings.community_pause()).await;
        }

        let insights = aggregator.finalize();
        let common_themes = themes::rank_by_frequency(community_themes, THEME_COUNT);
        let opportunities = generate_opportunities(&insights);

        corpus.sort_by(|a, b| b.score.cmp(&a.score));
        corpus.truncate(REPORT_TOP_POSTS);

        info!(
            "Research complete: {} communities, {} posts, {} pain points, {} opportunities",
            communities.len(),
            total_posts,
            insights.pain_points.len(),
            opportunities.len()
        );

        ResearchOutcome::Report(ResearchReport {
            niche: niche.to_string(),
            timestamp: Utc::now(),
            communities_found: communities,
            total_posts_analyzed: total_posts,
            top_posts: corpus,
            insights,
            common_themes,
            opportunities,
        })
    }
}
