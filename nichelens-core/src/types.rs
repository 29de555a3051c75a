use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::CoreError;

/// A post (or comment) pulled from a community. Immutable once fetched;
/// every field is filled with a safe default when the upstream response
/// omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub body_text: String,
    pub score: i64,
    pub comment_count: u32,
    pub url: String,
    pub created_at: i64,
    pub source_community: String,
}

/// A community surfaced by discovery. Uniqueness key is `name`;
/// never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityCandidate {
    pub name: String,
    pub subscribers: u64,
    pub description: String,
    pub url: String,
}

impl CommunityCandidate {
    pub fn new(name: impl Into<String>, subscribers: u64, description: impl Into<String>) -> Self {
        let name = name.into();
        let url = format!("https://reddit.com/r/{name}");
        Self {
            name,
            subscribers,
            description: description.into(),
            url,
        }
    }
}

/// Time window for top-content fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    #[default]
    Year,
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall intent of a post, judged from its title alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostIntent {
    /// Seeking help or information
    Question,
    /// Expressing frustration
    Complaint,
    /// Requesting a feature or solution
    Request,
    /// Sharing work or an achievement
    Showcase,
    /// General discussion
    Discussion,
}

impl PostIntent {
    pub fn label(&self) -> &'static str {
        match self {
            PostIntent::Question => "question",
            PostIntent::Complaint => "complaint",
            PostIntent::Request => "request",
            PostIntent::Showcase => "showcase",
            PostIntent::Discussion => "discussion",
        }
    }
}

impl fmt::Display for PostIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-community tally of post intents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentCounts {
    pub question: usize,
    pub complaint: usize,
    pub request: usize,
    pub showcase: usize,
    pub discussion: usize,
}

impl IntentCounts {
    pub fn record(&mut self, intent: PostIntent) {
        match intent {
            PostIntent::Question => self.question += 1,
            PostIntent::Complaint => self.complaint += 1,
            PostIntent::Request => self.request += 1,
            PostIntent::Showcase => self.showcase += 1,
            PostIntent::Discussion => self.discussion += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.question + self.complaint + self.request + self.showcase + self.discussion
    }
}

/// The five insight buckets. Categories are not mutually exclusive:
/// the same fragment may appear in several buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightBuckets {
    pub pain_points: Vec<String>,
    pub questions: Vec<String>,
    pub requests: Vec<String>,
    pub solutions_mentioned: Vec<String>,
    pub beliefs: Vec<String>,
}

impl InsightBuckets {
    pub fn extend_from(&mut self, other: InsightBuckets) {
        self.pain_points.extend(other.pain_points);
        self.questions.extend(other.questions);
        self.requests.extend(other.requests);
        self.solutions_mentioned.extend(other.solutions_mentioned);
        self.beliefs.extend(other.beliefs);
    }

    pub fn is_empty(&self) -> bool {
        self.pain_points.is_empty()
            && self.questions.is_empty()
            && self.requests.is_empty()
            && self.solutions_mentioned.is_empty()
            && self.beliefs.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    PainPoint,
    Question,
    FeatureRequest,
}

/// A product opportunity derived from one extracted signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub signal: String,
    pub opportunity: String,
}

/// Result of analyzing a single community.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityAnalysis {
    pub community: String,
    pub posts_analyzed: usize,
    pub top_posts: Vec<ContentItem>,
    pub intent_counts: IntentCounts,
    pub insights: InsightBuckets,
    pub themes: Vec<String>,
}

/// Complete research report for a niche. Assembled once per run and
/// immutable afterwards; serialization format is the caller's concern.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchReport {
    pub niche: String,
    pub timestamp: DateTime<Utc>,
    pub communities_found: Vec<CommunityCandidate>,
    pub total_posts_analyzed: usize,
    pub top_posts: Vec<ContentItem>,
    #[serde(flatten)]
    pub insights: InsightBuckets,
    pub common_themes: Vec<String>,
    pub opportunities: Vec<Opportunity>,
}

impl ResearchReport {
    /// Serialize the report to pretty JSON at `path`. The parent directory
    /// must already exist.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
