//! Sentence-level signal extraction and post intent categorization.

use nichelens_core::{InsightBuckets, PostIntent};

use crate::patterns::{matches_family, SignalFamily};

/// Title phrases that mark a post as sharing work rather than asking for it.
const SHOWCASE_PHRASES: &[&str] = &["i made", "i built", "i created", "check out", "showcase"];

/// Pattern-driven classifier over free text.
///
/// Pure: same input always yields the same buckets, nothing is retained
/// between calls, and no input can make it fail. Empty text produces empty
/// buckets and `Discussion` intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalClassifier;

impl SignalClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Split text into sentence-like segments on `.`, `!`, `?`, or newline,
    /// dropping empty and whitespace-only segments.
    pub fn split_segments(text: &str) -> impl Iterator<Item = &str> {
        text.split(['.', '!', '?', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Segments of `text` that match at least one pattern of `family`.
    pub fn matching_segments(text: &str, family: SignalFamily) -> Vec<String> {
        Self::split_segments(text)
            .filter(|segment| matches_family(segment, family))
            .map(str::to_string)
            .collect()
    }

    /// Classify a post into the five insight buckets. Title segments come
    /// first, then body segments; a segment may land in several buckets.
    pub fn classify_post(&self, title: &str, body: &str) -> InsightBuckets {
        let full_text = format!("{title}. {body}");
        self.classify_text(&full_text)
    }

    /// Classify a raw comment body.
    pub fn classify_comment(&self, body: &str) -> InsightBuckets {
        self.classify_text(body)
    }

    /// Classify a batch of comment bodies into one set of buckets.
    pub fn classify_comments<'a>(
        &self,
        bodies: impl IntoIterator<Item = &'a str>,
    ) -> InsightBuckets {
        let mut buckets = InsightBuckets::default();
        for body in bodies {
            if body.is_empty() {
                continue;
            }
            buckets.extend_from(self.classify_text(body));
        }
        buckets
    }

    fn classify_text(&self, text: &str) -> InsightBuckets {
        InsightBuckets {
            pain_points: Self::matching_segments(text, SignalFamily::Pain),
            questions: Self::matching_segments(text, SignalFamily::Question),
            requests: Self::matching_segments(text, SignalFamily::Request),
            solutions_mentioned: Self::matching_segments(text, SignalFamily::Solution),
            beliefs: Self::matching_segments(text, SignalFamily::Belief),
        }
    }

    /// Categorize a post's intent from its title alone.
    ///
    /// First-match priority, a deliberate tie-break:
    /// question mark or question pattern, then pain, then request, then
    /// the showcase phrase set, else general discussion.
    pub fn categorize_intent(&self, title: &str) -> PostIntent {
        let title = title.to_lowercase();

        if title.contains('?') || matches_family(&title, SignalFamily::Question) {
            PostIntent::Question
        } else if matches_family(&title, SignalFamily::Pain) {
            PostIntent::Complaint
        } else if matches_family(&title, SignalFamily::Request) {
            PostIntent::Request
        } else if SHOWCASE_PHRASES.iter().any(|phrase| title.contains(phrase)) {
            PostIntent::Showcase
        } else {
            PostIntent::Discussion
        }
    }
}
