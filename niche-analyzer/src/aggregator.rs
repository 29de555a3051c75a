//! Running accumulation, deduplication, and opportunity generation.

use std::collections::HashSet;

use nichelens_core::{BucketCaps, InsightBuckets, Opportunity, OpportunityKind};

/// Fragments of each bucket that feed one opportunity apiece.
const OPPORTUNITY_SIGNALS_PER_BUCKET: usize = 10;
const OPPORTUNITY_TEXT_MAX_CHARS: usize = 100;

/// Collects per-post classification results for one research run.
///
/// Appending preserves arrival order; [`finalize`](Self::finalize) applies
/// set-semantics deduplication and the per-bucket caps, after which callers
/// must not assume any ordering.
#[derive(Debug, Clone)]
pub struct InsightAggregator {
    buckets: InsightBuckets,
    caps: BucketCaps,
}

impl InsightAggregator {
    pub fn new(caps: BucketCaps) -> Self {
        Self {
            buckets: InsightBuckets::default(),
            caps,
        }
    }

    /// Append one classification result into the running buckets.
    pub fn accumulate(&mut self, result: InsightBuckets) {
        self.buckets.extend_from(result);
    }

    /// Deduplicate each bucket and truncate to its cap. Idempotent:
    /// finalizing an already-finalized set yields the same set.
    pub fn finalize(&self) -> InsightBuckets {
        InsightBuckets {
            pain_points: dedup_and_cap(&self.buckets.pain_points, self.caps.pain_points),
            questions: dedup_and_cap(&self.buckets.questions, self.caps.questions),
            requests: dedup_and_cap(&self.buckets.requests, self.caps.requests),
            solutions_mentioned: dedup_and_cap(
                &self.buckets.solutions_mentioned,
                self.caps.solutions_mentioned,
            ),
            beliefs: dedup_and_cap(&self.buckets.beliefs, self.caps.beliefs),
        }
    }
}

fn dedup_and_cap(fragments: &[String], cap: usize) -> Vec<String> {
    let unique: HashSet<&String> = fragments.iter().collect();
    unique.into_iter().take(cap).cloned().collect()
}

/// One opportunity per top fragment of the pain, question, and request
/// buckets, in that order. Solutions and beliefs are tracked but
/// deliberately excluded here.
pub fn generate_opportunities(insights: &InsightBuckets) -> Vec<Opportunity> {
    let mut opportunities = Vec::new();

    for pain in insights.pain_points.iter().take(OPPORTUNITY_SIGNALS_PER_BUCKET) {
        opportunities.push(Opportunity {
            kind: OpportunityKind::PainPoint,
            signal: pain.clone(),
            opportunity: format!("Tool to address: {}...", truncate_chars(pain)),
        });
    }

    for question in insights.questions.iter().take(OPPORTUNITY_SIGNALS_PER_BUCKET) {
        opportunities.push(Opportunity {
            kind: OpportunityKind::Question,
            signal: question.clone(),
            opportunity: format!("Solution that answers: {}...", truncate_chars(question)),
        });
    }

    for request in insights.requests.iter().take(OPPORTUNITY_SIGNALS_PER_BUCKET) {
        opportunities.push(Opportunity {
            kind: OpportunityKind::FeatureRequest,
            signal: request.clone(),
            opportunity: format!("Build feature: {}...", truncate_chars(request)),
        });
    }

    opportunities
}

fn truncate_chars(s: &str) -> String {
    s.chars().take(OPPORTUNITY_TEXT_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets_with(pain: &[&str], questions: &[&str], requests: &[&str]) -> InsightBuckets {
        InsightBuckets {
            pain_points: pain.iter().map(|s| s.to_string()).collect(),
            questions: questions.iter().map(|s| s.to_string()).collect(),
            requests: requests.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn accumulate_appends_in_order() {
        let mut aggregator = InsightAggregator::new(BucketCaps::default());
        aggregator.accumulate(buckets_with(&["a"], &[], &[]));
        aggregator.accumulate(buckets_with(&["b"], &["q"], &[]));
        assert_eq!(aggregator.buckets.pain_points, vec!["a", "b"]);
        assert_eq!(aggregator.buckets.questions, vec!["q"]);
    }

    #[test]
    fn finalize_deduplicates_and_caps() {
        let mut aggregator = InsightAggregator::new(BucketCaps::uniform(2));
        aggregator.accumulate(buckets_with(&["a", "b", "a", "c"], &[], &[]));

        let finalized = aggregator.finalize();
        assert_eq!(finalized.pain_points.len(), 2);
        let unique: std::collections::HashSet<_> = finalized.pain_points.iter().collect();
        assert_eq!(unique.len(), finalized.pain_points.len());
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut aggregator = InsightAggregator::new(BucketCaps::uniform(3));
        aggregator.accumulate(buckets_with(
            &["a", "a", "b"],
            &["q1", "q2", "q1"],
            &["r"],
        ));

        let once = aggregator.finalize();
        let mut again = InsightAggregator::new(BucketCaps::uniform(3));
        again.accumulate(once.clone());
        let twice = again.finalize();

        let as_sets = |b: &InsightBuckets| {
            (
                b.pain_points.iter().cloned().collect::<std::collections::HashSet<_>>(),
                b.questions.iter().cloned().collect::<std::collections::HashSet<_>>(),
                b.requests.iter().cloned().collect::<std::collections::HashSet<_>>(),
            )
        };
        assert_eq!(as_sets(&once), as_sets(&twice));
    }

    #[test]
    fn opportunities_take_first_ten_per_bucket_in_kind_order() {
        let pain: Vec<String> = (0..15).map(|i| format!("pain {i}")).collect();
        let insights = InsightBuckets {
            pain_points: pain,
            questions: vec!["how do I x".to_string()],
            requests: vec!["please add y".to_string()],
            solutions_mentioned: vec!["we use z".to_string()],
            beliefs: vec!["I think w".to_string()],
        };

        let opportunities = generate_opportunities(&insights);
        assert_eq!(opportunities.len(), 12);
        assert!(matches!(opportunities[0].kind, OpportunityKind::PainPoint));
        assert!(matches!(opportunities[10].kind, OpportunityKind::Question));
        assert!(matches!(opportunities[11].kind, OpportunityKind::FeatureRequest));
        // Solutions and beliefs never feed opportunities
        assert!(!opportunities.iter().any(|o| o.signal.contains("we use z")));
    }

    #[test]
    fn opportunity_text_truncates_to_100_chars() {
        let long = "x".repeat(300);
        let insights = InsightBuckets {
            pain_points: vec![long.clone()],
            ..Default::default()
        };
        let opportunities = generate_opportunities(&insights);
        assert_eq!(opportunities[0].signal, long);
        assert_eq!(
            opportunities[0].opportunity,
            format!("Tool to address: {}...", "x".repeat(100))
        );
    }
}
