//! Pattern tables for text-signal classification.
//!
//! Five families of case-insensitive regexes, compiled once at startup.
//! A text segment belongs to a family if any one of its patterns matches
//! anywhere in the segment; families are not mutually exclusive.

use regex::Regex;
use std::sync::LazyLock;

/// The five signal families tracked by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalFamily {
    /// Pain points and problems
    Pain,
    /// Questions / seeking help
    Question,
    /// Feature requests and wishes
    Request,
    /// Existing solutions mentioned
    Solution,
    /// Beliefs and perspectives
    Belief,
}

const PAIN_PATTERNS: &[&str] = &[
    r"\b(struggle|struggling|difficult|hard to|can't|cannot|unable to)\b",
    r"\b(frustrated|frustrating|annoying|annoyed|hate|hating)\b",
    r"\b(problem|issue|bug|broken|doesn't work|not working)\b",
    r"\b(wish there was|if only|would be nice if)\b",
    r"\b(tired of|sick of|fed up with)\b",
    r"\b(waste of time|time consuming|takes forever)\b",
    r"\b(expensive|overpriced|costs too much|can't afford)\b",
    r"\b(complicated|confusing|complex|overwhelming)\b",
];

const QUESTION_PATTERNS: &[&str] = &[
    r"\b(how do I|how can I|how to|what's the best way)\b",
    r"\b(anyone know|does anyone|has anyone)\b",
    r"\b(looking for|searching for|need help with|need a)\b",
    r"\b(recommend|suggestion|advice|tips)\b",
    r"\b(alternative to|replacement for|instead of)\b",
    r"\b(is there a|are there any)\b",
    // Ends with a question mark
    r"\?$",
];

const REQUEST_PATTERNS: &[&str] = &[
    r"\b(wish|want|need|require|would love)\b",
    r"\b(should have|must have|needs to have)\b",
    r"\b(feature request|suggestion|idea)\b",
    r"\b(please add|can you add|would be great if)\b",
];

const SOLUTION_PATTERNS: &[&str] = &[
    r"\b(I use|I'm using|we use|currently using)\b",
    r"\b(switched to|moved to|migrated to)\b",
    r"\b(recommend|love|great tool|best tool)\b",
    r"\b(solved by|fixed by|helped by)\b",
];

const BELIEF_PATTERNS: &[&str] = &[
    r"\b(I think|I believe|in my opinion|IMO|IMHO)\b",
    r"\b(the problem is|the issue is|the truth is)\b",
    r"\b(people don't realize|most people think)\b",
    r"\b(the best approach|the right way|should be)\b",
];

// The tables are static; a failure to compile is a programming error.
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("invalid signal pattern"))
        .collect()
}

static PAIN: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(PAIN_PATTERNS));
static QUESTION: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(QUESTION_PATTERNS));
static REQUEST: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(REQUEST_PATTERNS));
static SOLUTION: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(SOLUTION_PATTERNS));
static BELIEF: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(BELIEF_PATTERNS));

pub fn family_patterns(family: SignalFamily) -> &'static [Regex] {
    match family {
        SignalFamily::Pain => &PAIN,
        SignalFamily::Question => &QUESTION,
        SignalFamily::Request => &REQUEST,
        SignalFamily::Solution => &SOLUTION,
        SignalFamily::Belief => &BELIEF,
    }
}

/// Any-pattern-matches semantics over one family.
pub fn matches_family(text: &str, family: SignalFamily) -> bool {
    family_patterns(family).iter().any(|p| p.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pain_patterns_match_frustration() {
        assert!(matches_family("I'm so frustrated with this tool", SignalFamily::Pain));
        assert!(matches_family("it's way too EXPENSIVE", SignalFamily::Pain));
        assert!(!matches_family("everything works great", SignalFamily::Pain));
    }

    #[test]
    fn question_patterns_match_help_seeking() {
        assert!(matches_family("how do I export my data", SignalFamily::Question));
        assert!(matches_family("does anyone have experience with this", SignalFamily::Question));
        assert!(matches_family("is this any good?", SignalFamily::Question));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(matches_family("WISH there was a better way", SignalFamily::Request));
        assert!(matches_family("imo this is fine", SignalFamily::Belief));
    }

    #[test]
    fn solution_patterns_match_tool_mentions() {
        assert!(matches_family("we use Airtable for this", SignalFamily::Solution));
        assert!(matches_family("switched to a self-hosted setup", SignalFamily::Solution));
    }
}
