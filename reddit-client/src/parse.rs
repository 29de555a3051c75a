//! Defensive parsing of scraping-proxy responses.
//!
//! The upstream proxies wrap payloads in several known shapes: the Reddit
//! listing form (`data.children[].data`), flat arrays under `subreddits` /
//! `posts`, or a `body` envelope. Field names vary the same way
//! (`display_name` vs `name`, `selftext` vs `body`). All of that probing
//! lives here; callers only ever see typed records with defaults filled in.

use nichelens_core::{CommunityCandidate, ContentItem};
use serde_json::Value;

const DESCRIPTION_MAX_CHARS: usize = 200;

/// Keys that may hold the entry array for a community-search response.
const COMMUNITY_LIST_KEYS: &[&str] = &["subreddits", "body", "results"];

/// Keys that may hold the entry array for a post-listing response.
const POST_LIST_KEYS: &[&str] = &["posts", "body", "results"];

pub fn parse_community_listing(value: &Value) -> Vec<CommunityCandidate> {
    listing_entries(value, COMMUNITY_LIST_KEYS)
        .into_iter()
        .filter_map(community_from_entry)
        .collect()
}

pub fn parse_post_listing(value: &Value, community: &str) -> Vec<ContentItem> {
    listing_entries(value, POST_LIST_KEYS)
        .into_iter()
        .map(|entry| post_from_entry(entry, community))
        .collect()
}

/// Locate the entry array, whatever envelope the proxy used.
fn listing_entries<'a>(value: &'a Value, alt_keys: &[&str]) -> Vec<&'a Value> {
    if let Some(children) = value.pointer("/data/children").and_then(Value::as_array) {
        return children.iter().collect();
    }
    for key in alt_keys {
        match value.get(key) {
            Some(Value::Array(entries)) => return entries.iter().collect(),
            // `body` is sometimes itself a listing object
            Some(nested @ Value::Object(_)) => {
                if let Some(children) = nested
                    .get("children")
                    .or_else(|| nested.pointer("/data/children"))
                    .and_then(Value::as_array)
                {
                    return children.iter().collect();
                }
            }
            _ => {}
        }
    }
    Vec::new()
}

/// An entry is either `{kind, data: {..}}` or the record itself.
fn record(entry: &Value) -> &Value {
    match entry.get("data") {
        Some(data @ Value::Object(_)) => data,
        _ => entry,
    }
}

fn string_field(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| record.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn u64_field(record: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| record.get(key).and_then(Value::as_u64))
        .unwrap_or(0)
}

fn i64_field(record: &Value, keys: &[&str]) -> i64 {
    keys.iter()
        .find_map(|key| {
            let v = record.get(key)?;
            // Scores and timestamps arrive as integers or floats
            v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
        })
        .unwrap_or(0)
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn community_from_entry(entry: &Value) -> Option<CommunityCandidate> {
    let record = record(entry);
    let name = string_field(record, &["display_name", "name"]);
    if name.is_empty() {
        return None;
    }
    let description = string_field(record, &["public_description", "description"]);
    Some(CommunityCandidate::new(
        name,
        u64_field(record, &["subscribers", "subscriber_count"]),
        truncate_chars(&description, DESCRIPTION_MAX_CHARS),
    ))
}

fn post_from_entry(entry: &Value, community: &str) -> ContentItem {
    let record = record(entry);
    ContentItem {
        id: string_field(record, &["id"]),
        title: string_field(record, &["title"]),
        body_text: string_field(record, &["selftext", "body", "text"]),
        score: i64_field(record, &["score", "ups"]),
        comment_count: u64_field(record, &["num_comments", "comments"]) as u32,
        url: string_field(record, &["url", "permalink"]),
        created_at: i64_field(record, &["created_utc", "created"]),
        source_community: community.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_reddit_listing_shape() {
        let value = json!({
            "kind": "Listing",
            "data": {
                "children": [
                    {"kind": "t5", "data": {
                        "display_name": "smallbusiness",
                        "subscribers": 1_200_000,
                        "public_description": "Questions and answers about small business."
                    }},
                    {"kind": "t5", "data": {
                        "display_name": "Entrepreneur",
                        "subscribers": 3_000_000
                    }}
                ]
            }
        });

        let communities = parse_community_listing(&value);
        assert_eq!(communities.len(), 2);
        assert_eq!(communities[0].name, "smallbusiness");
        assert_eq!(communities[0].subscribers, 1_200_000);
        assert_eq!(communities[0].url, "https://reddit.com/r/smallbusiness");
        // Missing description defaults to empty
        assert_eq!(communities[1].description, "");
    }

    #[test]
    fn parses_flat_subreddits_shape() {
        let value = json!({
            "subreddits": [
                {"name": "marketing", "subscriber_count": 500_000, "description": "All things marketing"}
            ]
        });

        let communities = parse_community_listing(&value);
        assert_eq!(communities.len(), 1);
        assert_eq!(communities[0].name, "marketing");
        assert_eq!(communities[0].subscribers, 500_000);
    }

    #[test]
    fn skips_entries_without_a_name() {
        let value = json!({"subreddits": [{"subscribers": 10}, {"name": "kept"}]});
        let communities = parse_community_listing(&value);
        assert_eq!(communities.len(), 1);
        assert_eq!(communities[0].name, "kept");
    }

    #[test]
    fn truncates_long_descriptions() {
        let value = json!({
            "subreddits": [{"name": "x", "description": "d".repeat(500)}]
        });
        let communities = parse_community_listing(&value);
        assert_eq!(communities[0].description.chars().count(), 200);
    }

    #[test]
    fn parses_posts_from_body_envelope() {
        let value = json!({
            "meta": {"status": 200},
            "body": [
                {"id": "abc", "title": "How do I pick a CRM?", "selftext": "Looking for advice",
                 "score": 42, "num_comments": 7, "url": "https://reddit.com/x", "created_utc": 1_700_000_000.0}
            ]
        });

        let posts = parse_post_listing(&value, "smallbusiness");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "abc");
        assert_eq!(posts[0].score, 42);
        assert_eq!(posts[0].comment_count, 7);
        assert_eq!(posts[0].created_at, 1_700_000_000);
        assert_eq!(posts[0].source_community, "smallbusiness");
    }

    #[test]
    fn post_fields_default_when_absent() {
        let value = json!({"posts": [{}]});
        let posts = parse_post_listing(&value, "test");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "");
        assert_eq!(posts[0].body_text, "");
        assert_eq!(posts[0].score, 0);
        assert_eq!(posts[0].comment_count, 0);
    }

    #[test]
    fn body_falls_back_across_key_variants() {
        let value = json!({
            "data": {"children": [
                {"data": {"id": "p1", "title": "t", "body": "comment-style body"}}
            ]}
        });
        let posts = parse_post_listing(&value, "test");
        assert_eq!(posts[0].body_text, "comment-style body");
    }

    #[test]
    fn unrecognized_shape_yields_empty() {
        let value = json!({"unexpected": true});
        assert!(parse_community_listing(&value).is_empty());
        assert!(parse_post_listing(&value, "test").is_empty());
    }
}
