//! Canonical serialization of the configuration files
//!
//! Rewrites `config.json` and `config/maintainers.json` into a byte-stable
//! form: explicit key order per object type (unknown keys appended
//! lexicographically), normalized and sorted topics, and deprecated
//! exercise entries reduced to their identifying fields. Works on raw
//! `serde_json::Value`s so distinctions the typed model cannot carry, such
//! as `null` vs `[]` topics, survive verbatim.

use serde_json::{Map, Value};

use crate::domain::topics;

/// Top-level key order for `config.json`.
const CONFIG_KEY_ORDER: &[&str] = &[
    "track_id",
    "language",
    "active",
    "blurb",
    "gitter",
    "checklist_issue",
    "ignore_pattern",
    "solution_pattern",
    "test_pattern",
    "foregone",
    "exercises",
];

/// Key order for one exercise entry.
const EXERCISE_KEY_ORDER: &[&str] = &[
    "slug",
    "uuid",
    "core",
    "unlocked_by",
    "difficulty",
    "topics",
];

/// Top-level key order for `config/maintainers.json`.
const MAINTAINERS_KEY_ORDER: &[&str] = &["docs_url", "maintainers"];

/// Key order for one maintainer entry.
const MAINTAINER_KEY_ORDER: &[&str] = &[
    "github_username",
    "alumnus",
    "show_on_website",
    "name",
    "link_text",
    "link_url",
    "avatar_url",
    "bio",
];

/// Produces the canonical form of a parsed `config.json`.
pub fn canonical_config(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };

    if let Some(Value::Array(exercises)) = map.remove("exercises") {
        let rewritten: Vec<Value> = exercises.into_iter().map(canonical_exercise).collect();
        map.insert("exercises".to_string(), Value::Array(rewritten));
    }

    Value::Object(with_ordering(map, CONFIG_KEY_ORDER))
}

/// Produces the canonical form of a parsed `config/maintainers.json`.
pub fn canonical_maintainers(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };

    if let Some(Value::Array(maintainers)) = map.remove("maintainers") {
        let rewritten: Vec<Value> = maintainers
            .into_iter()
            .map(|m| match m {
                Value::Object(fields) => Value::Object(with_ordering(fields, MAINTAINER_KEY_ORDER)),
                other => other,
            })
            .collect();
        map.insert("maintainers".to_string(), Value::Array(rewritten));
    }

    Value::Object(with_ordering(map, MAINTAINERS_KEY_ORDER))
}

/// Renders a canonical value as the bytes written to disk.
pub fn render(value: &Value) -> serde_json::Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

fn canonical_exercise(entry: Value) -> Value {
    let Value::Object(mut map) = entry else {
        return entry;
    };

    // A deprecated entry keeps only its identity; any other field in the
    // source would be stale and is dropped on write.
    if map.get("deprecated") == Some(&Value::Bool(true)) {
        let mut reduced = Map::new();
        for key in ["slug", "uuid"] {
            if let Some(v) = map.remove(key) {
                reduced.insert(key.to_string(), v);
            }
        }
        reduced.insert("deprecated".to_string(), Value::Bool(true));
        return Value::Object(reduced);
    }

    // Normalize topics only when present as an array; `null` stays `null`.
    if let Some(Value::Array(raw)) = map.remove("topics") {
        let mut normalized: Vec<String> = raw
            .iter()
            .filter_map(|t| t.as_str())
            .map(topics::normalize)
            .collect();
        normalized.sort();
        map.insert(
            "topics".to_string(),
            Value::Array(normalized.into_iter().map(Value::String).collect()),
        );
    }

    Value::Object(with_ordering(map, EXERCISE_KEY_ORDER))
}

/// Re-inserts `map`'s entries following `order`, then any remaining keys in
/// lexicographic order. Unknown keys are kept, never dropped.
fn with_ordering(mut map: Map<String, Value>, order: &[&str]) -> Map<String, Value> {
    let mut ordered = Map::new();

    for key in order {
        if let Some(value) = map.remove(*key) {
            ordered.insert((*key).to_string(), value);
        }
    }

    let mut remaining: Vec<(String, Value)> = map.into_iter().collect();
    remaining.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (key, value) in remaining {
        ordered.insert(key, value);
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn config_keys_come_out_in_canonical_order() {
        let canonical = canonical_config(parse(
            r#"{
                "exercises": [],
                "language": "Numbers",
                "active": true,
                "track_id": "numbers",
                "foregone": ["three"]
            }"#,
        ));

        let keys: Vec<&String> = canonical.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["track_id", "language", "active", "foregone", "exercises"]
        );
    }

    #[test]
    fn unknown_keys_are_appended_lexicographically() {
        let canonical = canonical_config(parse(
            r#"{"zebra": 1, "language": "X", "aardvark": 2, "active": false}"#,
        ));

        let keys: Vec<&String> = canonical.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["language", "active", "aardvark", "zebra"]);
    }

    #[test]
    fn exercise_keys_are_reordered() {
        let canonical = canonical_config(parse(
            r#"{
                "exercises": [
                    {"difficulty": 1, "uuid": "001", "slug": "one", "core": false, "unlocked_by": null, "topics": null}
                ]
            }"#,
        ));

        let exercise = &canonical["exercises"][0];
        let keys: Vec<&String> = exercise.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["slug", "uuid", "core", "unlocked_by", "difficulty", "topics"]
        );
    }

    #[test]
    fn topics_are_normalized_and_sorted() {
        let canonical = canonical_config(parse(
            r#"{
                "exercises": [
                    {"slug": "one", "topics": ["Logic", "Control-flow (conditionals)", "Booleans"]}
                ]
            }"#,
        ));

        assert_eq!(
            canonical["exercises"][0]["topics"],
            json!(["booleans", "control_flow_conditionals", "logic"])
        );
    }

    #[test]
    fn null_topics_stay_null_and_empty_stays_empty() {
        let canonical = canonical_config(parse(
            r#"{
                "exercises": [
                    {"slug": "a", "topics": null},
                    {"slug": "b", "topics": []}
                ]
            }"#,
        ));

        assert_eq!(canonical["exercises"][0]["topics"], Value::Null);
        assert_eq!(canonical["exercises"][1]["topics"], json!([]));
    }

    #[test]
    fn deprecated_entries_are_reduced_to_identity() {
        let canonical = canonical_config(parse(
            r#"{
                "exercises": [
                    {
                        "slug": "old",
                        "uuid": "00f",
                        "core": true,
                        "difficulty": 9,
                        "topics": ["history"],
                        "deprecated": true
                    }
                ]
            }"#,
        ));

        assert_eq!(
            canonical["exercises"][0],
            json!({"slug": "old", "uuid": "00f", "deprecated": true})
        );
    }

    #[test]
    fn maintainer_keys_are_reordered() {
        let canonical = canonical_maintainers(parse(
            r#"{
                "maintainers": [
                    {"alumnus": false, "bio": null, "github_username": "alice", "show_on_website": true}
                ],
                "docs_url": "http://example.com"
            }"#,
        ));

        let top_keys: Vec<&String> = canonical.as_object().unwrap().keys().collect();
        assert_eq!(top_keys, vec!["docs_url", "maintainers"]);

        let member_keys: Vec<&String> =
            canonical["maintainers"][0].as_object().unwrap().keys().collect();
        assert_eq!(
            member_keys,
            vec!["github_username", "alumnus", "show_on_website", "bio"]
        );
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let input = parse(
            r#"{
                "language": "Numbers",
                "track_id": "numbers",
                "exercises": [
                    {"slug": "one", "uuid": "001", "topics": ["Logic", "Booleans"], "difficulty": 1},
                    {"slug": "old", "uuid": "002", "deprecated": true}
                ]
            }"#,
        );

        let once = canonical_config(input);
        let twice = canonical_config(once.clone());
        assert_eq!(render(&once).unwrap(), render(&twice).unwrap());
    }

    #[test]
    fn render_uses_two_space_indent_and_trailing_newline() {
        let rendered = render(&json!({"a": [1]})).unwrap();
        assert_eq!(rendered, "{\n  \"a\": [\n    1\n  ]\n}\n");
    }
}
