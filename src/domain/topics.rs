//! Topic string normalization
//!
//! Topics in `config.json` are free-form when written by humans
//! ("Control-flow (conditionals)") and snake_case when canonical
//! ("control_flow_conditionals").

use std::sync::OnceLock;

use regex::Regex;

/// Matches everything that is not a lowercase letter, whitespace, hyphen or
/// underscore. Whitespace and hyphens survive this pass as word delimiters.
fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z\s\-_]+").expect("static pattern"))
}

/// Matches runs of word delimiters to collapse into a single underscore.
fn delimiters() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\-]+").expect("static pattern"))
}

/// Normalizes a topic to lowercase snake_case.
pub fn normalize(topic: &str) -> String {
    let lowered = topic.to_lowercase();
    let stripped = disallowed().replace_all(&lowered, "");
    delimiters().replace_all(&stripped, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lowercases() {
        assert_eq!(normalize("APPLE"), "apple");
    }

    #[test]
    fn strips_punctuation_and_joins_words() {
        assert_eq!(
            normalize("Control-flow (conditionals)"),
            "control_flow_conditionals"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("honeydew      melon"), "honeydew_melon");
    }

    #[test]
    fn keeps_existing_snake_case() {
        assert_eq!(normalize("text_formatting"), "text_formatting");
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(topic in ".{0,64}") {
            let once = normalize(&topic);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn output_is_snake_case_charset(topic in ".{0,64}") {
            let normalized = normalize(&topic);
            prop_assert!(normalized.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
