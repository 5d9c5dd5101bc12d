//! Additive set-folding over labeled slug lists
//!
//! Every consistency check is the same shape: fold one or more "add" sets
//! (slugs with a property) against "remove" sets (slugs with an excusing
//! property), then report the slugs whose count crosses a threshold.

use std::collections::BTreeMap;

/// A fold of slug counts. Backed by a BTreeMap so reported slugs come out
/// in stable lexicographic order.
#[derive(Debug, Default)]
pub struct Folder {
    counts: BTreeMap<String, i64>,
}

impl Folder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to the count of every slug in the set.
    pub fn add<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for slug in slugs {
            *self.counts.entry(slug.as_ref().to_string()).or_insert(0) += 1;
        }
        self
    }

    /// Subtracts one from the count of every slug in the set. Slugs never
    /// seen by `add` are recorded too, so an excuse alone cannot report.
    pub fn remove<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for slug in slugs {
            *self.counts.entry(slug.as_ref().to_string()).or_insert(0) -= 1;
        }
        self
    }

    /// Returns the slugs whose folded count exceeds `threshold`, sorted.
    pub fn over(self, threshold: i64) -> Vec<String> {
        self.counts
            .into_iter()
            .filter(|(_, count)| *count > threshold)
            .map(|(slug, _)| slug)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_without_excuse_reports() {
        let flagged = Folder::new()
            .add(["banana", "apple"])
            .over(0);

        assert_eq!(flagged, vec!["apple", "banana"]);
    }

    #[test]
    fn removal_excuses_a_slug() {
        let flagged = Folder::new()
            .add(["apple", "banana", "cherry"])
            .remove(["banana"])
            .over(0);

        assert_eq!(flagged, vec!["apple", "cherry"]);
    }

    #[test]
    fn removal_of_unknown_slug_reports_nothing() {
        let flagged = Folder::new().remove(["apple"]).over(0);
        assert!(flagged.is_empty());
    }

    #[test]
    fn higher_threshold_detects_conflicts() {
        let flagged = Folder::new()
            .add(["apple", "banana"])
            .add(["banana"])
            .over(1);

        assert_eq!(flagged, vec!["banana"]);
    }

    #[test]
    fn output_is_sorted() {
        let flagged = Folder::new().add(["pear", "apple", "mango"]).over(0);
        assert_eq!(flagged, vec!["apple", "mango", "pear"]);
    }
}
