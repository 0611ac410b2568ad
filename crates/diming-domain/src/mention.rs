//! Mention module - the records produced by an extraction

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single place name reported by the model together with its occurrence count
///
/// Field names match the JSON schema the model is instructed to emit, so a
/// mention decodes directly from `{"place_name": "...", "count": N}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceMention {
    /// Name of the place, possibly fictional
    pub place_name: String,

    /// Number of occurrences as reported by the model
    pub count: u64,
}

impl PlaceMention {
    /// Create a new mention
    pub fn new(place_name: impl Into<String>, count: u64) -> Self {
        Self {
            place_name: place_name.into(),
            count,
        }
    }

    /// Check structural well-formedness
    ///
    /// Only shape is checked here. Whether the count is plausible is not.
    pub fn validate(&self) -> Result<(), String> {
        if self.place_name.trim().is_empty() {
            return Err("place_name is empty".to_string());
        }
        Ok(())
    }
}

/// Ordered mentions extracted from one text, in model output order
///
/// Two mentions with the same name are kept as separate entries; callers that
/// want one entry per place use [`ExtractionResult::merge_counts`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    mentions: Vec<PlaceMention>,
}

impl ExtractionResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mentions
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// True when the model found no places
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// Iterate mentions in output order
    pub fn iter(&self) -> std::slice::Iter<'_, PlaceMention> {
        self.mentions.iter()
    }

    /// Borrow the mentions as a slice
    pub fn mentions(&self) -> &[PlaceMention] {
        &self.mentions
    }

    /// Consume the result, returning the mentions
    pub fn into_mentions(self) -> Vec<PlaceMention> {
        self.mentions
    }

    /// Append another result, keeping both orders
    pub fn extend(&mut self, other: ExtractionResult) {
        self.mentions.extend(other.mentions);
    }

    /// Fold mentions sharing a `place_name` into one, summing their counts
    ///
    /// Entries keep the position of the first occurrence of each name.
    /// Counts come from model output, so the sum saturates at `u64::MAX`.
    pub fn merge_counts(&self) -> ExtractionResult {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut merged: Vec<PlaceMention> = Vec::new();

        for mention in &self.mentions {
            match index.get(mention.place_name.as_str()) {
                Some(&pos) => {
                    let entry = &mut merged[pos];
                    entry.count = entry.count.saturating_add(mention.count);
                }
                None => {
                    index.insert(mention.place_name.as_str(), merged.len());
                    merged.push(mention.clone());
                }
            }
        }

        ExtractionResult { mentions: merged }
    }
}

impl From<Vec<PlaceMention>> for ExtractionResult {
    fn from(mentions: Vec<PlaceMention>) -> Self {
        Self { mentions }
    }
}

impl IntoIterator for ExtractionResult {
    type Item = PlaceMention;
    type IntoIter = std::vec::IntoIter<PlaceMention>;

    fn into_iter(self) -> Self::IntoIter {
        self.mentions.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtractionResult {
    type Item = &'a PlaceMention;
    type IntoIter = std::slice::Iter<'a, PlaceMention>;

    fn into_iter(self) -> Self::IntoIter {
        self.mentions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_named_mention() {
        assert!(PlaceMention::new("东海", 2).validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_zero_count() {
        assert!(PlaceMention::new("天庭", 0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(PlaceMention::new("", 1).validate().is_err());
        assert!(PlaceMention::new("   ", 1).validate().is_err());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let result = ExtractionResult::from(vec![PlaceMention::new("花果山", 1)]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"[{"place_name":"花果山","count":1}]"#);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let result = ExtractionResult::from(vec![
            PlaceMention::new("东海", 1),
            PlaceMention::new("东海", 2),
        ]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_merge_counts_sums_and_keeps_first_position() {
        let result = ExtractionResult::from(vec![
            PlaceMention::new("东海", 1),
            PlaceMention::new("天庭", 3),
            PlaceMention::new("东海", 2),
        ]);

        let merged = result.merge_counts();
        assert_eq!(
            merged.mentions(),
            &[PlaceMention::new("东海", 3), PlaceMention::new("天庭", 3)]
        );
    }

    #[test]
    fn test_merge_counts_saturates_instead_of_overflowing() {
        let result = ExtractionResult::from(vec![
            PlaceMention::new("东海", u64::MAX),
            PlaceMention::new("东海", 1),
        ]);

        let merged = result.merge_counts();
        assert_eq!(merged.mentions(), &[PlaceMention::new("东海", u64::MAX)]);
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut first = ExtractionResult::from(vec![PlaceMention::new("花果山", 1)]);
        first.extend(ExtractionResult::from(vec![PlaceMention::new("龙宫", 1)]));

        let names: Vec<_> = first.iter().map(|m| m.place_name.as_str()).collect();
        assert_eq!(names, vec!["花果山", "龙宫"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: merging never changes the total count
        #[test]
        fn test_merge_preserves_total(
            entries in prop::collection::vec(("[a-c]", 0u64..100), 0..20)
        ) {
            let result: ExtractionResult = entries
                .iter()
                .map(|(name, count)| PlaceMention::new(name.clone(), *count))
                .collect::<Vec<_>>()
                .into();

            let before: u64 = result.iter().map(|m| m.count).sum();
            let after: u64 = result.merge_counts().iter().map(|m| m.count).sum();
            prop_assert_eq!(before, after);
        }

        /// Property: merged names are unique
        #[test]
        fn test_merge_yields_unique_names(
            names in prop::collection::vec("[a-d]", 0..20)
        ) {
            let result: ExtractionResult = names
                .iter()
                .map(|name| PlaceMention::new(name.clone(), 1))
                .collect::<Vec<_>>()
                .into();

            let merged = result.merge_counts();
            let mut seen = std::collections::HashSet::new();
            for mention in merged.iter() {
                prop_assert!(seen.insert(mention.place_name.clone()));
            }
        }
    }
}
