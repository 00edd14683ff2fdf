//! Renaming of rubric dimension labels to the current vocabulary

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Old label -> new label. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionMap(BTreeMap<String, String>);

impl Default for DimensionMap {
    fn default() -> Self {
        Self::from_pairs(&[
            ("moral uptake", "identifying"),
            ("clarity", "clear process"),
            ("validity", "logical process"),
            ("helpfulness", "helpful outcome"),
            ("harmlessness", "harmless outcome"),
        ])
    }
}

impl DimensionMap {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(old, new)| (old.to_string(), new.to_string()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, old: &str) -> Option<&str> {
        self.0.get(old).map(String::as_str)
    }

    /// First entry whose new label is itself renamed by the table.
    /// Such a table would keep rewriting labels on every run.
    pub fn chained_entry(&self) -> Option<(&str, &str)> {
        self.0
            .iter()
            .find(|(_, new)| self.0.contains_key(new.as_str()))
            .map(|(old, new)| (old.as_str(), new.as_str()))
    }

    /// Rewrite each rubric entry's `dimension` found in the table.
    /// Entries without a text dimension are left alone.
    /// Returns how many entries changed.
    pub fn normalize(&self, entries: &mut [Value]) -> usize {
        let mut renamed = 0;
        for entry in entries.iter_mut() {
            let Some(Value::String(dimension)) = entry.get_mut("dimension") else {
                continue;
            };
            if let Some(new) = self.get(dimension) {
                *dimension = new.to_string();
                renamed += 1;
            }
        }
        renamed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(dimension: Value) -> Value {
        json!({ "weight": 1, "judgement": "yes", "dimension": dimension })
    }

    fn dims(entries: &[Value]) -> Vec<Value> {
        entries.iter().map(|e| e["dimension"].clone()).collect()
    }

    #[test]
    fn test_default_table() {
        let map = DimensionMap::default();
        assert_eq!(map.len(), 5);
        assert_eq!(map.get("moral uptake"), Some("identifying"));
        assert_eq!(map.get("clarity"), Some("clear process"));
        assert_eq!(map.get("validity"), Some("logical process"));
        assert_eq!(map.get("helpfulness"), Some("helpful outcome"));
        assert_eq!(map.get("harmlessness"), Some("harmless outcome"));
        assert!(map.chained_entry().is_none());
    }

    #[test]
    fn test_normalize_renames_known_labels() {
        let map = DimensionMap::default();
        let mut entries = vec![
            entry(json!("clarity")),
            entry(json!("Clarity")),
            json!({ "weight": 1, "judgement": "yes" }),
            entry(json!("harmlessness")),
            entry(json!("creativity")),
            entry(Value::Null),
            entry(json!(7)),
        ];

        assert_eq!(map.normalize(&mut entries), 2);
        assert_eq!(
            dims(&entries),
            vec![
                json!("clear process"),
                json!("Clarity"),
                Value::Null,
                json!("harmless outcome"),
                json!("creativity"),
                Value::Null,
                json!(7),
            ]
        );
        assert!(entries[2].get("dimension").is_none());
    }

    #[test]
    fn test_normalize_twice_is_a_no_op() {
        let map = DimensionMap::default();
        let mut entries = vec![entry(json!("clarity")), entry(json!("clear process"))];

        assert_eq!(map.normalize(&mut entries), 1);
        let once = entries.clone();
        assert_eq!(map.normalize(&mut entries), 0);
        assert_eq!(entries, once);
    }

    #[test]
    fn test_chained_entry_detected() {
        let map = DimensionMap::from_pairs(&[("a", "b"), ("b", "c")]);
        assert_eq!(map.chained_entry(), Some(("a", "b")));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let map: DimensionMap = serde_yaml::from_str("clarity: lucidity\n").unwrap();
        assert_eq!(map.get("clarity"), Some("lucidity"));
        assert_eq!(map.len(), 1);
    }
}
