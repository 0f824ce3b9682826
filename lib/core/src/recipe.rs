use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Names of the text columns a recipe carries, in channel order
pub const TEXT_COLUMNS: [&str; 4] = ["name", "tags", "steps", "ingredients"];

/// A recipe row with its text columns and numeric features
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    /// Space-joined tag keywords
    pub tags: String,
    /// Space-joined, stemmed preparation steps
    pub steps: String,
    /// Space-joined ingredient tokens
    pub ingredients: String,
    /// Numeric features keyed by column name (e.g. `calories`)
    #[serde(default)]
    pub features: AHashMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_id: Option<u64>,
    /// Remaining columns of the source table, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl Recipe {
    #[inline]
    #[must_use]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        tags: impl Into<String>,
        steps: impl Into<String>,
        ingredients: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            tags: tags.into(),
            steps: steps.into(),
            ingredients: ingredients.into(),
            features: AHashMap::new(),
            contributor_id: None,
            payload: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (name, value) in features {
            self.features.insert(name.into(), value);
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn with_contributor(mut self, contributor_id: u64) -> Self {
        self.contributor_id = Some(contributor_id);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Get a text column by name
    pub fn text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "tags" => Some(&self.tags),
            "steps" => Some(&self.steps),
            "ingredients" => Some(&self.ingredients),
            _ => None,
        }
    }

    #[inline]
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    /// Keep only the ingredient tokens that belong to `selected`,
    /// in their original order, re-joined with single spaces
    pub fn filter_ingredients(&self, selected: &AHashSet<&str>) -> String {
        self.ingredients
            .split_whitespace()
            .filter(|token| selected.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
