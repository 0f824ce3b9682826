//! Finder configuration
//!
//! Declares the numeric feature columns and their Euclidean weights, the five
//! fusion coefficients and the default result count. Validated once when a
//! [`crate::RecipeFinder`] is constructed.

use crate::vectorizer::Weighting;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tolerance used when checking that fusion weights sum to one
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

pub const DEFAULT_TOP_N: usize = 100;

/// Default numeric feature columns, in matrix column order
pub const DEFAULT_NUMERIC_FEATURES: [&str; 8] = [
    "log_minutes",
    "calories",
    "total fat (PDV%)",
    "sugar (PDV%)",
    "sodium (PDV%)",
    "protein (PDV%)",
    "saturated fat (PDV%)",
    "carbohydrates (PDV%)",
];

const DEFAULT_NUMERIC_WEIGHTS: [f64; 8] = [0.5, 0.2, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05];

/// One of the five similarity signals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Name,
    Tags,
    Steps,
    Ingredients,
    Numeric,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Name,
        Channel::Tags,
        Channel::Steps,
        Channel::Ingredients,
        Channel::Numeric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Name => "name",
            Channel::Tags => "tags",
            Channel::Steps => "steps",
            Channel::Ingredients => "ingredients",
            Channel::Numeric => "numeric",
        }
    }

    /// Text weighting for text channels, `None` for the numeric channel
    pub fn weighting(&self) -> Option<Weighting> {
        match self {
            Channel::Name | Channel::Tags | Channel::Steps => Some(Weighting::TfIdf),
            Channel::Ingredients => Some(Weighting::Count),
            Channel::Numeric => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fusion coefficients blending the per-channel distances
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChannelWeights {
    /// name
    pub alpha: f64,
    /// tags
    pub beta: f64,
    /// steps
    pub gamma: f64,
    /// ingredients
    pub delta: f64,
    /// numeric features
    pub epsilon: f64,
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            beta: 0.30,
            gamma: 0.30,
            delta: 0.30,
            epsilon: 0.05,
        }
    }
}

impl ChannelWeights {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Name => self.alpha,
            Channel::Tags => self.beta,
            Channel::Steps => self.gamma,
            Channel::Ingredients => self.delta,
            Channel::Numeric => self.epsilon,
        }
    }

    pub fn sum(&self) -> f64 {
        self.alpha + self.beta + self.gamma + self.delta + self.epsilon
    }

    /// Rescale so the coefficients sum to 1.0
    pub fn normalized(&self) -> Result<Self, ConfigError> {
        self.check_values()?;
        let total = self.sum();
        if total <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }
        Ok(Self {
            alpha: self.alpha / total,
            beta: self.beta / total,
            gamma: self.gamma / total,
            delta: self.delta / total,
            epsilon: self.epsilon / total,
        })
    }

    fn check_values(&self) -> Result<(), ConfigError> {
        for channel in Channel::ALL {
            check_weight(channel.as_str(), self.get(channel))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_values()?;
        let total = self.sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::FusionWeightSum(total));
        }
        Ok(())
    }
}

fn check_weight(name: &str, weight: f64) -> Result<(), ConfigError> {
    if !weight.is_finite() {
        return Err(ConfigError::NonFiniteWeight(name.to_string()));
    }
    if weight < 0.0 {
        return Err(ConfigError::NegativeWeight(name.to_string()));
    }
    Ok(())
}

/// Full configuration of a recipe finder session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinderConfig {
    pub numeric_feature_order: Vec<String>,
    pub numeric_weights: AHashMap<String, f64>,
    pub channel_weights: ChannelWeights,
    pub top_n: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            numeric_feature_order: DEFAULT_NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect(),
            numeric_weights: DEFAULT_NUMERIC_FEATURES
                .iter()
                .zip(DEFAULT_NUMERIC_WEIGHTS)
                .map(|(name, weight)| (name.to_string(), weight))
                .collect(),
            channel_weights: ChannelWeights::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl FinderConfig {
    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> recipex_core::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: FinderConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the numeric features with `(name, weight)` pairs in the given order
    pub fn with_numeric_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.numeric_feature_order.clear();
        self.numeric_weights.clear();
        for (name, weight) in features {
            let name = name.into();
            self.numeric_weights.insert(name.clone(), weight);
            self.numeric_feature_order.push(name);
        }
        self
    }

    pub fn with_channel_weights(mut self, weights: ChannelWeights) -> Self {
        self.channel_weights = weights;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.numeric_feature_order.is_empty() {
            return Err(ConfigError::EmptyFeatureOrder);
        }

        let mut seen = AHashSet::new();
        for feature in &self.numeric_feature_order {
            if !seen.insert(feature.as_str()) {
                return Err(ConfigError::DuplicateFeature(feature.clone()));
            }
            let weight = self
                .numeric_weights
                .get(feature)
                .copied()
                .ok_or_else(|| ConfigError::MissingWeight(feature.clone()))?;
            check_weight(feature, weight)?;
        }

        self.channel_weights.validate()
    }

    /// Numeric weights aligned index-for-index with `numeric_feature_order`
    pub fn weights_vector(&self) -> Vec<f64> {
        self.numeric_feature_order
            .iter()
            .map(|f| self.numeric_weights.get(f).copied().unwrap_or(0.0))
            .collect()
    }
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Numeric feature order cannot be empty")]
    EmptyFeatureOrder,

    #[error("Numeric feature '{0}' is listed twice")]
    DuplicateFeature(String),

    #[error("Numeric feature '{0}' has no weight")]
    MissingWeight(String),

    #[error("Weight '{0}' is negative")]
    NegativeWeight(String),

    #[error("Weight '{0}' is not a finite number")]
    NonFiniteWeight(String),

    #[error("Fusion weights must sum to 1.0, got {0}")]
    FusionWeightSum(f64),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,
}

impl From<ConfigError> for recipex_core::Error {
    fn from(e: ConfigError) -> Self {
        recipex_core::Error::InvalidConfig(e.to_string())
    }
}
