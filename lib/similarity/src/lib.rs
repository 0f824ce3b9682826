//! # recipex Similarity
//!
//! A multi-channel similarity engine for recipes.
//!
//! Every recipe is compared to a reference recipe over five channels, and the
//! per-channel distances are blended with fixed fusion weights:
//!
//! | Channel | Representation | Distance | Default weight |
//! |---|---|---|---|
//! | name | TF-IDF | cosine | 0.05 |
//! | tags | TF-IDF | cosine | 0.30 |
//! | steps | TF-IDF | cosine | 0.30 |
//! | ingredients | bag-of-words | cosine | 0.30 |
//! | numeric | dense features | weighted Euclidean | 0.05 |
//!
//! ## Example
//!
//! ```rust
//! use recipex_similarity::{FinderConfig, RecipeFinder};
//! use recipex_core::Recipe;
//!
//! let recipes = vec![
//!     Recipe::new(101, "pie", "tag1 tag2", "mix bake", "flour sugar").with_feature("calories", 0.0),
//!     Recipe::new(102, "pie", "tag2 tag3", "mix bake", "flour sugar").with_feature("calories", 0.0),
//!     Recipe::new(103, "pie", "tag3 tag4", "mix bake", "flour sugar").with_feature("calories", 0.0),
//! ];
//! let config = FinderConfig::default().with_numeric_features(vec![("calories", 1.0)]);
//!
//! let finder = RecipeFinder::from_recipes(recipes, config).unwrap();
//! finder.preprocess().unwrap();
//!
//! let similar = finder.find_similar(101, 2).unwrap();
//! assert_eq!(similar[0].recipe.id, 102);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Corpus    │────>│ Vectorizer  │────>│  Prepared   │
//! │  (recipes)  │     │ (tfidf/bow) │     │   Index     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                      ┌─────────────┐           │
//!                      │  Distance   │<──────────┘
//!                      │ (5 channels)│
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │   Fusion    │
//!                      │  + ranking  │
//!                      └─────────────┘
//! ```

pub mod config;
pub mod distance;
pub mod explain;
pub mod finder;
pub mod vectorizer;

pub use config::{Channel, ChannelWeights, ConfigError, FinderConfig, DEFAULT_NUMERIC_FEATURES, DEFAULT_TOP_N};
pub use distance::{cosine_distance_pair, cosine_distance_sparse, euclidean_distance};
pub use explain::{ExplainedResult, SimilarResponse, SimilarityStats};
pub use finder::{
    ChannelBreakdown, ChannelDistances, FinderState, PreparedIndex, RecipeFinder, SimilarRecipe, TextChannel,
};
pub use vectorizer::{bow_vectorize, tfidf_vectorize, tokenize, VectorizerModel, Weighting};
