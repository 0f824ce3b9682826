//! # recipex
//!
//! A multi-signal recipe similarity engine.
//!
//! Given a reference recipe, recipex ranks every other recipe of a corpus by
//! a weighted blend of five distances: cosine distance over TF-IDF vectors of
//! the name, tags and steps, cosine distance over bag-of-words ingredient
//! counts, and a weighted Euclidean distance over numeric nutrition and time
//! features.
//!
//! ## Quick Start
//!
//! ### As a Library
//!
//! ```rust
//! use recipex::prelude::*;
//!
//! let recipes = vec![
//!     Recipe::new(1, "apple pie", "dessert baking", "peel slice bake", "apple flour butter")
//!         .with_feature("calories", 0.8),
//!     Recipe::new(2, "pear tart", "dessert baking", "slice bake", "pear flour butter")
//!         .with_feature("calories", 0.6),
//!     Recipe::new(3, "leek soup", "soup winter", "chop boil blend", "leek potato stock")
//!         .with_feature("calories", -1.2),
//! ];
//! let config = FinderConfig::default().with_numeric_features(vec![("calories", 1.0)]);
//!
//! let finder = RecipeFinder::from_recipes(recipes, config).unwrap();
//! finder.preprocess().unwrap();
//!
//! let similar = finder.find_similar(1, 10).unwrap();
//! assert_eq!(similar[0].recipe.id, 2);
//! ```
//!
//! ### As a Command
//!
//! ```bash
//! recipex --corpus recipes.json --id 101 --top-n 10
//! ```
//!
//! ## Crate Structure
//!
//! - `recipex-core` - Recipe records, corpus and id index, dataset assembly, sparse/dense matrices
//! - `recipex-similarity` - Vectorizers, distances, configuration and the fusion engine

// Re-export core types
pub use recipex_core::{
    standardize_features, Corpus, CorpusAssembler, Error, IdIndex, NumericMatrix, Recipe, Result, SparseMatrix,
};

// Re-export the similarity engine
pub use recipex_similarity::{
    bow_vectorize, cosine_distance_sparse, euclidean_distance, tfidf_vectorize, Channel, ChannelBreakdown,
    ChannelWeights, FinderConfig, FinderState, RecipeFinder, SimilarRecipe, SimilarResponse, VectorizerModel,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Channel, ChannelWeights, Corpus, CorpusAssembler, Error, FinderConfig, Recipe, RecipeFinder, Result,
        SimilarRecipe, SimilarResponse,
    };
}
