//! # recipex Core
//!
//! Core data structures for the recipex recipe similarity engine.
//!
//! - [`Recipe`] - A recipe row: id, text columns, numeric features
//! - [`Corpus`] - Ordered, id-unique recipe set with its [`IdIndex`]
//! - [`CorpusAssembler`] - Joins column-group fragments into a corpus
//! - [`SparseMatrix`] - `sprs` CSR matrix for text vectors
//! - [`NumericMatrix`] - `ndarray` matrix of numeric features
//!
//! ## Example
//!
//! ```rust
//! use recipex_core::{Corpus, Recipe};
//!
//! let corpus = Corpus::new(vec![
//!     Recipe::new(1, "apple pie", "dessert baking", "peel bake", "apple flour")
//!         .with_feature("calories", 0.4),
//!     Recipe::new(2, "leek soup", "soup winter", "chop boil", "leek potato")
//!         .with_feature("calories", -0.4),
//! ])
//! .unwrap();
//!
//! assert_eq!(corpus.id_index().index_of(2), Some(1));
//! ```

pub mod assembly;
pub mod corpus;
pub mod error;
pub mod matrix;
pub mod recipe;

pub use assembly::{standardize_features, CorpusAssembler};
pub use corpus::{Corpus, IdIndex};
pub use error::{Error, Result};
pub use matrix::{csr_from_rows, row_norms, sparse_row, NumericMatrix, SparseMatrix};
pub use recipe::{Recipe, TEXT_COLUMNS};

pub use ndarray;
pub use sprs;
