//! Text vectorization
//!
//! Turns a column of documents into a sparse document-term matrix. The
//! vocabulary is learned from the documents themselves and sorted
//! lexicographically, so the column layout only depends on the input.

use ahash::AHashMap;
use rayon::prelude::*;
use recipex_core::{csr_from_rows, Error, Result, SparseMatrix};
use serde::{Deserialize, Serialize};

/// Cell weighting applied by a vectorizer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Raw count × smoothed idf, rows L2-normalized
    TfIdf,
    /// Raw term counts
    Count,
}

/// Split text into lowercase tokens of at least two word characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

fn count_terms(text: &str) -> AHashMap<String, u32> {
    let mut counts = AHashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// A fitted vocabulary (plus idf weights for TF-IDF) that reproduces the
/// document-to-row mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorizerModel {
    weighting: Weighting,
    vocabulary: AHashMap<String, usize>,
    terms: Vec<String>,
    /// Empty for [`Weighting::Count`]
    idf: Vec<f64>,
}

impl VectorizerModel {
    fn fit(weighting: Weighting, counts: &[AHashMap<String, u32>]) -> Result<Self> {
        let mut document_frequency: AHashMap<&str, usize> = AHashMap::new();
        for doc in counts {
            for term in doc.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if document_frequency.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut terms: Vec<String> = document_frequency.keys().map(|t| t.to_string()).collect();
        terms.sort_unstable();
        let vocabulary: AHashMap<String, usize> =
            terms.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();

        let idf = match weighting {
            Weighting::TfIdf => {
                let n = counts.len() as f64;
                terms
                    .iter()
                    .map(|t| {
                        let df = document_frequency.get(t.as_str()).copied().unwrap_or(1) as f64;
                        ((1.0 + n) / (1.0 + df)).ln() + 1.0
                    })
                    .collect()
            }
            Weighting::Count => Vec::new(),
        };

        Ok(Self {
            weighting,
            vocabulary,
            terms,
            idf,
        })
    }

    #[inline]
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Column of `term`, if it was seen during fitting
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Vocabulary in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Idf weight of a column; 1.0 for count vectorizers
    pub fn idf(&self, column: usize) -> f64 {
        self.idf.get(column).copied().unwrap_or(1.0)
    }

    fn row_from_counts(&self, counts: &AHashMap<String, u32>) -> Vec<(usize, f64)> {
        let mut row: Vec<(usize, f64)> = counts
            .iter()
            .filter_map(|(term, &count)| {
                self.vocabulary
                    .get(term)
                    .map(|&col| (col, count as f64 * self.idf(col)))
            })
            .collect();

        if self.weighting == Weighting::TfIdf {
            let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, v) in &mut row {
                    *v /= norm;
                }
            }
        }
        row
    }

    fn matrix_from_counts(&self, counts: &[AHashMap<String, u32>]) -> Result<SparseMatrix> {
        let rows = counts.par_iter().map(|c| self.row_from_counts(c)).collect();
        csr_from_rows(self.terms.len(), rows)
    }

    /// Vectorize new documents with the fitted vocabulary; unseen terms are ignored
    pub fn transform<S>(&self, documents: &[S]) -> Result<SparseMatrix>
    where
        S: AsRef<str> + Sync,
    {
        let counts: Vec<_> = documents.par_iter().map(|d| count_terms(d.as_ref())).collect();
        self.matrix_from_counts(&counts)
    }
}

/// Fit a vocabulary on `documents` and vectorize them in one pass
pub fn fit_transform<S>(documents: &[S], weighting: Weighting) -> Result<(SparseMatrix, VectorizerModel)>
where
    S: AsRef<str> + Sync,
{
    if documents.is_empty() {
        return Err(Error::EmptyInput);
    }

    let counts: Vec<_> = documents.par_iter().map(|d| count_terms(d.as_ref())).collect();
    let model = VectorizerModel::fit(weighting, &counts)?;
    let matrix = model.matrix_from_counts(&counts)?;

    tracing::debug!(
        documents = documents.len(),
        vocabulary = model.vocabulary_size(),
        nnz = matrix.nnz(),
        ?weighting,
        "documents vectorized"
    );
    Ok((matrix, model))
}

/// TF-IDF vectorization with L2-normalized rows
pub fn tfidf_vectorize<S>(documents: &[S]) -> Result<(SparseMatrix, VectorizerModel)>
where
    S: AsRef<str> + Sync,
{
    fit_transform(documents, Weighting::TfIdf)
}

/// Bag-of-words vectorization with raw counts
pub fn bow_vectorize<S>(documents: &[S]) -> Result<(SparseMatrix, VectorizerModel)>
where
    S: AsRef<str> + Sync,
{
    fit_transform(documents, Weighting::Count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipex_core::{row_norms, sparse_row};

    fn cell(matrix: &SparseMatrix, row: usize, col: usize) -> f64 {
        matrix.get(row, col).copied().unwrap_or(0.0)
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Apple-Pie, a  HOT_dish!"), vec!["apple", "pie", "hot_dish"]);
        assert!(tokenize("a b c").is_empty());
    }

    #[test]
    fn test_tfidf_shape_and_vocabulary() {
        let docs = ["This is a test", "Another test case", "More text data"];
        let (matrix, model) = tfidf_vectorize(&docs).unwrap();

        assert_eq!(matrix.rows(), 3);
        // "a" is a single character and dropped
        assert_eq!(model.vocabulary_size(), 8);
        assert_eq!(matrix.cols(), 8);
        assert_eq!(model.terms()[0], "another");
        assert_eq!(model.column_of("test"), Some(5));
    }

    #[test]
    fn test_tfidf_values() {
        let docs = ["tag1 tag2", "tag2 tag3"];
        let (matrix, model) = tfidf_vectorize(&docs).unwrap();

        // idf(tag1) = ln(3/2) + 1, idf(tag2) = ln(3/3) + 1 = 1
        let idf1 = (1.5f64).ln() + 1.0;
        let norm = (idf1 * idf1 + 1.0).sqrt();
        let tag1 = model.column_of("tag1").unwrap();
        let tag2 = model.column_of("tag2").unwrap();
        assert!((cell(&matrix, 0, tag1) - idf1 / norm).abs() < 1e-12);
        assert!((cell(&matrix, 0, tag2) - 1.0 / norm).abs() < 1e-12);

        for row_norm in row_norms(&matrix) {
            assert!((row_norm - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bow_counts() {
        let docs = ["salt pepper salt", "pepper oil"];
        let (matrix, model) = bow_vectorize(&docs).unwrap();

        assert_eq!(model.weighting(), Weighting::Count);
        assert_eq!(cell(&matrix, 0, model.column_of("salt").unwrap()), 2.0);
        assert_eq!(cell(&matrix, 0, model.column_of("pepper").unwrap()), 1.0);
        assert_eq!(cell(&matrix, 1, model.column_of("salt").unwrap()), 0.0);
        assert_eq!(cell(&matrix, 1, model.column_of("oil").unwrap()), 1.0);
    }

    #[test]
    fn test_empty_input() {
        let docs: [&str; 0] = [];
        assert!(matches!(tfidf_vectorize(&docs), Err(Error::EmptyInput)));
        assert!(matches!(bow_vectorize(&docs), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_empty_vocabulary() {
        let docs = ["", " ", "a"];
        assert!(matches!(tfidf_vectorize(&docs), Err(Error::EmptyVocabulary)));
    }

    #[test]
    fn test_deterministic() {
        let docs = ["beef stew onion", "onion soup", "beef burger"];
        let (a, model_a) = tfidf_vectorize(&docs).unwrap();
        let (b, model_b) = tfidf_vectorize(&docs).unwrap();
        assert_eq!(a, b);
        assert_eq!(model_a, model_b);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let (fitted, model) = tfidf_vectorize(&["beef stew", "onion soup"]).unwrap();
        let again = model.transform(&["beef stew"]).unwrap();
        assert_eq!(
            sparse_row(&again, 0).unwrap().indices(),
            sparse_row(&fitted, 0).unwrap().indices()
        );

        let unseen = model.transform(&["tofu curry"]).unwrap();
        assert_eq!(unseen.rows(), 1);
        assert_eq!(unseen.nnz(), 0);
    }
}
