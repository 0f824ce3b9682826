//! Explainability for ranked recipes
//!
//! Output structures showing how each combined distance splits across the
//! five channels.

use crate::config::Channel;
use crate::finder::{ChannelBreakdown, SimilarRecipe};
use recipex_core::Recipe;
use serde::Serialize;

/// A ranked recipe with its per-channel distance breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedResult {
    pub id: u64,
    pub name: String,
    pub combined_distance: f64,
    /// Full recipe row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    /// Weighted channel contributions
    pub explain: ChannelBreakdown,
}

impl ExplainedResult {
    pub fn from_similar(similar: SimilarRecipe, include_recipe: bool) -> Self {
        Self {
            id: similar.recipe.id,
            name: similar.recipe.name.clone(),
            combined_distance: similar.combined_distance,
            recipe: include_recipe.then_some(similar.recipe),
            explain: similar.contributions,
        }
    }

    pub fn from_similar_list(similar: Vec<SimilarRecipe>, include_recipe: bool) -> Vec<Self> {
        similar
            .into_iter()
            .map(|s| Self::from_similar(s, include_recipe))
            .collect()
    }
}

/// Response for a similar-recipes query
#[derive(Debug, Clone, Serialize)]
pub struct SimilarResponse {
    pub reference_id: u64,
    pub result: Vec<ExplainedResult>,
    pub stats: SimilarityStats,
}

impl SimilarResponse {
    /// `candidates_count` is the number of recipes the reference was compared against
    pub fn new(
        reference_id: u64,
        similar: Vec<SimilarRecipe>,
        candidates_count: usize,
        include_recipe: bool,
    ) -> Self {
        let stats = SimilarityStats::compute(&similar, candidates_count);
        Self {
            reference_id,
            result: ExplainedResult::from_similar_list(similar, include_recipe),
            stats,
        }
    }
}

/// Summary statistics for a similar-recipes query
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityStats {
    pub candidates_count: usize,
    pub results_count: usize,
    pub avg_distance: f64,
    pub best_distance: f64,
    /// Channel contributing most to the closest result
    pub top_contributing_channel: Option<Channel>,
}

impl SimilarityStats {
    /// Compute stats from results sorted by ascending distance
    pub fn compute(results: &[SimilarRecipe], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_distance: 0.0,
                best_distance: 0.0,
                top_contributing_channel: None,
            };
        };

        let avg_distance =
            results.iter().map(|r| r.combined_distance).sum::<f64>() / results.len() as f64;

        Self {
            candidates_count,
            results_count: results.len(),
            avg_distance,
            best_distance: best.combined_distance,
            top_contributing_channel: Some(best.contributions.dominant()),
        }
    }
}
