//! Recipe finder
//!
//! Fuses the five channel distances into one combined distance and ranks the
//! corpus against a reference recipe.
//!
//! A finder starts unprepared. [`RecipeFinder::preprocess`] builds every
//! channel matrix into an immutable [`PreparedIndex`] and swaps it in; queries
//! clone the current snapshot and never block a rebuild.

use crate::config::{Channel, ChannelWeights, FinderConfig};
use crate::distance::{cosine_distance_from_row, euclidean_distance};
use crate::vectorizer::{fit_transform, VectorizerModel};
use parking_lot::RwLock;
use recipex_core::{row_norms, Corpus, Error, NumericMatrix, Recipe, Result, SparseMatrix};
use serde::Serialize;
use std::sync::Arc;

/// Lifecycle state of a [`RecipeFinder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderState {
    Unprepared,
    Ready,
}

/// Per-channel values for one recipe, in channel order
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct ChannelBreakdown {
    pub name: f64,
    pub tags: f64,
    pub steps: f64,
    pub ingredients: f64,
    pub numeric: f64,
}

impl ChannelBreakdown {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Name => self.name,
            Channel::Tags => self.tags,
            Channel::Steps => self.steps,
            Channel::Ingredients => self.ingredients,
            Channel::Numeric => self.numeric,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn total(&self) -> f64 {
        self.name + self.tags + self.steps + self.ingredients + self.numeric
    }

    /// Channel with the largest value; earlier channels win ties
    pub fn dominant(&self) -> Channel {
        self.iter()
            .fold((Channel::Name, f64::NEG_INFINITY), |best, (c, v)| if v > best.1 { (c, v) } else { best })
            .0
    }
}

/// One ranked neighbour of the reference recipe
#[derive(Debug, Clone, Serialize)]
pub struct SimilarRecipe {
    pub recipe: Recipe,
    pub combined_distance: f64,
    /// Weighted contribution of each channel; sums to `combined_distance`
    pub contributions: ChannelBreakdown,
}

/// Full-length distance vectors of one query, one entry per corpus row
#[derive(Debug, Clone)]
pub struct ChannelDistances {
    pub reference_index: usize,
    pub name: Vec<f64>,
    pub tags: Vec<f64>,
    pub steps: Vec<f64>,
    pub ingredients: Vec<f64>,
    pub numeric: Vec<f64>,
}

impl ChannelDistances {
    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Name => &self.name,
            Channel::Tags => &self.tags,
            Channel::Steps => &self.steps,
            Channel::Ingredients => &self.ingredients,
            Channel::Numeric => &self.numeric,
        }
    }

    fn weighted_at(&self, row: usize, weights: &ChannelWeights) -> ChannelBreakdown {
        ChannelBreakdown {
            name: weights.alpha * self.name[row],
            tags: weights.beta * self.tags[row],
            steps: weights.gamma * self.steps[row],
            ingredients: weights.delta * self.ingredients[row],
            numeric: weights.epsilon * self.numeric[row],
        }
    }

    /// Element-wise weighted sum of the five vectors
    pub fn combine(&self, weights: &ChannelWeights) -> Vec<f64> {
        let mut combined: Vec<f64> = self.name.iter().map(|d| weights.alpha * d).collect();
        for (channel, distances) in [
            (Channel::Tags, &self.tags),
            (Channel::Steps, &self.steps),
            (Channel::Ingredients, &self.ingredients),
            (Channel::Numeric, &self.numeric),
        ] {
            let w = weights.get(channel);
            for (acc, d) in combined.iter_mut().zip(distances) {
                *acc += w * d;
            }
        }
        combined
    }
}

/// Vectorized text column with cached row norms
#[derive(Debug, Clone)]
pub struct TextChannel {
    pub matrix: SparseMatrix,
    pub model: VectorizerModel,
    norms: Vec<f64>,
}

impl TextChannel {
    fn build(corpus: &Corpus, channel: Channel) -> Result<Self> {
        let weighting = channel
            .weighting()
            .ok_or_else(|| Error::InvalidConfig(format!("'{}' is not a text channel", channel)))?;
        let documents = corpus.text_column(channel.as_str())?;
        let (matrix, model) =
            fit_transform(&documents, weighting).map_err(|e| e.in_channel(channel.as_str()))?;
        let norms = row_norms(&matrix);
        tracing::debug!(channel = %channel, vocabulary = model.vocabulary_size(), "text channel built");
        Ok(Self { matrix, model, norms })
    }

    fn distances(&self, reference_index: usize) -> Result<Vec<f64>> {
        cosine_distance_from_row(&self.matrix, &self.norms, reference_index)
    }
}

/// Immutable snapshot of every matrix derived from one corpus
#[derive(Debug)]
pub struct PreparedIndex {
    corpus: Arc<Corpus>,
    name: TextChannel,
    tags: TextChannel,
    steps: TextChannel,
    ingredients: TextChannel,
    numeric: NumericMatrix,
    numeric_weights: Vec<f64>,
    channel_weights: ChannelWeights,
}

impl PreparedIndex {
    /// Build all five channels concurrently; any failure aborts the whole build
    pub fn build(corpus: Arc<Corpus>, config: &FinderConfig) -> Result<Self> {
        let text = |channel: Channel| TextChannel::build(&corpus, channel);

        let ((name, tags), (steps, (ingredients, numeric))) = rayon::join(
            || rayon::join(|| text(Channel::Name), || text(Channel::Tags)),
            || {
                rayon::join(
                    || text(Channel::Steps),
                    || {
                        rayon::join(
                            || text(Channel::Ingredients),
                            || {
                                corpus
                                    .numeric_matrix(&config.numeric_feature_order)
                                    .map_err(|e| e.in_channel(Channel::Numeric.as_str()))
                            },
                        )
                    },
                )
            },
        );

        Ok(Self {
            name: name?,
            tags: tags?,
            steps: steps?,
            ingredients: ingredients?,
            numeric: numeric?,
            numeric_weights: config.weights_vector(),
            channel_weights: config.channel_weights,
            corpus,
        })
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn text_channel(&self, channel: Channel) -> Option<&TextChannel> {
        match channel {
            Channel::Name => Some(&self.name),
            Channel::Tags => Some(&self.tags),
            Channel::Steps => Some(&self.steps),
            Channel::Ingredients => Some(&self.ingredients),
            Channel::Numeric => None,
        }
    }

    #[inline]
    pub fn numeric_matrix(&self) -> &NumericMatrix {
        &self.numeric
    }

    /// Compute the five distance vectors for `reference_id` concurrently
    pub fn channel_distances(&self, reference_id: u64) -> Result<ChannelDistances> {
        let reference_index = self
            .corpus
            .id_index()
            .index_of(reference_id)
            .ok_or(Error::UnknownIdentifier(reference_id))?;

        let ((name, tags), (steps, (ingredients, numeric))) = rayon::join(
            || rayon::join(|| self.name.distances(reference_index), || self.tags.distances(reference_index)),
            || {
                rayon::join(
                    || self.steps.distances(reference_index),
                    || {
                        rayon::join(
                            || self.ingredients.distances(reference_index),
                            || euclidean_distance(&self.numeric, reference_index, &self.numeric_weights),
                        )
                    },
                )
            },
        );

        Ok(ChannelDistances {
            reference_index,
            name: name?,
            tags: tags?,
            steps: steps?,
            ingredients: ingredients?,
            numeric: numeric?,
        })
    }

    /// Rank every other recipe by combined distance and keep the first `top_n`
    pub fn find_similar(&self, reference_id: u64, top_n: usize) -> Result<Vec<SimilarRecipe>> {
        let distances = self.channel_distances(reference_id)?;
        let combined = distances.combine(&self.channel_weights);

        let mut order: Vec<usize> = (0..combined.len())
            .filter(|&r| r != distances.reference_index)
            .collect();
        // stable: equal distances keep corpus order
        order.sort_by(|&a, &b| combined[a].total_cmp(&combined[b]));
        order.truncate(top_n);

        tracing::debug!(reference_id, candidates = combined.len() - 1, returned = order.len(), "similar recipes ranked");

        Ok(order
            .into_iter()
            .filter_map(|row| {
                self.corpus.get(row).map(|recipe| SimilarRecipe {
                    recipe: recipe.clone(),
                    combined_distance: combined[row],
                    contributions: distances.weighted_at(row, &self.channel_weights),
                })
            })
            .collect())
    }
}

/// Multi-channel similarity engine over one recipe corpus
pub struct RecipeFinder {
    corpus: Arc<Corpus>,
    config: FinderConfig,
    prepared: RwLock<Option<Arc<PreparedIndex>>>,
}

impl RecipeFinder {
    /// Create an unprepared finder; the configuration is validated here
    pub fn new(corpus: Corpus, config: FinderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            corpus: Arc::new(corpus),
            config,
            prepared: RwLock::new(None),
        })
    }

    /// Build the corpus from raw recipes, rejecting duplicate ids
    pub fn from_recipes(recipes: Vec<Recipe>, config: FinderConfig) -> Result<Self> {
        Self::new(Corpus::new(recipes)?, config)
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn state(&self) -> FinderState {
        if self.prepared.read().is_some() {
            FinderState::Ready
        } else {
            FinderState::Unprepared
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state() == FinderState::Ready
    }

    /// Build every channel matrix and make the finder ready.
    ///
    /// Safe to call again: a complete new snapshot is built first and then
    /// swapped in, so concurrent queries keep the snapshot they started with.
    /// On failure the previous state is left untouched.
    pub fn preprocess(&self) -> Result<()> {
        tracing::info!(
            recipes = self.corpus.len(),
            numeric_features = self.config.numeric_feature_order.len(),
            "preprocessing recipe corpus"
        );

        let index = PreparedIndex::build(self.corpus.clone(), &self.config).map_err(|e| {
            tracing::error!(error = %e, "preprocessing failed");
            e
        })?;

        tracing::info!(
            name_terms = index.name.model.vocabulary_size(),
            tag_terms = index.tags.model.vocabulary_size(),
            step_terms = index.steps.model.vocabulary_size(),
            ingredient_terms = index.ingredients.model.vocabulary_size(),
            "recipe finder ready"
        );

        *self.prepared.write() = Some(Arc::new(index));
        Ok(())
    }

    /// Current snapshot, or `NotPrepared`
    pub fn snapshot(&self) -> Result<Arc<PreparedIndex>> {
        self.prepared.read().clone().ok_or(Error::NotPrepared)
    }

    pub fn channel_distances(&self, reference_id: u64) -> Result<ChannelDistances> {
        self.snapshot()?.channel_distances(reference_id)
    }

    /// The `top_n` recipes closest to `reference_id`, excluding itself,
    /// by ascending combined distance
    pub fn find_similar(&self, reference_id: u64, top_n: usize) -> Result<Vec<SimilarRecipe>> {
        self.snapshot()?.find_similar(reference_id, top_n)
    }

    /// [`RecipeFinder::find_similar`] with the configured `top_n`
    pub fn find_similar_default(&self, reference_id: u64) -> Result<Vec<SimilarRecipe>> {
        self.find_similar(reference_id, self.config.top_n)
    }
}
