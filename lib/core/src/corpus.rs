use crate::{Error, NumericMatrix, Recipe, Result};
use ahash::AHashMap;

/// Bijection between recipe ids and row positions in a corpus.
///
/// Built once together with its corpus and never mutated afterwards; a new
/// corpus gets a new index.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    positions: AHashMap<u64, usize>,
    ids: Vec<u64>,
}

impl IdIndex {
    /// Build the mapping, rejecting repeated ids
    pub fn build<I>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut index = Self::default();
        for id in ids {
            let row = index.ids.len();
            if index.positions.insert(id, row).is_some() {
                return Err(Error::DuplicateIdentifier(id));
            }
            index.ids.push(id);
        }
        Ok(index)
    }

    #[inline]
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    #[inline]
    pub fn id_at(&self, index: usize) -> Option<u64> {
        self.ids.get(index).copied()
    }

    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.positions.contains_key(&id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Ordered, id-unique set of recipes used as the search universe
#[derive(Debug, Clone)]
pub struct Corpus {
    recipes: Vec<Recipe>,
    index: IdIndex,
}

impl Corpus {
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        let index = IdIndex::build(recipes.iter().map(|r| r.id))?;
        tracing::debug!(recipes = recipes.len(), "corpus indexed");
        Ok(Self { recipes, index })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    #[inline]
    pub fn id_index(&self) -> &IdIndex {
        &self.index
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn get_by_id(&self, id: u64) -> Option<&Recipe> {
        self.index.index_of(id).and_then(|i| self.recipes.get(i))
    }

    #[inline]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Documents of one text column in corpus order
    pub fn text_column(&self, column: &str) -> Result<Vec<&str>> {
        self.recipes
            .iter()
            .map(|r| {
                r.text(column)
                    .ok_or_else(|| Error::InvalidConfig(format!("unknown text column '{}'", column)))
            })
            .collect()
    }

    /// Extract the numeric features in `order`, one row per recipe
    pub fn numeric_matrix(&self, order: &[String]) -> Result<NumericMatrix> {
        let mut data = Vec::with_capacity(self.recipes.len() * order.len());
        for recipe in &self.recipes {
            for feature in order {
                let value = recipe.feature(feature).ok_or_else(|| Error::MissingFeature {
                    id: recipe.id,
                    feature: feature.clone(),
                })?;
                data.push(value);
            }
        }
        Ok(NumericMatrix::from_shape_vec((self.recipes.len(), order.len()), data)?)
    }

    pub fn into_recipes(self) -> Vec<Recipe> {
        self.recipes
    }
}
