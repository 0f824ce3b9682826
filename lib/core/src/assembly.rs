//! Dataset assembly
//!
//! Recipe tables often arrive split by column group (one fragment per text
//! column plus one for numeric features), each possibly spread over several
//! row partitions. [`CorpusAssembler`] inner-joins those fragments on the
//! recipe id and produces a [`Corpus`].

use crate::{Corpus, Error, Recipe, Result, TEXT_COLUMNS};
use ahash::AHashMap;
use std::collections::hash_map::Entry;

#[derive(Debug, Default)]
pub struct CorpusAssembler {
    texts: AHashMap<&'static str, AHashMap<u64, String>>,
    numerics: AHashMap<u64, AHashMap<String, f64>>,
    contributors: AHashMap<u64, u64>,
    order: Vec<u64>,
}

impl CorpusAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one partition of a text column fragment
    pub fn add_text<I, S>(&mut self, column: &str, rows: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        let column = TEXT_COLUMNS
            .iter()
            .copied()
            .find(|c| *c == column)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown text column '{}'", column)))?;

        let fragment = self.texts.entry(column).or_default();
        for (id, text) in rows {
            insert_new(fragment, id, text.into())?;
            if column == "name" {
                self.order.push(id);
            }
        }
        Ok(self)
    }

    /// Add one partition of the numeric feature fragment
    pub fn add_numeric<I>(&mut self, rows: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (u64, AHashMap<String, f64>)>,
    {
        for (id, features) in rows {
            insert_new(&mut self.numerics, id, features)?;
        }
        Ok(self)
    }

    /// Add contributor ids; recipes without one keep `None`
    pub fn add_contributors<I>(&mut self, rows: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        for (id, contributor) in rows {
            insert_new(&mut self.contributors, id, contributor)?;
        }
        Ok(self)
    }

    /// Inner-join every fragment on id, in the row order of the `name` fragment
    pub fn build(mut self) -> Result<Corpus> {
        let mut recipes = Vec::with_capacity(self.order.len());
        let mut dropped = 0usize;

        for id in std::mem::take(&mut self.order) {
            let mut take = |column: &str| self.texts.get_mut(column).and_then(|f| f.remove(&id));
            let joined = (take("name"), take("tags"), take("steps"), take("ingredients"));
            let (Some(name), Some(tags), Some(steps), Some(ingredients)) = joined else {
                dropped += 1;
                continue;
            };
            let Some(features) = self.numerics.remove(&id) else {
                dropped += 1;
                continue;
            };

            let mut recipe = Recipe::new(id, name, tags, steps, ingredients);
            recipe.features = features;
            recipe.contributor_id = self.contributors.get(&id).copied();
            recipes.push(recipe);
        }

        if dropped > 0 {
            tracing::warn!(dropped, kept = recipes.len(), "recipes missing from some fragments were dropped");
        }

        Corpus::new(recipes)
    }
}

/// Insert `value` under a new `id`; an id already present keeps its value
fn insert_new<V>(map: &mut AHashMap<u64, V>, id: u64, value: V) -> Result<()> {
    match map.entry(id) {
        Entry::Occupied(_) => Err(Error::DuplicateIdentifier(id)),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

/// Scale the named features to zero mean and unit variance across `recipes`.
///
/// Uses the population standard deviation. A constant column is only centred.
/// Every recipe must carry every feature; on `MissingFeature` nothing is changed.
pub fn standardize_features(recipes: &mut [Recipe], features: &[String]) -> Result<()> {
    if recipes.is_empty() {
        return Ok(());
    }
    for recipe in recipes.iter() {
        if let Some(missing) = features.iter().find(|f| recipe.feature(f).is_none()) {
            return Err(Error::MissingFeature {
                id: recipe.id,
                feature: missing.clone(),
            });
        }
    }

    let n = recipes.len() as f64;
    let moments: Vec<(f64, f64)> = features
        .iter()
        .map(|feature| {
            let mean = recipes.iter().filter_map(|r| r.feature(feature)).sum::<f64>() / n;
            let variance = recipes
                .iter()
                .filter_map(|r| r.feature(feature))
                .map(|v| (v - mean) * (v - mean))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            (mean, if std > 0.0 { std } else { 1.0 })
        })
        .collect();

    for recipe in recipes.iter_mut() {
        for (feature, (mean, scale)) in features.iter().zip(&moments) {
            if let Some(value) = recipe.features.get_mut(feature) {
                *value = (*value - mean) / scale;
            }
        }
    }

    Ok(())
}
