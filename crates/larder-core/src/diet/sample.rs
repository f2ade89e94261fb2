//! Usage-biased sampling.
//!
//! Each pick is restricted to the less-used half of a pool (by selection
//! count in the current generation call) and then made uniformly at random.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;

use larder_store::models::Recipe;

/// Times each recipe has been part of an accepted day in one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageCounter {
    counts: HashMap<String, u32>,
}

impl UsageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection count for `recipe_id`; zero when never selected.
    pub fn count(&self, recipe_id: &str) -> u32 {
        self.counts.get(recipe_id).copied().unwrap_or(0)
    }

    pub fn record(&mut self, recipe_id: &str) {
        *self.counts.entry(recipe_id.to_owned()).or_default() += 1;
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Pick one recipe from `pool`, preferring the least used.
///
/// The pool is stably sorted by usage count ascending, truncated to
/// `max(1, len / 2)` candidates, and one candidate is chosen uniformly.
/// Returns `None` only for an empty pool.
pub fn sample<'a, R>(pool: &[&'a Recipe], usage: &UsageCounter, rng: &mut R) -> Option<&'a Recipe>
where
    R: Rng + ?Sized,
{
    let mut ranked: Vec<&'a Recipe> = pool.to_vec();
    ranked.sort_by_key(|r| usage.count(&r.recipe_id));
    let keep = (ranked.len() / 2).max(1).min(ranked.len());
    ranked[..keep].choose(rng).copied()
}
