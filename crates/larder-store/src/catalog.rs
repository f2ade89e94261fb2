//! Recipe catalog: loaded once at startup, read-only afterwards.
//!
//! The on-disk format is a JSON array of [`Recipe`] records with the macro
//! values flattened into each record.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::{MealType, Recipe};

/// Errors that make a catalog unusable.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read recipe catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recipe catalog at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate recipe id: {0:?}")]
    DuplicateRecipeId(String),

    #[error("recipe {recipe_id:?} has invalid {field} value {value} (must be finite and non-negative)")]
    InvalidMacro {
        recipe_id: String,
        field: &'static str,
        value: f64,
    },
}

/// Immutable, ordered collection of recipes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Read and validate the catalog file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let recipes: Vec<Recipe> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_recipes(recipes)?;
        let counts = catalog.count_by_meal_type();
        info!(
            path = %path.display(),
            recipes = catalog.len(),
            breakfast = counts[&MealType::Breakfast],
            lunch = counts[&MealType::Lunch],
            dinner = counts[&MealType::Dinner],
            "recipe catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from recipes already in memory, applying the same
    /// validation as [`Catalog::load`].
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        validate(&recipes)?;
        Ok(Self { recipes })
    }

    /// All recipes, in load order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Number of recipes per meal type. Every meal type has an entry.
    pub fn count_by_meal_type(&self) -> HashMap<MealType, usize> {
        let mut counts: HashMap<MealType, usize> =
            MealType::ALL.iter().map(|m| (*m, 0)).collect();
        for recipe in &self.recipes {
            *counts.entry(recipe.meal_type).or_default() += 1;
        }
        counts
    }
}

fn validate(recipes: &[Recipe]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for recipe in recipes {
        if !seen.insert(recipe.recipe_id.as_str()) {
            return Err(CatalogError::DuplicateRecipeId(recipe.recipe_id.clone()));
        }
        for (field, value) in recipe.macros.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(CatalogError::InvalidMacro {
                    recipe_id: recipe.recipe_id.clone(),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}
