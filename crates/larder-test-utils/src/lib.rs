//! Shared test utilities for larder tests.
//!
//! Provides recipe fixtures plus helpers that write a catalog to a
//! temporary JSON file, so loader tests never touch the shipped data.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use larder_store::Catalog;
use larder_store::models::{Macros, MealType, Recipe};
use tempfile::TempDir;

/// Build a recipe requiring `ingredients`, with uniform quantities and the
/// given macros.
pub fn recipe(id: &str, meal_type: MealType, ingredients: &[&str], macros: Macros) -> Recipe {
    let ingredient_ids: BTreeSet<String> = ingredients.iter().map(|s| s.to_string()).collect();
    let ingredient_quantities: BTreeMap<String, serde_json::Value> = ingredients
        .iter()
        .map(|s| (s.to_string(), serde_json::json!("100g")))
        .collect();
    Recipe {
        recipe_id: id.to_owned(),
        recipe_name: format!("Recipe {id}"),
        meal_type,
        ingredient_ids,
        ingredient_quantities,
        macros,
        method: format!("Prepare {id}."),
    }
}

/// Macros with every field set to `value`.
pub fn flat_macros(value: f64) -> Macros {
    Macros {
        calories: value,
        proteins: value,
        carbs: value,
        fats: value,
        fibres: value,
    }
}

/// Macros with only calories set.
pub fn calories(value: f64) -> Macros {
    Macros {
        calories: value,
        ..Macros::default()
    }
}

/// The pantry used by the round-trip scenarios.
pub const ROUND_TRIP_PANTRY: [&str; 5] = ["flour", "egg", "milk", "chicken", "rice"];

/// One breakfast (`flour, egg, milk`) and one lunch (`chicken, rice`), no
/// dinner.
pub fn breakfast_and_lunch_only() -> Vec<Recipe> {
    vec![
        recipe(
            "pancakes",
            MealType::Breakfast,
            &["flour", "egg", "milk"],
            Macros {
                calories: 420.0,
                proteins: 12.0,
                carbs: 60.0,
                fats: 14.0,
                fibres: 2.0,
            },
        ),
        recipe(
            "chicken-rice",
            MealType::Lunch,
            &["chicken", "rice"],
            Macros {
                calories: 610.0,
                proteins: 42.0,
                carbs: 70.0,
                fats: 12.0,
                fibres: 3.0,
            },
        ),
    ]
}

/// Breakfast pool `[good, bad]` with one lunch and one dinner, all made
/// from `staple` at 100 kcal except `bad` at 1000 kcal.
///
/// Under a 0..=400 kcal range only `good` fits. After it is used once, the
/// usage bias restricts breakfast picks to `bad`, so every later day must be
/// cloned from day 1.
pub fn one_good_breakfast() -> Vec<Recipe> {
    vec![
        recipe("good", MealType::Breakfast, &["staple"], calories(100.0)),
        recipe("bad", MealType::Breakfast, &["staple"], calories(1000.0)),
        recipe("soup", MealType::Lunch, &["staple"], calories(100.0)),
        recipe("stew", MealType::Dinner, &["staple"], calories(100.0)),
    ]
}

/// A small catalog with `per_type` recipes of each meal type, all made from
/// `staple`, with ascending calories so combinations are distinguishable.
pub fn balanced_recipes(per_type: usize) -> Vec<Recipe> {
    let mut out = Vec::with_capacity(per_type * 3);
    for meal_type in MealType::ALL {
        for i in 0..per_type {
            let id = format!("{meal_type}-{i}");
            out.push(recipe(
                &id,
                meal_type,
                &["staple"],
                Macros {
                    calories: 300.0 + 50.0 * i as f64,
                    proteins: 10.0 + i as f64,
                    carbs: 40.0,
                    fats: 10.0,
                    fibres: 3.0,
                },
            ));
        }
    }
    out
}

/// Build a validated in-memory catalog. Panics on invalid fixtures.
pub fn catalog(recipes: Vec<Recipe>) -> Catalog {
    Catalog::from_recipes(recipes).expect("fixture recipes should form a valid catalog")
}

/// Write `recipes` as a JSON catalog into a fresh temporary directory.
///
/// Returns the directory guard (keep it alive) and the file path.
pub fn write_catalog(recipes: &[Recipe]) -> (TempDir, PathBuf) {
    let contents = serde_json::to_string_pretty(recipes).expect("recipes should serialize");
    write_raw_catalog(&contents)
}

/// Write arbitrary text as `recipes.json` in a fresh temporary directory.
pub fn write_raw_catalog(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("recipes.json");
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    (dir, path)
}
