//! Compatibility filter: which catalog recipes a pantry can cook.
//!
//! A recipe is compatible when every ingredient it requires is present in
//! the pantry. All functions here are pure and preserve catalog order.

use std::collections::HashSet;

use serde::Serialize;

use larder_store::models::{MealType, Recipe};

/// True iff `recipe.ingredient_ids` is a subset of `pantry`.
pub fn is_compatible(pantry: &HashSet<String>, recipe: &Recipe) -> bool {
    recipe
        .ingredient_ids
        .iter()
        .all(|ingredient| pantry.contains(ingredient))
}

/// Recipes from `recipes` that `pantry` can cook, in their original order.
pub fn compatible<'a>(pantry: &HashSet<String>, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| is_compatible(pantry, r)).collect()
}

/// Compatible recipes split by meal type.
#[derive(Debug, Clone, Default)]
pub struct MealPools<'a> {
    pub breakfasts: Vec<&'a Recipe>,
    pub lunches: Vec<&'a Recipe>,
    pub dinners: Vec<&'a Recipe>,
}

impl<'a> MealPools<'a> {
    /// Partition already-filtered recipes, keeping their relative order.
    pub fn from_compatible(recipes: &[&'a Recipe]) -> Self {
        let mut pools = Self::default();
        for &recipe in recipes {
            match recipe.meal_type {
                MealType::Breakfast => pools.breakfasts.push(recipe),
                MealType::Lunch => pools.lunches.push(recipe),
                MealType::Dinner => pools.dinners.push(recipe),
            }
        }
        pools
    }

    /// Filter `recipes` against `pantry` and partition the result.
    pub fn for_pantry(pantry: &HashSet<String>, recipes: &'a [Recipe]) -> Self {
        Self::from_compatible(&compatible(pantry, recipes))
    }

    pub fn pool(&self, meal_type: MealType) -> &[&'a Recipe] {
        match meal_type {
            MealType::Breakfast => &self.breakfasts,
            MealType::Lunch => &self.lunches,
            MealType::Dinner => &self.dinners,
        }
    }

    /// True iff every meal type has at least one recipe.
    pub fn is_complete(&self) -> bool {
        MealType::ALL.iter().all(|m| !self.pool(*m).is_empty())
    }
}

/// Counts reported by the "what can I cook" query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompatibilitySummary {
    pub total: usize,
    pub breakfast: usize,
    pub lunch: usize,
    pub dinner: usize,
}

impl CompatibilitySummary {
    pub fn from_compatible(recipes: &[&Recipe]) -> Self {
        let mut summary = Self {
            total: recipes.len(),
            ..Self::default()
        };
        for recipe in recipes {
            match recipe.meal_type {
                MealType::Breakfast => summary.breakfast += 1,
                MealType::Lunch => summary.lunch += 1,
                MealType::Dinner => summary.dinner += 1,
            }
        }
        summary
    }

    pub fn count(&self, meal_type: MealType) -> usize {
        match meal_type {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use larder_store::models::Macros;

    fn recipe(id: &str, meal_type: MealType, ingredients: &[&str]) -> Recipe {
        Recipe {
            recipe_id: id.to_owned(),
            recipe_name: id.to_owned(),
            meal_type,
            ingredient_ids: ingredients.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            ingredient_quantities: Default::default(),
            macros: Macros::default(),
            method: String::new(),
        }
    }

    fn pantry(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn subset_is_compatible() {
        let r = recipe("omelette", MealType::Breakfast, &["egg", "milk"]);
        assert!(is_compatible(&pantry(&["egg", "milk", "salt"]), &r));
        assert!(is_compatible(&pantry(&["egg", "milk"]), &r));
        assert!(!is_compatible(&pantry(&["egg"]), &r));
    }

    #[test]
    fn recipe_without_ingredients_always_fits() {
        let r = recipe("water", MealType::Lunch, &[]);
        assert!(is_compatible(&HashSet::new(), &r));
    }

    #[test]
    fn empty_pantry_matches_only_ingredient_free_recipes() {
        let recipes = vec![
            recipe("a", MealType::Breakfast, &["egg"]),
            recipe("b", MealType::Lunch, &[]),
        ];
        let got = compatible(&HashSet::new(), &recipes);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].recipe_id, "b");
    }

    #[test]
    fn compatible_preserves_catalog_order() {
        let recipes = vec![
            recipe("z", MealType::Dinner, &["rice"]),
            recipe("skip", MealType::Dinner, &["caviar"]),
            recipe("a", MealType::Breakfast, &["egg"]),
            recipe("m", MealType::Lunch, &["rice", "egg"]),
        ];
        let got = compatible(&pantry(&["rice", "egg"]), &recipes);
        let ids: Vec<&str> = got.iter().map(|r| r.recipe_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn pools_partition_by_meal_type() {
        let recipes = vec![
            recipe("b1", MealType::Breakfast, &[]),
            recipe("d1", MealType::Dinner, &[]),
            recipe("b2", MealType::Breakfast, &[]),
            recipe("l1", MealType::Lunch, &[]),
        ];
        let pools = MealPools::for_pantry(&HashSet::new(), &recipes);
        let ids = |pool: &[&Recipe]| pool.iter().map(|r| r.recipe_id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&pools.breakfasts), vec!["b1", "b2"]);
        assert_eq!(ids(&pools.lunches), vec!["l1"]);
        assert_eq!(ids(&pools.dinners), vec!["d1"]);
        assert!(pools.is_complete());
    }

    #[test]
    fn pools_missing_a_meal_type_are_incomplete() {
        let recipes = vec![
            recipe("b1", MealType::Breakfast, &[]),
            recipe("l1", MealType::Lunch, &[]),
        ];
        let pools = MealPools::for_pantry(&HashSet::new(), &recipes);
        assert!(!pools.is_complete());
        assert!(pools.pool(MealType::Dinner).is_empty());
    }

    #[test]
    fn summary_counts_each_meal_type() {
        let recipes = vec![
            recipe("b1", MealType::Breakfast, &[]),
            recipe("b2", MealType::Breakfast, &[]),
            recipe("l1", MealType::Lunch, &[]),
        ];
        let refs: Vec<&Recipe> = recipes.iter().collect();
        let summary = CompatibilitySummary::from_compatible(&refs);
        assert_eq!(
            summary,
            CompatibilitySummary {
                total: 3,
                breakfast: 2,
                lunch: 1,
                dinner: 0,
            }
        );
        assert_eq!(summary.count(MealType::Breakfast), 2);
    }
}
