//! JSON request and response bodies shared by the HTTP API and `--json` output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_core::CompatibilitySummary;
use larder_core::diet::{DaySource, DietPlan, GenerationStats};
use larder_store::models::{Macros, MealType, NutritionRange, Recipe};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SavePantryRequest {
    pub ingredient_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompatibleRecipesRequest {
    pub pantry_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDietRequest {
    pub pantry_id: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    /// Accepted for compatibility; plans always contain three meals a day.
    /// Any JSON number is accepted, so `3` and `3.0` both parse.
    #[serde(default = "default_meals_per_day")]
    pub meals_per_day: f64,
    pub nutrition_range: NutritionRange,
}

fn default_duration() -> String {
    "day".to_string()
}

fn default_meals_per_day() -> f64 {
    3.0
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SavePantryResponse {
    pub pantry_id: Uuid,
    pub ingredient_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MealTypeCounts {
    pub breakfast: usize,
    pub lunch: usize,
    pub dinner: usize,
}

#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub recipe_id: String,
    pub recipe_name: String,
    pub meal_type: MealType,
}

#[derive(Debug, Serialize)]
pub struct CompatibleRecipesResponse {
    pub total_compatible_recipes: usize,
    pub by_meal_type: MealTypeCounts,
    pub recipes: Vec<RecipeSummary>,
}

impl CompatibleRecipesResponse {
    pub fn new(recipes: &[&Recipe]) -> Self {
        let summary = CompatibilitySummary::from_compatible(recipes);
        Self {
            total_compatible_recipes: summary.total,
            by_meal_type: MealTypeCounts {
                breakfast: summary.breakfast,
                lunch: summary.lunch,
                dinner: summary.dinner,
            },
            recipes: recipes
                .iter()
                .map(|r| RecipeSummary {
                    recipe_id: r.recipe_id.clone(),
                    recipe_name: r.recipe_name.clone(),
                    meal_type: r.meal_type,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal_type: MealType,
    pub recipe_id: String,
    pub recipe_name: String,
    #[serde(flatten)]
    pub macros: Macros,
    pub ingredient_quantities: BTreeMap<String, serde_json::Value>,
    pub method: String,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub day: u32,
    pub meals: Vec<MealResponse>,
    pub totals: Macros,
    /// Only populated by the offline `generate --json` report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DaySource>,
}

#[derive(Debug, Serialize)]
pub struct DietResponse {
    pub days: usize,
    pub diet: Vec<DayResponse>,
}

impl DietResponse {
    pub fn from_plan(plan: &DietPlan<'_>, with_sources: bool) -> Self {
        let diet = plan
            .days
            .iter()
            .map(|day| DayResponse {
                day: day.day,
                meals: day
                    .meals
                    .iter()
                    .map(|(meal_type, recipe)| MealResponse {
                        meal_type,
                        recipe_id: recipe.recipe_id.clone(),
                        recipe_name: recipe.recipe_name.clone(),
                        macros: recipe.macros,
                        ingredient_quantities: recipe.ingredient_quantities.clone(),
                        method: recipe.method.clone(),
                    })
                    .collect(),
                totals: day.totals,
                source: with_sources.then_some(day.source),
            })
            .collect();
        Self {
            days: plan.day_count(),
            diet,
        }
    }
}

impl From<&DietPlan<'_>> for DietResponse {
    fn from(plan: &DietPlan<'_>) -> Self {
        Self::from_plan(plan, false)
    }
}

/// `generate --json` output: the API body plus search statistics.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    #[serde(flatten)]
    pub diet: DietResponse,
    pub stats: GenerationStats,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub recipes: usize,
    pub pantries: usize,
}
