use std::collections::HashSet;

use larder_core::CompatibilitySummary;
use larder_core::filter::compatible;
use larder_store::Catalog;
use larder_store::models::MealType;

/// Print every catalog recipe cookable from `ingredients`, in catalog order.
pub fn run_recipes(catalog: &Catalog, ingredients: &[String]) {
    let pantry: HashSet<String> = ingredients.iter().cloned().collect();
    let found = compatible(&pantry, catalog.recipes());

    if found.is_empty() {
        println!("No recipes can be made from these ingredients.");
        return;
    }

    println!("{:<24} {:<36} {:<10}", "ID", "NAME", "MEAL");
    println!("{}", "-".repeat(72));
    for recipe in &found {
        println!(
            "{:<24} {:<36} {:<10}",
            truncate(&recipe.recipe_id, 24),
            truncate(&recipe.recipe_name, 36),
            recipe.meal_type,
        );
    }

    let summary = CompatibilitySummary::from_compatible(&found);
    let per_type: Vec<String> = MealType::ALL
        .iter()
        .map(|m| format!("{m}: {}", summary.count(*m)))
        .collect();
    println!();
    println!(
        "{} of {} recipes ({})",
        summary.total,
        catalog.len(),
        per_type.join(", ")
    );
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
