//! Integration tests for loading the recipe catalog from disk.

use std::path::Path;

use larder_store::models::MealType;
use larder_store::{Catalog, CatalogError};
use larder_test_utils::{balanced_recipes, breakfast_and_lunch_only, write_catalog, write_raw_catalog};

#[test]
fn load_reads_recipes_in_file_order() {
    let recipes = breakfast_and_lunch_only();
    let (_dir, path) = write_catalog(&recipes);

    let catalog = Catalog::load(&path).expect("catalog should load");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.recipes(), recipes.as_slice());
}

#[test]
fn load_counts_meal_types() {
    let (_dir, path) = write_catalog(&balanced_recipes(3));

    let catalog = Catalog::load(&path).expect("catalog should load");
    let counts = catalog.count_by_meal_type();
    for meal_type in MealType::ALL {
        assert_eq!(counts[&meal_type], 3, "{meal_type} count");
    }
}

#[test]
fn load_missing_file_is_io_error() {
    let err = Catalog::load("/tmp/nonexistent_larder_catalog_xyz.json").unwrap_err();
    assert!(
        matches!(err, CatalogError::Io { .. }),
        "expected Io, got: {err}"
    );
    assert!(err.to_string().contains("nonexistent_larder_catalog_xyz"));
}

#[test]
fn load_malformed_json_is_parse_error() {
    let (_dir, path) = write_raw_catalog("[{ this is not json");
    let err = Catalog::load(&path).unwrap_err();
    assert!(
        matches!(err, CatalogError::Parse { .. }),
        "expected Parse, got: {err}"
    );
}

#[test]
fn load_rejects_wrong_shape() {
    let (_dir, path) = write_raw_catalog(r#"{"recipes": []}"#);
    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn load_rejects_missing_macro_field() {
    let (_dir, path) = write_raw_catalog(
        r#"[{
            "recipe_id": "oats",
            "recipe_name": "Oats",
            "meal_type": "breakfast",
            "ingredient_ids": ["oats"],
            "calories": 300, "proteins": 10, "carbs": 50, "fats": 6
        }]"#,
    );
    let err = Catalog::load(&path).unwrap_err();
    assert!(
        matches!(err, CatalogError::Parse { .. }),
        "expected Parse for missing fibres, got: {err}"
    );
}

#[test]
fn load_rejects_duplicate_ids() {
    let mut recipes = breakfast_and_lunch_only();
    recipes.push(recipes[0].clone());
    let (_dir, path) = write_catalog(&recipes);

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateRecipeId(ref id) if id == "pancakes"));
}

#[test]
fn shipped_catalog_loads() {
    // CARGO_MANIFEST_DIR is crates/larder-store; go up two levels.
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/recipes.json");
    let catalog = Catalog::load(&path)
        .unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()));
    let counts = catalog.count_by_meal_type();
    for meal_type in MealType::ALL {
        assert!(counts[&meal_type] > 0, "shipped catalog has no {meal_type}");
    }
}
