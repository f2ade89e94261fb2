use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The slot a recipe fills in a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// Every meal type, in the order meals appear within a day.
    pub const ALL: [MealType; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        };
        f.write_str(s)
    }
}

impl FromStr for MealType {
    type Err = MealTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(MealTypeParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`MealType`] string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid meal type: {0:?} (expected breakfast, lunch, or dinner)")]
pub struct MealTypeParseError(pub String);

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

/// Precomputed macro-nutrient values for a recipe, or the sum over a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fibres: f64,
}

impl Macros {
    /// Named view over the five values, in a fixed order.
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("calories", self.calories),
            ("proteins", self.proteins),
            ("carbs", self.carbs),
            ("fats", self.fats),
            ("fibres", self.fibres),
        ]
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            proteins: self.proteins + rhs.proteins,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
            fibres: self.fibres + rhs.fibres,
        }
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Macros>>(iter: I) -> Macros {
        iter.fold(Macros::default(), Add::add)
    }
}

impl<'a> Sum<&'a Macros> for Macros {
    fn sum<I: Iterator<Item = &'a Macros>>(iter: I) -> Macros {
        iter.copied().sum()
    }
}

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// A catalog recipe. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_id: String,
    pub recipe_name: String,
    pub meal_type: MealType,
    /// Every ingredient the recipe requires.
    pub ingredient_ids: BTreeSet<String>,
    /// Amount per ingredient. Carried through to clients untouched.
    #[serde(default)]
    pub ingredient_quantities: BTreeMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub macros: Macros,
    #[serde(default)]
    pub method: String,
}

// ---------------------------------------------------------------------------
// Pantry
// ---------------------------------------------------------------------------

/// A saved set of ingredients the caller has on hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pantry {
    pub pantry_id: Uuid,
    pub ingredient_ids: HashSet<String>,
}

// ---------------------------------------------------------------------------
// Nutrition ranges
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` bounds for one macro.
///
/// An inverted range (`min > max`) is accepted and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRange {
    pub min: f64,
    pub max: f64,
}

impl MacroRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range that accepts any non-negative value.
    pub fn unbounded() -> Self {
        Self::new(0.0, f64::MAX)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Per-day targets for all five macros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionRange {
    pub calories: MacroRange,
    pub proteins: MacroRange,
    pub carbs: MacroRange,
    pub fats: MacroRange,
    pub fibres: MacroRange,
}

impl NutritionRange {
    /// Apply the same bounds to every macro.
    pub fn uniform(range: MacroRange) -> Self {
        Self {
            calories: range,
            proteins: range,
            carbs: range,
            fats: range,
            fibres: range,
        }
    }

    pub fn unbounded() -> Self {
        Self::uniform(MacroRange::unbounded())
    }

    /// True iff every macro of `totals` lies inside its range.
    pub fn contains(&self, totals: &Macros) -> bool {
        self.calories.contains(totals.calories)
            && self.proteins.contains(totals.proteins)
            && self.carbs.contains(totals.carbs)
            && self.fats.contains(totals.fats)
            && self.fibres.contains(totals.fibres)
    }
}

impl Default for NutritionRange {
    fn default() -> Self {
        Self::unbounded()
    }
}
