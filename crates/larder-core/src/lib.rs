//! Meal-plan generation for larder.
//!
//! - [`filter`] narrows the catalog to what a pantry can cook and splits it
//!   into per-meal-type pools.
//! - [`diet`] runs the bounded randomized search that turns those pools
//!   into a day-by-day plan.

pub mod diet;
pub mod filter;

pub use diet::{DietPlan, GenerationLimits, PlanDuration, generate};
pub use filter::{CompatibilitySummary, MealPools, compatible};
