use std::collections::HashSet;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use larder_core::diet::{DaySource, GenerationLimits, PlanDuration, Termination, generate};
use larder_core::filter::MealPools;
use larder_store::Catalog;
use larder_store::models::{MacroRange, NutritionRange};

use crate::api::{DietResponse, GenerateReport};
use crate::recipes_cmd::truncate;

/// Options for an offline `larder generate` run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub ingredients: Vec<String>,
    pub duration: PlanDuration,
    pub range: NutritionRange,
    pub seed: Option<u64>,
    pub json: bool,
}

/// Parse an inclusive `MIN..MAX` range, e.g. `1800..2400`.
pub fn parse_macro_range(s: &str) -> Result<MacroRange, String> {
    let (min, max) = s
        .split_once("..")
        .ok_or_else(|| format!("expected MIN..MAX, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| format!("invalid number {v:?} in range {s:?}"))
    };
    Ok(MacroRange::new(parse(min)?, parse(max)?))
}

pub fn run_generate(
    catalog: &Catalog,
    limits: &GenerationLimits,
    options: &GenerateOptions,
) -> Result<()> {
    let pantry: HashSet<String> = options.ingredients.iter().cloned().collect();
    let pools = MealPools::for_pantry(&pantry, catalog.recipes());

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let plan = generate(&pools, options.duration, &options.range, limits, &mut rng);

    if options.json {
        let report = GenerateReport {
            diet: DietResponse::from_plan(&plan, true),
            stats: plan.stats,
        };
        let out = serde_json::to_string_pretty(&report).context("failed to serialize plan")?;
        println!("{out}");
        return Ok(());
    }

    for day in &plan.days {
        match day.source {
            DaySource::Accepted => println!("Day {}", day.day),
            DaySource::Cloned { from_day } => println!("Day {} (repeat of day {from_day})", day.day),
        }
        for (meal_type, recipe) in day.meals.iter() {
            println!(
                "  {:<10} {:<36} {:>7.0} kcal",
                meal_type.to_string(),
                truncate(&recipe.recipe_name, 36),
                recipe.macros.calories,
            );
        }
        let totals: Vec<String> = day
            .totals
            .fields()
            .iter()
            .map(|(name, value)| format!("{name} {value:.1}"))
            .collect();
        println!("  totals: {}", totals.join(", "));
        println!();
    }

    let stats = plan.stats;
    println!(
        "{} of {} days ({} searched, {} repeated) after {} attempts",
        plan.day_count(),
        stats.target_days,
        stats.accepted,
        stats.cloned,
        stats.total_attempts,
    );
    match stats.termination {
        Termination::Completed => {}
        Termination::IncompletePools => {
            println!("Stopped: the ingredients do not cover breakfast, lunch and dinner.");
        }
        Termination::NoAcceptedDay { day } => {
            println!("Stopped at day {day}: no meal combination fits the nutrition range.");
        }
        Termination::AttemptBudgetExhausted { day } => {
            println!("Stopped at day {day}: attempt budget exhausted.");
        }
    }
    Ok(())
}
