//! The day-by-day diet search.
//!
//! For each day, trials sample one recipe per meal type and accept the
//! first combination whose summed macros fall inside the nutrition range.
//! A day that exhausts its trials replays an earlier accepted day
//! round-robin; if no day has been accepted yet, generation stops.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use larder_store::models::{Macros, MealType, NutritionRange, Recipe};

use super::budget::{AttemptBudget, GenerationLimits};
use super::sample::{UsageCounter, sample};
use super::PlanDuration;
use crate::filter::MealPools;

/// One recipe per meal type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayMeals<'a> {
    pub breakfast: &'a Recipe,
    pub lunch: &'a Recipe,
    pub dinner: &'a Recipe,
}

impl<'a> DayMeals<'a> {
    /// Meals in plan order: breakfast, lunch, dinner.
    pub fn iter(&self) -> impl Iterator<Item = (MealType, &'a Recipe)> {
        [
            (MealType::Breakfast, self.breakfast),
            (MealType::Lunch, self.lunch),
            (MealType::Dinner, self.dinner),
        ]
        .into_iter()
    }

    pub fn totals(&self) -> Macros {
        self.iter().map(|(_, r)| r.macros).sum()
    }
}

/// Whether a day was found by the search or replayed from an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DaySource {
    Accepted,
    Cloned { from_day: u32 },
}

/// A single day of the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan<'a> {
    /// 1-based position in the plan.
    pub day: u32,
    pub meals: DayMeals<'a>,
    pub totals: Macros,
    pub source: DaySource,
}

impl DayPlan<'_> {
    pub fn is_clone(&self) -> bool {
        matches!(self.source, DaySource::Cloned { .. })
    }
}

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Termination {
    /// Every requested day was produced.
    Completed,
    /// A meal type had no compatible recipe; nothing was attempted.
    IncompletePools,
    /// `day` exhausted its trials before any day had been accepted.
    NoAcceptedDay { day: u32 },
    /// The global attempt cap ran out while working on `day`.
    AttemptBudgetExhausted { day: u32 },
}

/// Summary counters for one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub target_days: u32,
    pub accepted: u32,
    pub cloned: u32,
    pub total_attempts: u32,
    pub termination: Termination,
}

/// The result of one generation call.
#[derive(Debug, Clone)]
pub struct DietPlan<'a> {
    pub days: Vec<DayPlan<'a>>,
    /// Selection counts accumulated from accepted days only.
    pub usage: UsageCounter,
    pub stats: GenerationStats,
}

impl DietPlan<'_> {
    /// Number of days actually produced.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Build a plan covering `duration` from `pools`.
///
/// Never fails: incomplete pools, unsatisfiable ranges, and exhausted
/// budgets all produce a (possibly empty) plan whose `day` values run
/// contiguously from 1.
pub fn generate<'a, R>(
    pools: &MealPools<'a>,
    duration: PlanDuration,
    range: &NutritionRange,
    limits: &GenerationLimits,
    rng: &mut R,
) -> DietPlan<'a>
where
    R: Rng + ?Sized,
{
    let target_days = duration.total_days();
    let mut stats = GenerationStats {
        target_days,
        accepted: 0,
        cloned: 0,
        total_attempts: 0,
        termination: Termination::Completed,
    };

    if !pools.is_complete() {
        debug!(
            breakfasts = pools.breakfasts.len(),
            lunches = pools.lunches.len(),
            dinners = pools.dinners.len(),
            "missing a meal type; skipping generation"
        );
        stats.termination = Termination::IncompletePools;
        return DietPlan {
            days: Vec::new(),
            usage: UsageCounter::new(),
            stats,
        };
    }

    let mut budget = AttemptBudget::new(limits, target_days);
    let mut usage = UsageCounter::new();
    let mut days: Vec<DayPlan<'a>> = Vec::with_capacity(target_days as usize);
    // Accepted days in acceptance order; the clone source pool.
    let mut clonable: Vec<DayPlan<'a>> = Vec::new();

    for day in 1..=target_days {
        if budget.global_exhausted() {
            stats.termination = Termination::AttemptBudgetExhausted { day };
            break;
        }
        budget.start_day();

        if let Some(meals) = search_day(pools, range, &usage, &mut budget, rng) {
            for (_, recipe) in meals.iter() {
                usage.record(&recipe.recipe_id);
            }
            let plan = DayPlan {
                day,
                meals,
                totals: meals.totals(),
                source: DaySource::Accepted,
            };
            debug!(day, attempts = budget.attempts_today(), "day accepted");
            clonable.push(plan.clone());
            days.push(plan);
            stats.accepted += 1;
            continue;
        }

        if !budget.day_exhausted() {
            debug!(day, total = budget.total_attempts(), "global attempt budget exhausted");
            stats.termination = Termination::AttemptBudgetExhausted { day };
            break;
        }

        if clonable.is_empty() {
            debug!(day, "no accepted day to clone; stopping");
            stats.termination = Termination::NoAcceptedDay { day };
            break;
        }

        let source = &clonable[(day as usize - 1) % clonable.len()];
        debug!(day, from_day = source.day, "day exhausted; cloning");
        days.push(DayPlan {
            day,
            meals: source.meals,
            totals: source.totals,
            source: DaySource::Cloned {
                from_day: source.day,
            },
        });
        stats.cloned += 1;
    }

    stats.total_attempts = budget.total_attempts();
    info!(
        target_days,
        days = days.len(),
        accepted = stats.accepted,
        cloned = stats.cloned,
        attempts = stats.total_attempts,
        termination = ?stats.termination,
        "diet generated"
    );

    DietPlan { days, usage, stats }
}

/// Run trials for one day until a combination fits or the budget runs out.
fn search_day<'a, R>(
    pools: &MealPools<'a>,
    range: &NutritionRange,
    usage: &UsageCounter,
    budget: &mut AttemptBudget,
    rng: &mut R,
) -> Option<DayMeals<'a>>
where
    R: Rng + ?Sized,
{
    while budget.try_begin_trial() {
        let meals = DayMeals {
            breakfast: sample(&pools.breakfasts, usage, rng)?,
            lunch: sample(&pools.lunches, usage, rng)?,
            dinner: sample(&pools.dinners, usage, rng)?,
        };
        if range.contains(&meals.totals()) {
            return Some(meals);
        }
    }
    None
}
