//! Diet generation: sampling, attempt budgets, and the day-by-day search.

pub mod budget;
pub mod generator;
pub mod sample;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub use budget::{AttemptBudget, GenerationLimits, MAX_ATTEMPTS_PER_DAY};
pub use generator::{DayMeals, DayPlan, DaySource, DietPlan, GenerationStats, Termination, generate};
pub use sample::{UsageCounter, sample};

/// How many days a plan should cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanDuration {
    #[default]
    Day,
    Week,
    Month,
}

impl PlanDuration {
    pub fn total_days(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    /// Lenient mapping used for API input: unrecognized selectors mean a
    /// single day.
    pub fn from_selector(selector: &str) -> Self {
        selector.parse().unwrap_or_default()
    }
}

impl fmt::Display for PlanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(DurationParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlanDuration`] string.
#[derive(Debug, Clone, Error)]
#[error("invalid duration: {0:?} (expected day, week, or month)")]
pub struct DurationParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_map_to_day_counts() {
        assert_eq!(PlanDuration::Day.total_days(), 1);
        assert_eq!(PlanDuration::Week.total_days(), 7);
        assert_eq!(PlanDuration::Month.total_days(), 30);
    }

    #[test]
    fn selector_defaults_to_one_day() {
        assert_eq!(PlanDuration::from_selector("week"), PlanDuration::Week);
        assert_eq!(PlanDuration::from_selector("fortnight"), PlanDuration::Day);
        assert_eq!(PlanDuration::from_selector(""), PlanDuration::Day);
        assert_eq!(PlanDuration::from_selector("Week"), PlanDuration::Day);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        let err = "year".parse::<PlanDuration>().unwrap_err();
        assert!(err.to_string().contains("year"));
        for d in [PlanDuration::Day, PlanDuration::Week, PlanDuration::Month] {
            assert_eq!(d.to_string().parse::<PlanDuration>().unwrap(), d);
        }
    }
}
