//! Attempt budgets that bound the per-day search.
//!
//! Two counters are tracked: trials spent on the current day and trials
//! spent across the whole generation call. A trial may start only while
//! both are under their caps.

use serde::{Deserialize, Serialize};

/// Trials allowed per day before the day is declared exhausted.
pub const MAX_ATTEMPTS_PER_DAY: u32 = 100;

/// Tunable caps for one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationLimits {
    /// Trials per day.
    pub attempts_per_day: u32,
    /// Override for the global cap. `None` means
    /// `total_days * attempts_per_day`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total_attempts: Option<u32>,
}

impl GenerationLimits {
    pub fn new(attempts_per_day: u32) -> Self {
        Self {
            attempts_per_day,
            max_total_attempts: None,
        }
    }

    /// Global cap for a plan covering `total_days`.
    pub fn total_cap(&self, total_days: u32) -> u32 {
        self.max_total_attempts
            .unwrap_or_else(|| total_days.saturating_mul(self.attempts_per_day))
    }
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS_PER_DAY)
    }
}

/// Running attempt counters for one generation call.
#[derive(Debug, Clone)]
pub struct AttemptBudget {
    per_day_cap: u32,
    global_cap: u32,
    today: u32,
    total: u32,
}

impl AttemptBudget {
    pub fn new(limits: &GenerationLimits, total_days: u32) -> Self {
        Self {
            per_day_cap: limits.attempts_per_day,
            global_cap: limits.total_cap(total_days),
            today: 0,
            total: 0,
        }
    }

    /// Reset the per-day counter. The global counter carries over.
    pub fn start_day(&mut self) {
        self.today = 0;
    }

    /// Record one trial if both budgets allow it.
    pub fn try_begin_trial(&mut self) -> bool {
        if self.day_exhausted() || self.global_exhausted() {
            return false;
        }
        self.today += 1;
        self.total += 1;
        true
    }

    pub fn day_exhausted(&self) -> bool {
        self.today >= self.per_day_cap
    }

    pub fn global_exhausted(&self) -> bool {
        self.total >= self.global_cap
    }

    /// Trials spent on the current day.
    pub fn attempts_today(&self) -> u32 {
        self.today
    }

    /// Trials spent across the whole call.
    pub fn total_attempts(&self) -> u32 {
        self.total
    }

    pub fn global_cap(&self) -> u32 {
        self.global_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_global_cap_scales_with_days() {
        let limits = GenerationLimits::default();
        assert_eq!(limits.total_cap(1), 100);
        assert_eq!(limits.total_cap(7), 700);
        assert_eq!(limits.total_cap(30), 3000);
    }

    #[test]
    fn explicit_global_cap_wins() {
        let limits = GenerationLimits {
            attempts_per_day: 100,
            max_total_attempts: Some(150),
        };
        assert_eq!(limits.total_cap(30), 150);
    }

    #[test]
    fn per_day_counter_resets_but_total_carries() {
        let mut budget = AttemptBudget::new(&GenerationLimits::new(3), 2);
        assert_eq!(budget.global_cap(), 6);

        while budget.try_begin_trial() {}
        assert_eq!(budget.attempts_today(), 3);
        assert!(budget.day_exhausted());
        assert!(!budget.global_exhausted());

        budget.start_day();
        assert_eq!(budget.attempts_today(), 0);
        assert!(budget.try_begin_trial());
        assert_eq!(budget.total_attempts(), 4);
    }

    #[test]
    fn global_cap_stops_mid_day() {
        let limits = GenerationLimits {
            attempts_per_day: 10,
            max_total_attempts: Some(4),
        };
        let mut budget = AttemptBudget::new(&limits, 5);
        let mut trials = 0;
        while budget.try_begin_trial() {
            trials += 1;
        }
        assert_eq!(trials, 4);
        assert!(budget.global_exhausted());
        assert!(!budget.day_exhausted());
    }

    #[test]
    fn zero_per_day_budget_allows_nothing() {
        let mut budget = AttemptBudget::new(&GenerationLimits::new(0), 7);
        assert!(!budget.try_begin_trial());
        assert_eq!(budget.total_attempts(), 0);
    }
}
