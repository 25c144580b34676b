//! Budget tiering: economy, balanced and performance ceilings

use crate::error::{AdvisorError, Result};
use crate::models::{BudgetTier, TierLabel};

/// Floors and stretch allowance used when deriving ceilings, in COP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    pub economy_floor: u64,
    pub balanced_floor: u64,
    pub performance_floor: u64,
    /// Upper bound on how far the performance tier may exceed the budget
    pub stretch_cap: u64,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            economy_floor: 500_000,
            balanced_floor: 800_000,
            performance_floor: 1_000_000,
            stretch_cap: 2_000_000,
        }
    }
}

impl TierPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.economy_floor > self.balanced_floor || self.balanced_floor > self.performance_floor {
            return Err(AdvisorError::InvalidPolicy(format!(
                "floors must be non-decreasing (got {} / {} / {})",
                self.economy_floor, self.balanced_floor, self.performance_floor
            )));
        }
        Ok(())
    }
}

/// Derive the three tiers for a nominal budget using the default policy
pub fn derive_tiers(nominal_budget: u64) -> Result<[BudgetTier; 3]> {
    derive_tiers_with(nominal_budget, &TierPolicy::default())
}

pub fn derive_tiers_with(nominal_budget: u64, policy: &TierPolicy) -> Result<[BudgetTier; 3]> {
    if nominal_budget == 0 {
        return Err(AdvisorError::InvalidProfile(
            "budget must be a positive amount".to_string(),
        ));
    }
    policy.validate()?;

    let budget = nominal_budget as f64;
    let stretched = (budget * 1.2).min(budget + policy.stretch_cap as f64);

    Ok([
        BudgetTier {
            label: TierLabel::Economy,
            ceiling: policy.economy_floor.max((budget * 0.6).round() as u64),
        },
        BudgetTier {
            label: TierLabel::Balanced,
            ceiling: policy.balanced_floor.max((budget * 0.95).round() as u64),
        },
        BudgetTier {
            label: TierLabel::Performance,
            ceiling: policy.performance_floor.max(stretched.round() as u64),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ceilings(budget: u64) -> [u64; 3] {
        derive_tiers(budget).unwrap().map(|t| t.ceiling)
    }

    #[test]
    fn scales_budget() {
        assert_eq!(ceilings(2_000_000), [1_200_000, 1_900_000, 2_400_000]);
        assert_eq!(ceilings(1_500_000), [900_000, 1_425_000, 1_800_000]);
    }

    #[test]
    fn floors_apply_to_small_budgets() {
        assert_eq!(ceilings(1), [500_000, 800_000, 1_000_000]);
    }

    #[test]
    fn stretch_cap_limits_large_budgets() {
        assert_eq!(ceilings(20_000_000)[2], 22_000_000);
    }

    #[test]
    fn labels_are_in_fixed_order() {
        let labels = derive_tiers(3_000_000).unwrap().map(|t| t.label);
        assert_eq!(labels, [TierLabel::Economy, TierLabel::Balanced, TierLabel::Performance]);
    }

    #[test]
    fn ceilings_never_decrease() {
        let mut budget = 1;
        while budget < 100_000_000 {
            let [econ, bal, perf] = ceilings(budget);
            assert!(econ <= bal && bal <= perf, "budget {budget}: {econ} {bal} {perf}");
            budget = budget * 3 + 7;
        }
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert_matches!(derive_tiers(0), Err(AdvisorError::InvalidProfile(_)));
    }

    #[test]
    fn decreasing_floors_are_rejected() {
        let policy = TierPolicy {
            economy_floor: 900_000,
            ..TierPolicy::default()
        };
        assert_matches!(derive_tiers_with(1_000_000, &policy), Err(AdvisorError::InvalidPolicy(_)));
    }
}
