//! Sanity checks for factor tables supplied through configuration.

use crate::error::ConfigError;
use footprint_schemas::factors::{BreakdownFactors, EmissionFactors, HabitDiscountTable};
use tracing::warn;

fn check_factors(
    table: &'static str,
    entries: impl IntoIterator<Item = (&'static str, f64)>,
) -> Result<(), ConfigError> {
    for (key, value) in entries {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidFactor { table, key, value });
        }
    }
    Ok(())
}

pub fn validate_emission_factors(factors: &EmissionFactors) -> Result<(), ConfigError> {
    check_factors("transport", factors.transport.entries())?;
    check_factors("energy", factors.energy.entries())?;
    check_factors("diet", factors.diet.entries())
}

pub fn validate_breakdown_factors(factors: &BreakdownFactors) -> Result<(), ConfigError> {
    check_factors(
        "breakdown",
        [
            ("travel_per_km", factors.travel_per_km),
            ("energy_per_kwh", factors.energy_per_kwh),
        ],
    )?;
    check_factors("breakdown.diet", factors.diet.entries())
}

/// Each discount must lie in `[0, 1]`. Their sum is not bounded; a table whose
/// combined discount reaches 1 is accepted with a warning.
pub fn validate_habit_discounts(table: &HabitDiscountTable) -> Result<(), ConfigError> {
    for (key, value) in table.entries() {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidDiscount { key, value });
        }
    }
    let total = table.max_total();
    if total >= 1.0 {
        warn!(total, "combined habit discounts can cancel or invert the score");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_emission_factors(&EmissionFactors::default()).is_ok());
        assert!(validate_breakdown_factors(&BreakdownFactors::default()).is_ok());
        assert!(validate_habit_discounts(&HabitDiscountTable::default()).is_ok());
    }

    #[test]
    fn negative_factor_is_rejected() {
        let mut factors = EmissionFactors::default();
        factors.energy.hybrid = -0.2;
        assert_eq!(
            validate_emission_factors(&factors),
            Err(ConfigError::InvalidFactor {
                table: "energy",
                key: "hybrid",
                value: -0.2
            })
        );
    }

    #[test]
    fn nan_breakdown_factor_is_rejected() {
        let factors = BreakdownFactors {
            travel_per_km: f64::NAN,
            ..BreakdownFactors::default()
        };
        assert!(validate_breakdown_factors(&factors).is_err());
    }

    #[test]
    fn discount_above_one_is_rejected_but_large_sums_pass() {
        let too_big = HabitDiscountTable {
            compost: 1.5,
            ..HabitDiscountTable::default()
        };
        assert!(matches!(
            validate_habit_discounts(&too_big),
            Err(ConfigError::InvalidDiscount { key: "compost", .. })
        ));

        let large_sum = HabitDiscountTable {
            recycle: 0.5,
            avoid_plastic: 0.5,
            ..HabitDiscountTable::default()
        };
        assert!(validate_habit_discounts(&large_sum).is_ok());
    }
}
