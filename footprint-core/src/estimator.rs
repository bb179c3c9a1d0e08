//! Weighted-sum carbon score for one set of lifestyle answers.

use footprint_schemas::{
    factors::{EmissionFactors, HabitDiscountTable},
    input::UserInput,
};
use serde::Serialize;
use tracing::{debug, warn};

/// The score and the terms it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionScore {
    pub travel_term: f64,
    pub energy_term: f64,
    pub diet_term: f64,
    /// Sum of the three terms before any habit discount.
    pub raw: f64,
    /// Total habit discount fraction. Not clamped.
    pub discount: f64,
    pub value: f64,
}

impl EmissionScore {
    /// The score rounded to two decimals, as shown to the user.
    pub fn rounded(&self) -> f64 {
        round2(self.value)
    }
}

/// Rounds to two decimals from the exact binary value, ties to even.
/// `1.125` becomes `1.12`, and `1.115` (stored just below) becomes `1.11`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Computes the emission score for `input`.
///
/// Unknown transport modes, energy sources and diets are charged the fallback
/// factor of their table; unknown habits earn no discount.
pub fn estimate(
    input: &UserInput,
    factors: &EmissionFactors,
    discounts: &HabitDiscountTable,
) -> EmissionScore {
    if !input.transport_mode.is_recognized() {
        debug!(mode = %input.transport_mode, "unknown transport mode, using fallback factor");
    }
    if !input.energy_source.is_recognized() {
        debug!(source = %input.energy_source, "unknown energy source, using fallback factor");
    }
    if !input.diet_type.is_recognized() {
        debug!(diet = %input.diet_type, "unknown diet type, using fallback factor");
    }

    let travel_term = input.daily_travel * factors.transport.factor(&input.transport_mode);
    let energy_term = input.energy_usage * factors.energy.factor(&input.energy_source);
    let diet_term = factors.diet.factor(&input.diet_type);
    let raw = travel_term + energy_term + diet_term;

    let discount = total_discount(input, discounts);
    if discount >= 1.0 {
        warn!(discount, "habit discount reaches 100%, score will be zero or negative");
    }

    EmissionScore {
        travel_term,
        energy_term,
        diet_term,
        raw,
        discount,
        value: raw * (1.0 - discount),
    }
}

/// Sum of the discounts of every distinct habit in `input`.
pub fn total_discount(input: &UserInput, discounts: &HabitDiscountTable) -> f64 {
    input.habits.iter().map(|h| discounts.discount(h)).sum()
}
