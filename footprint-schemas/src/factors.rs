use crate::input::{DietType, EnergySource, Habit, TransportMode};
use serde::{Deserialize, Serialize};

/// kg CO2 per km, by transport mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportFactors {
    pub car_petrol: f64,
    pub car_diesel: f64,
    pub car_electric: f64,
    pub bus: f64,
    pub train: f64,
    pub bike: f64,
    pub walk: f64,
    pub fallback: f64,
}

impl Default for TransportFactors {
    fn default() -> Self {
        Self {
            car_petrol: 0.21,
            car_diesel: 0.25,
            car_electric: 0.05,
            bus: 0.1,
            train: 0.05,
            bike: 0.0,
            walk: 0.0,
            fallback: 0.2,
        }
    }
}

impl TransportFactors {
    pub fn factor(&self, mode: &TransportMode) -> f64 {
        match mode {
            TransportMode::CarPetrol => self.car_petrol,
            TransportMode::CarDiesel => self.car_diesel,
            TransportMode::CarElectric => self.car_electric,
            TransportMode::Bus => self.bus,
            TransportMode::Train => self.train,
            TransportMode::Bike => self.bike,
            TransportMode::Walk => self.walk,
            TransportMode::Other(_) => self.fallback,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("car_petrol", self.car_petrol),
            ("car_diesel", self.car_diesel),
            ("car_electric", self.car_electric),
            ("bus", self.bus),
            ("train", self.train),
            ("bike", self.bike),
            ("walk", self.walk),
            ("fallback", self.fallback),
        ]
    }
}

/// kg CO2 per kWh, by energy source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyFactors {
    pub grid: f64,
    pub solar: f64,
    pub hybrid: f64,
    pub fallback: f64,
}

impl Default for EnergyFactors {
    fn default() -> Self {
        Self {
            grid: 0.5,
            solar: 0.0,
            hybrid: 0.2,
            fallback: 0.5,
        }
    }
}

impl EnergyFactors {
    pub fn factor(&self, source: &EnergySource) -> f64 {
        match source {
            EnergySource::Grid => self.grid,
            EnergySource::Solar => self.solar,
            EnergySource::Hybrid => self.hybrid,
            EnergySource::Other(_) => self.fallback,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("grid", self.grid),
            ("solar", self.solar),
            ("hybrid", self.hybrid),
            ("fallback", self.fallback),
        ]
    }
}

/// Flat daily kg CO2 offset per diet.
///
/// `pescatarian` is optional: a table without it charges pescatarians the
/// fallback value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietFactors {
    pub omnivore: f64,
    pub vegetarian: f64,
    pub vegan: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pescatarian: Option<f64>,
    pub fallback: f64,
}

impl Default for DietFactors {
    fn default() -> Self {
        Self {
            omnivore: 2.5,
            vegetarian: 1.5,
            vegan: 1.0,
            pescatarian: Some(1.8),
            fallback: 2.0,
        }
    }
}

impl DietFactors {
    pub fn factor(&self, diet: &DietType) -> f64 {
        match diet {
            DietType::Omnivore => self.omnivore,
            DietType::Vegetarian => self.vegetarian,
            DietType::Vegan => self.vegan,
            DietType::Pescatarian => self.pescatarian.unwrap_or(self.fallback),
            DietType::Other(_) => self.fallback,
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let mut entries = vec![
            ("omnivore", self.omnivore),
            ("vegetarian", self.vegetarian),
            ("vegan", self.vegan),
        ];
        if let Some(pescatarian) = self.pescatarian {
            entries.push(("pescatarian", pescatarian));
        }
        entries.push(("fallback", self.fallback));
        entries
    }
}

/// The per-category factor tables used by the emission estimator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    pub transport: TransportFactors,
    pub energy: EnergyFactors,
    pub diet: DietFactors,
}

/// Additive discount fractions earned by each habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitDiscountTable {
    pub recycle: f64,
    pub reusable_bags: f64,
    pub avoid_plastic: f64,
    pub compost: f64,
}

impl Default for HabitDiscountTable {
    fn default() -> Self {
        Self {
            recycle: 0.1,
            reusable_bags: 0.05,
            avoid_plastic: 0.1,
            compost: 0.05,
        }
    }
}

impl HabitDiscountTable {
    pub fn discount(&self, habit: &Habit) -> f64 {
        match habit {
            Habit::Recycle => self.recycle,
            Habit::ReusableBags => self.reusable_bags,
            Habit::AvoidPlastic => self.avoid_plastic,
            Habit::Compost => self.compost,
            Habit::Other(_) => 0.0,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("recycle", self.recycle),
            ("reusable_bags", self.reusable_bags),
            ("avoid_plastic", self.avoid_plastic),
            ("compost", self.compost),
        ]
    }

    /// Discount earned when every known habit is present.
    pub fn max_total(&self) -> f64 {
        self.entries().iter().map(|(_, d)| d).sum()
    }
}

/// The breakdown chart's diet table. It has no pescatarian entry, so
/// pescatarians are charged the fallback value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownDietFactors {
    pub omnivore: f64,
    pub vegetarian: f64,
    pub vegan: f64,
    pub fallback: f64,
}

impl Default for BreakdownDietFactors {
    fn default() -> Self {
        Self {
            omnivore: 2.5,
            vegetarian: 1.5,
            vegan: 1.0,
            fallback: 2.0,
        }
    }
}

impl BreakdownDietFactors {
    pub fn factor(&self, diet: &DietType) -> f64 {
        match diet {
            DietType::Omnivore => self.omnivore,
            DietType::Vegetarian => self.vegetarian,
            DietType::Vegan => self.vegan,
            DietType::Pescatarian | DietType::Other(_) => self.fallback,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("omnivore", self.omnivore),
            ("vegetarian", self.vegetarian),
            ("vegan", self.vegan),
            ("fallback", self.fallback),
        ]
    }
}

/// Factors behind the daily breakdown pie chart. These are fixed per deployment
/// and intentionally separate from [`EmissionFactors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownFactors {
    pub travel_per_km: f64,
    pub energy_per_kwh: f64,
    pub diet: BreakdownDietFactors,
}

impl Default for BreakdownFactors {
    fn default() -> Self {
        Self {
            travel_per_km: 0.21,
            energy_per_kwh: 0.5,
            diet: BreakdownDietFactors::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_branches_use_documented_defaults() {
        let factors = EmissionFactors::default();
        assert_eq!(factors.transport.factor(&TransportMode::from("rocket")), 0.2);
        assert_eq!(factors.energy.factor(&EnergySource::from("coal")), 0.5);
        assert_eq!(factors.diet.factor(&DietType::from("fruitarian")), 2.0);
    }

    #[test]
    fn breakdown_diet_table_has_no_pescatarian_entry() {
        let estimator_diet = DietFactors::default();
        let breakdown_diet = BreakdownFactors::default().diet;
        assert_eq!(estimator_diet.factor(&DietType::Pescatarian), 1.8);
        assert_eq!(breakdown_diet.factor(&DietType::Pescatarian), 2.0);
        assert_eq!(breakdown_diet.factor(&DietType::Vegan), 1.0);
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let factors: EmissionFactors = serde_yaml::from_str("transport:\n  bus: 0.08\n").unwrap();
        assert_eq!(factors.transport.bus, 0.08);
        assert_eq!(factors.transport.car_petrol, 0.21);
        assert_eq!(factors.diet, DietFactors::default());
    }

    #[test]
    fn partial_breakdown_diet_override_stays_without_pescatarian() {
        let factors: BreakdownFactors = serde_yaml::from_str("diet:\n  vegan: 1.1\n").unwrap();
        assert_eq!(factors.diet.vegan, 1.1);
        assert_eq!(factors.diet.omnivore, 2.5);
        assert_eq!(factors.diet.factor(&DietType::Pescatarian), 2.0);
        assert_eq!(factors.travel_per_km, 0.21);
    }

    #[test]
    fn pescatarian_key_is_ignored_by_the_breakdown_table() {
        let factors: BreakdownFactors =
            serde_yaml::from_str("diet:\n  pescatarian: 1.8\n  fallback: 2.2\n").unwrap();
        assert_eq!(factors.diet.factor(&DietType::Pescatarian), 2.2);
    }

    #[test]
    fn unknown_habits_earn_nothing() {
        let table = HabitDiscountTable::default();
        assert_eq!(table.discount(&Habit::from("carpool")), 0.0);
        assert!((table.max_total() - 0.3).abs() < 1e-12);
    }
}
