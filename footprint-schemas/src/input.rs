use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How the user covers their daily travel distance.
///
/// Values that do not match a known mode are kept verbatim in `Other` and are
/// charged the fallback transport factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportMode {
    CarPetrol,
    CarDiesel,
    CarElectric,
    Bus,
    Train,
    Bike,
    Walk,
    Other(String),
}

impl TransportMode {
    pub fn as_str(&self) -> &str {
        match self {
            TransportMode::CarPetrol => "car_petrol",
            TransportMode::CarDiesel => "car_diesel",
            TransportMode::CarElectric => "car_electric",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Bike => "bike",
            TransportMode::Walk => "walk",
            TransportMode::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TransportMode::Other(_))
    }
}

impl From<&str> for TransportMode {
    fn from(value: &str) -> Self {
        match value {
            "car_petrol" => TransportMode::CarPetrol,
            "car_diesel" => TransportMode::CarDiesel,
            "car_electric" => TransportMode::CarElectric,
            "bus" => TransportMode::Bus,
            "train" => TransportMode::Train,
            "bike" => TransportMode::Bike,
            "walk" => TransportMode::Walk,
            other => TransportMode::Other(other.to_string()),
        }
    }
}

impl From<String> for TransportMode {
    fn from(value: String) -> Self {
        TransportMode::from(value.as_str())
    }
}

impl From<TransportMode> for String {
    fn from(value: TransportMode) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the household's electricity comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnergySource {
    Grid,
    Solar,
    Hybrid,
    Other(String),
}

impl EnergySource {
    pub fn as_str(&self) -> &str {
        match self {
            EnergySource::Grid => "grid",
            EnergySource::Solar => "solar",
            EnergySource::Hybrid => "hybrid",
            EnergySource::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, EnergySource::Other(_))
    }
}

impl From<&str> for EnergySource {
    fn from(value: &str) -> Self {
        match value {
            "grid" => EnergySource::Grid,
            "solar" => EnergySource::Solar,
            "hybrid" => EnergySource::Hybrid,
            other => EnergySource::Other(other.to_string()),
        }
    }
}

impl From<String> for EnergySource {
    fn from(value: String) -> Self {
        EnergySource::from(value.as_str())
    }
}

impl From<EnergySource> for String {
    fn from(value: EnergySource) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietType {
    Omnivore,
    Vegetarian,
    Vegan,
    Pescatarian,
    Other(String),
}

impl DietType {
    pub fn as_str(&self) -> &str {
        match self {
            DietType::Omnivore => "omnivore",
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
            DietType::Pescatarian => "pescatarian",
            DietType::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, DietType::Other(_))
    }
}

impl From<&str> for DietType {
    fn from(value: &str) -> Self {
        match value {
            "omnivore" => DietType::Omnivore,
            "vegetarian" => DietType::Vegetarian,
            "vegan" => DietType::Vegan,
            "pescatarian" => DietType::Pescatarian,
            other => DietType::Other(other.to_string()),
        }
    }
}

impl From<String> for DietType {
    fn from(value: String) -> Self {
        DietType::from(value.as_str())
    }
}

impl From<DietType> for String {
    fn from(value: DietType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifestyle habit that earns a discount on the final score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Habit {
    Recycle,
    ReusableBags,
    AvoidPlastic,
    Compost,
    Other(String),
}

impl Habit {
    pub fn as_str(&self) -> &str {
        match self {
            Habit::Recycle => "recycle",
            Habit::ReusableBags => "reusable_bags",
            Habit::AvoidPlastic => "avoid_plastic",
            Habit::Compost => "compost",
            Habit::Other(raw) => raw,
        }
    }
}

impl From<&str> for Habit {
    fn from(value: &str) -> Self {
        match value {
            "recycle" => Habit::Recycle,
            "reusable_bags" => Habit::ReusableBags,
            "avoid_plastic" => Habit::AvoidPlastic,
            "compost" => Habit::Compost,
            other => Habit::Other(other.to_string()),
        }
    }
}

impl From<String> for Habit {
    fn from(value: String) -> Self {
        Habit::from(value.as_str())
    }
}

impl From<Habit> for String {
    fn from(value: Habit) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted set of lifestyle answers. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    /// Kilometres travelled per day.
    pub daily_travel: f64,
    pub transport_mode: TransportMode,
    /// Household energy use in kWh per day.
    pub energy_usage: f64,
    pub energy_source: EnergySource,
    pub diet_type: DietType,
    #[serde(default)]
    pub habits: BTreeSet<Habit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_values_are_kept_in_the_fallback_branch() {
        assert_eq!(TransportMode::from("rocket"), TransportMode::Other("rocket".to_string()));
        assert_eq!(EnergySource::from("wind"), EnergySource::Other("wind".to_string()));
        assert_eq!(DietType::from("carnivore"), DietType::Other("carnivore".to_string()));
        assert_eq!(Habit::from(""), Habit::Other(String::new()));
        assert!(!TransportMode::from("rocket").is_recognized());
        assert!(DietType::Pescatarian.is_recognized());
    }

    #[test]
    fn names_round_trip_through_strings() {
        for name in ["car_petrol", "car_diesel", "car_electric", "bus", "train", "bike", "walk"] {
            assert_eq!(TransportMode::from(name).as_str(), name);
        }
        assert_eq!(String::from(Habit::ReusableBags), "reusable_bags");
        assert_eq!(EnergySource::Hybrid.to_string(), "hybrid");
    }

    #[test]
    fn user_input_deserializes_from_yaml() {
        let yaml = r#"
daily_travel: 12.5
transport_mode: bus
energy_usage: 8
energy_source: solar
diet_type: vegan
habits: [compost, recycle, compost]
"#;
        let input: UserInput = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(input.transport_mode, TransportMode::Bus);
        assert_eq!(input.energy_source, EnergySource::Solar);
        assert_eq!(input.habits.len(), 2);
        assert!(input.habits.contains(&Habit::Compost));
    }
}
