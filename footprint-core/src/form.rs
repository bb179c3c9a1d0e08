//! Conversion between raw submitted fields and `UserInput`.

use crate::error::InputError;
use footprint_schemas::input::{DietType, EnergySource, Habit, TransportMode, UserInput};
use serde::{Deserialize, Serialize};

/// The lifestyle form exactly as submitted: every field is still text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub daily_travel: String,
    pub transport_mode: String,
    pub energy_usage: String,
    pub energy_source: String,
    pub diet_type: String,
    #[serde(default)]
    pub habits: Vec<String>,
}

impl Default for FormSubmission {
    /// Values assumed by the analysis page when a query parameter is absent.
    fn default() -> Self {
        Self {
            daily_travel: "0".to_string(),
            transport_mode: "car_petrol".to_string(),
            energy_usage: "0".to_string(),
            energy_source: "grid".to_string(),
            diet_type: "omnivore".to_string(),
            habits: Vec::new(),
        }
    }
}

impl FormSubmission {
    /// Parses the numeric fields and classifies the categorical ones.
    pub fn parse(&self) -> Result<UserInput, InputError> {
        Ok(UserInput {
            daily_travel: parse_amount("daily_travel", &self.daily_travel)?,
            transport_mode: TransportMode::from(self.transport_mode.trim()),
            energy_usage: parse_amount("energy_usage", &self.energy_usage)?,
            energy_source: EnergySource::from(self.energy_source.trim()),
            diet_type: DietType::from(self.diet_type.trim()),
            habits: self
                .habits
                .iter()
                .map(|h| h.trim())
                .filter(|h| !h.is_empty())
                .map(Habit::from)
                .collect(),
        })
    }

    /// Reads an analysis query string such as
    /// `daily_travel=10&transport_mode=bus&habits=recycle,compost`.
    ///
    /// Missing keys keep their [`Default`] value and unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, InputError> {
        let mut form = FormSubmission::default();
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key)?;
            let value = decode_component(value)?;
            match key.as_str() {
                "daily_travel" => form.daily_travel = value,
                "transport_mode" => form.transport_mode = value,
                "energy_usage" => form.energy_usage = value,
                "energy_source" => form.energy_source = value,
                "diet_type" => form.diet_type = value,
                "habits" => form.habits = value.split(',').map(str::to_string).collect(),
                "habit" => form.habits.push(value),
                _ => {}
            }
        }
        Ok(form)
    }

    /// Encodes the submission as the analysis-page query string, habits
    /// comma-joined.
    pub fn to_query(&self) -> String {
        let habits = self.habits.join(",");
        [
            ("daily_travel", self.daily_travel.as_str()),
            ("transport_mode", self.transport_mode.as_str()),
            ("energy_usage", self.energy_usage.as_str()),
            ("energy_source", self.energy_source.as_str()),
            ("diet_type", self.diet_type.as_str()),
            ("habits", habits.as_str()),
        ]
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

fn decode_component(raw: &str) -> Result<String, InputError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|e| InputError::MalformedQuery(format!("'{}': {}", raw, e)))
}

fn parse_amount(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let value: f64 = raw.trim().parse().map_err(|_| InputError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(InputError::OutOfRange { field, value });
    }
    Ok(value)
}
