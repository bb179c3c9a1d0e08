use crate::plotting::{parse_hex_color, RenderStyle, SeriesStyle};
use anyhow::{Context, Result};
use footprint_core::{error::ConfigError, validation};
use footprint_schemas::{
    factors::{BreakdownFactors, EmissionFactors, HabitDiscountTable},
    view::WindowPolicy,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::info;

pub const SCHEMA_VERSION: &str = "1";

/// Everything fixed for the lifetime of the process: factor tables, dataset
/// location and chart styling. Built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub schema_version: String,
    pub dataset_path: PathBuf,
    pub output_dir: PathBuf,
    pub window_policy: WindowPolicy,
    pub emission_factors: EmissionFactors,
    pub habit_discounts: HabitDiscountTable,
    pub breakdown_factors: BreakdownFactors,
    pub render: RenderStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            dataset_path: PathBuf::from("data/carbon_data.csv"),
            output_dir: PathBuf::from("data/runs"),
            window_policy: WindowPolicy::default(),
            emission_factors: EmissionFactors::default(),
            habit_discounts: HabitDiscountTable::default(),
            breakdown_factors: BreakdownFactors::default(),
            render: RenderStyle::default(),
        }
    }
}

impl AppConfig {
    /// Loads and validates the YAML configuration at `path`. Sections left out
    /// of the file keep their built-in values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {:?}", path))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?;

        info!(
            dataset = %config.dataset_path.display(),
            window_policy = ?config.window_policy,
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ConfigError::Invalid(format!(
                "unsupported schema_version '{}', expected '{}'",
                self.schema_version, SCHEMA_VERSION
            )));
        }
        validation::validate_emission_factors(&self.emission_factors)?;
        validation::validate_habit_discounts(&self.habit_discounts)?;
        validation::validate_breakdown_factors(&self.breakdown_factors)?;
        self.validate_render()
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        let pie = &self.render.pie;
        if pie.width == 0 || pie.height == 0 {
            return Err(ConfigError::Invalid("render.pie size must be non-zero".into()));
        }
        if let Some(bad) = pie.colors.iter().find(|c| parse_hex_color(c).is_none()) {
            return Err(ConfigError::Invalid(format!("render.pie color '{}' is not #RRGGBB", bad)));
        }
        if pie.explode.iter().any(|e| !e.is_finite() || *e < 0.0) {
            return Err(ConfigError::Invalid("render.pie explode offsets must be non-negative".into()));
        }

        let series: [(&str, &SeriesStyle); 3] = [
            ("weekly", &self.render.weekly),
            ("monthly", &self.render.monthly),
            ("yearly", &self.render.yearly),
        ];
        for (name, style) in series {
            if style.width == 0 || style.height == 0 {
                return Err(ConfigError::Invalid(format!("render.{} size must be non-zero", name)));
            }
            if style.tick_interval == 0 {
                return Err(ConfigError::Invalid(format!(
                    "render.{} tick_interval must be at least 1",
                    name
                )));
            }
            if parse_hex_color(&style.color).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "render.{} color '{}' is not #RRGGBB",
                    name, style.color
                )));
            }
        }
        Ok(())
    }
}
