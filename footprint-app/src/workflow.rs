use crate::config::AppConfig;
use crate::plotting::{self, RenderedChart};
use anyhow::{Context, Result};
use footprint_core::{
    aggregation::{self, BreakdownInput},
    dataset,
    error::FootprintError,
    estimator::{self, EmissionScore},
    form::FormSubmission,
    insight::Insight,
};
use footprint_schemas::{
    input::{DietType, UserInput},
    view::{AggregatedView, ViewKind},
};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};
use tracing::info;

/// Score page output for one submission.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub input: UserInput,
    pub score: EmissionScore,
    pub insight: Insight,
}

/// Parses a submitted form and scores it.
pub fn run_analysis(config: &AppConfig, form: &FormSubmission) -> Result<AnalysisOutput, FootprintError> {
    let input = form.parse()?;
    let score = estimator::estimate(&input, &config.emission_factors, &config.habit_discounts);
    let insight = Insight::for_score(score.rounded());

    info!(
        transport = %input.transport_mode,
        energy = %input.energy_source,
        diet = %input.diet_type,
        habits = input.habits.len(),
        score = score.rounded(),
        "emission score computed"
    );
    Ok(AnalysisOutput { input, score, insight })
}

/// What the results page is asked to draw: the already-computed score plus the
/// answers the daily breakdown needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRequest {
    pub carbon: f64,
    pub daily_travel: f64,
    pub energy_usage: f64,
    pub diet_type: DietType,
}

impl From<&AnalysisOutput> for ResultRequest {
    fn from(analysis: &AnalysisOutput) -> Self {
        Self {
            carbon: analysis.score.rounded(),
            daily_travel: analysis.input.daily_travel,
            energy_usage: analysis.input.energy_usage,
            diet_type: analysis.input.diet_type.clone(),
        }
    }
}

/// Everything the results page shows.
#[derive(Debug, Clone)]
pub struct ResultReport {
    pub carbon: f64,
    pub insight: Insight,
    pub views: Vec<AggregatedView>,
    pub charts: BTreeMap<ViewKind, RenderedChart>,
}

/// Loads the historical dataset, builds the four views and renders them.
/// Any failure aborts the whole report.
pub fn run_result(config: &AppConfig, request: &ResultRequest) -> Result<ResultReport, FootprintError> {
    info!(dataset = %config.dataset_path.display(), "building results report");
    let table = dataset::load(&config.dataset_path)?;

    let breakdown_input = BreakdownInput {
        daily_travel: request.daily_travel,
        energy_usage: request.energy_usage,
        diet_type: request.diet_type.clone(),
    };

    let mut views = Vec::with_capacity(ViewKind::ALL.len());
    let mut charts = BTreeMap::new();
    for kind in ViewKind::ALL {
        let view = aggregation::aggregate(
            &table,
            kind,
            &breakdown_input,
            &config.breakdown_factors,
            config.window_policy,
        );
        let chart = plotting::render(&view, &config.render)?;
        info!(chart = %kind, points = view.len(), bytes = chart.png.len(), "chart rendered");
        charts.insert(kind, chart);
        views.push(view);
    }

    Ok(ResultReport {
        carbon: request.carbon,
        insight: Insight::for_score(request.carbon),
        views,
        charts,
    })
}

#[derive(Serialize)]
struct ReportFile<'a> {
    carbon: f64,
    insight: Insight,
    insight_message: &'static str,
    score: Option<&'a EmissionScore>,
    graphs: BTreeMap<&'static str, String>,
}

/// Writes the rendered charts, the aggregated series and a JSON summary with
/// base64-encoded images into a new timestamped directory under `output_root`.
pub fn write_report(
    output_root: &Path,
    report: &ResultReport,
    score: Option<&EmissionScore>,
) -> Result<PathBuf> {
    let run_dir = output_root.join(format!(
        "Footprint_{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", run_dir))?;

    for chart in report.charts.values() {
        let path = run_dir.join(format!("{}.png", chart.kind));
        fs::write(&path, &chart.png).with_context(|| format!("Failed to write {:?}", path))?;
    }

    write_series_csv(&run_dir.join("series.csv"), &report.views)?;

    let summary = ReportFile {
        carbon: report.carbon,
        insight: report.insight,
        insight_message: report.insight.message(),
        score,
        graphs: report
            .charts
            .values()
            .map(|c| (c.kind.as_str(), c.to_base64()))
            .collect(),
    };
    let json_path = run_dir.join("report.json");
    fs::write(&json_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("Failed to write {:?}", json_path))?;

    info!(dir = %run_dir.display(), "report written");
    Ok(run_dir)
}

/// One row per plotted value: `view,period,value`.
fn write_series_csv(path: &Path, views: &[AggregatedView]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    writer.write_record(["view", "period", "value"])?;

    for view in views {
        let kind = view.kind().as_str();
        match view {
            AggregatedView::DailyBreakdown(breakdown) => {
                for slice in &breakdown.slices {
                    let value = slice.value.to_string();
                    writer.write_record([kind, slice.label.as_str(), value.as_str()])?;
                }
            }
            AggregatedView::WeeklySeries { points } | AggregatedView::MonthlySeries { points } => {
                for point in points {
                    let (date, value) = (point.date.to_string(), point.value.to_string());
                    writer.write_record([kind, date.as_str(), value.as_str()])?;
                }
            }
            AggregatedView::YearlyMonthlyMean { months } => {
                for month in months {
                    let period = format!("{}-{:02}", month.year, month.month);
                    let value = month.mean.to_string();
                    writer.write_record([kind, period.as_str(), value.as_str()])?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::error::{InputError, LoadError, RenderError};
    use std::io::Write;

    fn form() -> FormSubmission {
        FormSubmission {
            daily_travel: "10".into(),
            transport_mode: "car_petrol".into(),
            energy_usage: "20".into(),
            energy_source: "grid".into(),
            diet_type: "vegan".into(),
            habits: vec!["recycle".into()],
        }
    }

    fn headless_config(dataset: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.dataset_path = dataset.to_path_buf();
        config.render.draw_text = false;
        config
    }

    fn dataset_file(rows: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\u{feff}date,daily_carbon,yearly_carbon").unwrap();
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for i in 0..rows {
            let date = start + chrono::Duration::days(i as i64);
            writeln!(file, "{},{},{}", date, 4.0 + (i % 5) as f64, 1400.0 + i as f64).unwrap();
        }
        file
    }

    #[test]
    fn analysis_scores_the_worked_example() {
        let output = run_analysis(&AppConfig::default(), &form()).unwrap();
        assert_eq!(output.score.rounded(), 11.79);
        assert_eq!(output.insight, Insight::High);
    }

    #[test]
    fn analysis_rejects_non_numeric_energy() {
        let bad = FormSubmission {
            energy_usage: "a lot".into(),
            ..form()
        };
        let err = run_analysis(&AppConfig::default(), &bad).unwrap_err();
        assert!(matches!(err, FootprintError::Input(InputError::NotANumber { .. })));
    }

    #[test]
    fn result_report_renders_all_four_charts() {
        let file = dataset_file(60);
        let config = headless_config(file.path());
        let analysis = run_analysis(&config, &form()).unwrap();
        let report = run_result(&config, &ResultRequest::from(&analysis)).unwrap();

        assert_eq!(report.charts.len(), 4);
        assert_eq!(report.views.len(), 4);
        assert_eq!(report.insight, Insight::High);
        assert_eq!(report.views[1].len(), 7);
        assert_eq!(report.views[2].len(), 30);
        assert_eq!(report.views[3].len(), 2);
    }

    #[test]
    fn missing_dataset_aborts_with_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = headless_config(&dir.path().join("missing.csv"));
        let request = ResultRequest {
            carbon: 3.0,
            daily_travel: 1.0,
            energy_usage: 1.0,
            diet_type: DietType::Vegan,
        };
        let err = run_result(&config, &request).unwrap_err();
        assert!(matches!(err, FootprintError::Load(LoadError::Io(..))));
    }

    #[test]
    fn empty_dataset_aborts_with_render_error() {
        let file = dataset_file(0);
        let config = headless_config(file.path());
        let request = ResultRequest {
            carbon: 3.0,
            daily_travel: 1.0,
            energy_usage: 1.0,
            diet_type: DietType::Vegan,
        };
        let err = run_result(&config, &request).unwrap_err();
        assert!(matches!(err, FootprintError::Render(RenderError::EmptySeries(ViewKind::Weekly))));
    }

    #[test]
    fn report_directory_holds_images_series_and_summary() {
        let file = dataset_file(10);
        let config = headless_config(file.path());
        let analysis = run_analysis(&config, &form()).unwrap();
        let report = run_result(&config, &ResultRequest::from(&analysis)).unwrap();

        let out = tempfile::tempdir().unwrap();
        let run_dir = write_report(out.path(), &report, Some(&analysis.score)).unwrap();

        for name in ["daily.png", "weekly.png", "monthly.png", "yearly.png", "series.csv"] {
            assert!(run_dir.join(name).is_file(), "{} missing", name);
        }
        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(run_dir.join("report.json")).unwrap()).unwrap();
        assert_eq!(summary["carbon"], 11.79);
        assert_eq!(summary["insight"], "high");
        assert!(summary["graphs"]["yearly"].as_str().unwrap().len() > 100);

        let mut series = csv::Reader::from_path(run_dir.join("series.csv")).unwrap();
        // 3 slices + 7 weekly + 10 monthly + 1 month
        assert_eq!(series.records().count(), 21);
    }
}
