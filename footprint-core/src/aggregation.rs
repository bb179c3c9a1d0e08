use crate::dataset::HistoricalTable;
use chrono::Datelike;
use footprint_schemas::{
    factors::BreakdownFactors,
    input::DietType,
    record::HistoricalRecord,
    view::{
        AggregatedView, BreakdownSlice, DailyBreakdown, MonthlyMean, SeriesPoint, ViewKind,
        WindowPolicy,
    },
};
use std::borrow::Cow;
use std::collections::BTreeMap;

pub const WEEKLY_WINDOW: usize = 7;
pub const MONTHLY_WINDOW: usize = 30;

/// Answers needed by the daily breakdown; the historical views ignore them.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownInput {
    pub daily_travel: f64,
    pub energy_usage: f64,
    pub diet_type: DietType,
}

/// Travel / Energy / Diet values for the pie chart, using the breakdown table
/// rather than the estimator's factors.
pub fn daily_breakdown(input: &BreakdownInput, factors: &BreakdownFactors) -> DailyBreakdown {
    DailyBreakdown {
        slices: vec![
            BreakdownSlice {
                label: "Travel".to_string(),
                value: input.daily_travel * factors.travel_per_km,
            },
            BreakdownSlice {
                label: "Energy".to_string(),
                value: input.energy_usage * factors.energy_per_kwh,
            },
            BreakdownSlice {
                label: "Diet".to_string(),
                value: factors.diet.factor(&input.diet_type),
            },
        ],
    }
}

fn windowed(table: &HistoricalTable, policy: WindowPolicy) -> Cow<'_, [HistoricalRecord]> {
    match policy {
        WindowPolicy::FileOrder => Cow::Borrowed(table.records.as_slice()),
        WindowPolicy::SortedByDate => {
            let mut sorted = table.records.clone();
            sorted.sort_by_key(|r| r.date);
            Cow::Owned(sorted)
        }
    }
}

fn head_series(table: &HistoricalTable, n: usize, policy: WindowPolicy) -> Vec<SeriesPoint> {
    windowed(table, policy)
        .iter()
        .take(n)
        .map(|r| SeriesPoint {
            date: r.date,
            value: r.daily_carbon,
        })
        .collect()
}

/// `daily_carbon` of the first seven rows.
pub fn weekly_series(table: &HistoricalTable, policy: WindowPolicy) -> Vec<SeriesPoint> {
    head_series(table, WEEKLY_WINDOW, policy)
}

/// `daily_carbon` of the first thirty rows.
pub fn monthly_series(table: &HistoricalTable, policy: WindowPolicy) -> Vec<SeriesPoint> {
    head_series(table, MONTHLY_WINDOW, policy)
}

/// Mean `yearly_carbon` per calendar month, oldest month first. Months without
/// rows are left out.
pub fn yearly_monthly_mean(table: &HistoricalTable) -> Vec<MonthlyMean> {
    let mut groups: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for record in &table.records {
        let entry = groups
            .entry((record.date.year(), record.date.month()))
            .or_insert((0.0, 0));
        entry.0 += record.yearly_carbon;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((year, month), (sum, count))| MonthlyMean {
            year,
            month,
            mean: sum / count as f64,
            count,
        })
        .collect()
}

/// Builds the view of the requested kind.
pub fn aggregate(
    table: &HistoricalTable,
    kind: ViewKind,
    input: &BreakdownInput,
    factors: &BreakdownFactors,
    policy: WindowPolicy,
) -> AggregatedView {
    match kind {
        ViewKind::Daily => AggregatedView::DailyBreakdown(daily_breakdown(input, factors)),
        ViewKind::Weekly => AggregatedView::WeeklySeries {
            points: weekly_series(table, policy),
        },
        ViewKind::Monthly => AggregatedView::MonthlySeries {
            points: monthly_series(table, policy),
        },
        ViewKind::Yearly => AggregatedView::YearlyMonthlyMean {
            months: yearly_monthly_mean(table),
        },
    }
}
