use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four chart views produced for the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Daily,
        ViewKind::Weekly,
        ViewKind::Monthly,
        ViewKind::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Daily => "daily",
            ViewKind::Weekly => "weekly",
            ViewKind::Monthly => "monthly",
            ViewKind::Yearly => "yearly",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How head-N windows pick their rows from the historical table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// First N rows exactly as they appear in the source file.
    #[default]
    FileOrder,
    /// First N rows after a stable sort by date, ascending.
    SortedByDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    pub label: String,
    pub value: f64,
}

/// Travel / Energy / Diet split of a single point-in-time estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    pub slices: Vec<BreakdownSlice>,
}

impl DailyBreakdown {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Mean `yearly_carbon` of every row falling in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMean {
    pub year: i32,
    pub month: u32,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregatedView {
    DailyBreakdown(DailyBreakdown),
    WeeklySeries { points: Vec<SeriesPoint> },
    MonthlySeries { points: Vec<SeriesPoint> },
    YearlyMonthlyMean { months: Vec<MonthlyMean> },
}

impl AggregatedView {
    pub fn kind(&self) -> ViewKind {
        match self {
            AggregatedView::DailyBreakdown(_) => ViewKind::Daily,
            AggregatedView::WeeklySeries { .. } => ViewKind::Weekly,
            AggregatedView::MonthlySeries { .. } => ViewKind::Monthly,
            AggregatedView::YearlyMonthlyMean { .. } => ViewKind::Yearly,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AggregatedView::DailyBreakdown(b) => b.slices.len(),
            AggregatedView::WeeklySeries { points } | AggregatedView::MonthlySeries { points } => {
                points.len()
            }
            AggregatedView::YearlyMonthlyMean { months } => months.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
