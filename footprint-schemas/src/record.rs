use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated row of the historical carbon dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub date: NaiveDate,
    pub daily_carbon: f64,
    pub yearly_carbon: f64,
}
