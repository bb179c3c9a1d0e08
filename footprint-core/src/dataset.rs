//! Loader for the static historical carbon dataset.

use crate::error::LoadError;
use chrono::{NaiveDate, NaiveDateTime};
use footprint_schemas::record::HistoricalRecord;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::info;

const DATE_COLUMN: &str = "date";
const DAILY_COLUMN: &str = "daily_carbon";
const YEARLY_COLUMN: &str = "yearly_carbon";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Historical rows in source-file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalTable {
    pub records: Vec<HistoricalRecord>,
}

impl HistoricalTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` rows, or every row when fewer exist.
    pub fn head(&self, n: usize) -> &[HistoricalRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

/// Reads the dataset at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<HistoricalTable, LoadError> {
    let origin = path.as_ref().display().to_string();
    let file = fs::File::open(path.as_ref()).map_err(|e| LoadError::Io(origin.clone(), e))?;
    load_from_reader(file, &origin)
}

/// Reads a dataset from any byte source. `origin` names the source in errors.
pub fn load_from_reader<R: Read>(mut reader: R, origin: &str) -> Result<HistoricalTable, LoadError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| LoadError::Io(origin.to_string(), e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = csv_reader
        .headers()
        .map_err(|e| LoadError::Csv(origin.to_string(), e))?
        .clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                origin: origin.to_string(),
                column: name,
            })
    };
    let date_idx = column(DATE_COLUMN)?;
    let daily_idx = column(DAILY_COLUMN)?;
    let yearly_idx = column(YEARLY_COLUMN)?;

    let mut records = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| LoadError::Csv(origin.to_string(), e))?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let raw_date = field(date_idx);
        let date = parse_date(raw_date).ok_or_else(|| LoadError::InvalidDate {
            origin: origin.to_string(),
            row,
            value: raw_date.to_string(),
        })?;
        let number = |idx: usize, column: &'static str| {
            field(idx).parse::<f64>().map_err(|_| LoadError::InvalidNumber {
                origin: origin.to_string(),
                row,
                column,
                value: field(idx).to_string(),
            })
        };

        records.push(HistoricalRecord {
            date,
            daily_carbon: number(daily_idx, DAILY_COLUMN)?,
            yearly_carbon: number(yearly_idx, YEARLY_COLUMN)?,
        });
    }

    info!(origin, rows = records.len(), "historical dataset loaded");
    Ok(HistoricalTable { records })
}

/// Parses an ISO-style date, dropping any time-of-day part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reads_rows_in_file_order() {
        let csv = "date,daily_carbon,yearly_carbon\n2024-01-03,4.5,1600\n2024-01-01,5.0,1650.5\n";
        let table = load_from_reader(csv.as_bytes(), "inline").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].date, ymd(2024, 1, 3));
        assert_eq!(table.records[1].yearly_carbon, 1650.5);
    }

    #[test]
    fn tolerates_a_byte_order_mark_and_extra_columns() {
        let csv = "\u{feff}yearly_carbon,note,date,daily_carbon\n1500,hi,2024/02/01,3.25\n";
        let table = load_from_reader(csv.as_bytes(), "inline").unwrap();
        assert_eq!(table.records[0].date, ymd(2024, 2, 1));
        assert_eq!(table.records[0].daily_carbon, 3.25);
        assert_eq!(table.records[0].yearly_carbon, 1500.0);
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let table = load_from_reader("date,daily_carbon,yearly_carbon\n".as_bytes(), "inline").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn missing_column_is_reported() {
        let err = load_from_reader("date,daily_carbon\n2024-01-01,1\n".as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "yearly_carbon", .. }));
    }

    #[test]
    fn bad_date_names_the_row() {
        let csv = "date,daily_carbon,yearly_carbon\n2024-01-01,1,2\nyesterday,1,2\n";
        let err = load_from_reader(csv.as_bytes(), "inline").unwrap_err();
        match err {
            LoadError::InvalidDate { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_value_is_reported() {
        let csv = "date,daily_carbon,yearly_carbon\n2024-01-01,lots,2\n";
        let err = load_from_reader(csv.as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { column: "daily_carbon", row: 1, .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(..)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,daily_carbon,yearly_carbon").unwrap();
        writeln!(file, "2024-03-01 08:30:00,2.0,900").unwrap();
        let table = load(file.path()).unwrap();
        assert_eq!(table.records[0].date, ymd(2024, 3, 1));
    }

    #[test]
    fn head_clamps_to_available_rows() {
        let csv = "date,daily_carbon,yearly_carbon\n2024-01-01,1,1\n2024-01-02,1,1\n";
        let table = load_from_reader(csv.as_bytes(), "inline").unwrap();
        assert_eq!(table.head(7).len(), 2);
        assert_eq!(table.head(1).len(), 1);
    }

    #[test]
    fn parses_us_style_dates() {
        assert_eq!(parse_date("03/15/2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date("2024-03-15T23:59:59"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date("15.03.2024"), None);
    }
}
