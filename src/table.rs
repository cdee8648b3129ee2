//! CSV loading for the World Bank GDP export.
//!
//! The file has a header row; one column names the country and every year has its
//! own column. Cells are kept as strings: deciding what counts as a number is left to
//! the consumers.

use crate::config::GdpInfo;
use crate::error::{GdpError, Result};
use crate::metrics::LoadMetrics;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// One CSV row: header name -> cell text
pub type GdpRow = HashMap<String, String>;

/// Every row of a CSV file, in file order
#[derive(Debug, Clone)]
pub struct CsvRows {
    pub headers: Vec<String>,
    pub rows: Vec<GdpRow>,
}

impl CsvRows {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Fail with `MissingColumn` unless the header row contains `column`
    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(GdpError::MissingColumn(column.to_string()))
        }
    }
}

/// Rows keyed by the value of one column
#[derive(Debug, Clone, Default)]
pub struct GdpTable {
    pub headers: Vec<String>,
    pub rows: HashMap<String, GdpRow>,
}

impl GdpTable {
    pub fn get(&self, key: &str) -> Option<&GdpRow> {
        self.rows.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load the GDP file described by `info`, keyed by its country name column
    pub fn from_info(info: &GdpInfo) -> Result<Self> {
        read_csv_as_nested_dict(
            &info.gdpfile,
            &info.country_name,
            info.separator_byte()?,
            info.quote_byte()?,
        )
    }
}

/// Read every row of a delimited file. Short rows are accepted and simply lack the
/// trailing columns.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_csv_rows(path: &Path, separator: u8, quote: u8) -> Result<CsvRows> {
    let started = std::time::Instant::now();
    let mut reader = ReaderBuilder::new()
        .delimiter(separator)
        .quote(quote)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(zip_record(&headers, &record));
    }

    debug!("Read {} rows with {} columns", rows.len(), headers.len());
    LoadMetrics::record_table_loaded(rows.len(), started.elapsed().as_secs_f64());
    Ok(CsvRows { headers, rows })
}

/// Read a delimited file into a table keyed by `keyfield`. A later row with the same
/// key replaces an earlier one.
pub fn read_csv_as_nested_dict(
    path: &Path,
    keyfield: &str,
    separator: u8,
    quote: u8,
) -> Result<GdpTable> {
    let CsvRows { headers, rows } = read_csv_rows(path, separator, quote)?;
    if !headers.iter().any(|h| h == keyfield) {
        return Err(GdpError::MissingColumn(keyfield.to_string()));
    }

    let mut table = HashMap::with_capacity(rows.len());
    for row in rows {
        match row.get(keyfield) {
            Some(key) => {
                table.insert(key.clone(), row);
            }
            None => debug!("Skipping row without a '{}' cell", keyfield),
        }
    }

    Ok(GdpTable {
        headers,
        rows: table,
    })
}

fn zip_record(headers: &[String], record: &StringRecord) -> GdpRow {
    headers
        .iter()
        .zip(record.iter())
        .map(|(h, cell)| (h.clone(), cell.to_string()))
        .collect()
}
