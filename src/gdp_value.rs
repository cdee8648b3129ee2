//! GDP cell parsing.
//!
//! World Bank exports leave unknown years as empty cells and occasionally carry
//! placeholder text. Parsing never fails loudly: a cell either yields a number or it
//! does not, and callers branch on that.

use serde::Serialize;

/// A country's GDP for one year, ready for the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GdpValue {
    /// log10 of the raw GDP figure
    Value(f64),
    /// No usable figure for the year
    Absent,
}

impl GdpValue {
    /// Log-scale value of a raw cell. Anything that is not a positive finite number is `Absent`.
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell.and_then(parse_gdp).and_then(log10_gdp) {
            Some(v) => GdpValue::Value(v),
            None => GdpValue::Absent,
        }
    }

    /// The log-scale figure, if there is one
    pub fn value(self) -> Option<f64> {
        match self {
            GdpValue::Value(v) => Some(v),
            GdpValue::Absent => None,
        }
    }
}

/// Parse a raw GDP cell. Empty, non-numeric and non-finite cells yield `None`, so `NaN`
/// and `inf` behave like any other bad cell in the XY series.
pub fn parse_gdp(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// log10 of a GDP figure; zero and negative figures have no log-scale value.
pub fn log10_gdp(gdp: f64) -> Option<f64> {
    if gdp > 0.0 {
        Some(gdp.log10())
    } else {
        None
    }
}
