//! GDP over time for a handful of countries, one XY line per country.

use crate::config::{GdpInfo, MissingYears, OutputConfig, SeriesMode};
use crate::constants;
use crate::error::Result;
use crate::figures::{self, RenderSummary};
use crate::gdp_value::parse_gdp;
use crate::metrics::{RenderMetrics, SeriesMetrics};
use crate::table::{GdpRow, GdpTable};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// (year, GDP) points in ascending year order
pub type Series = Vec<(i32, f64)>;

/// Country name -> series
pub type PlotDict = BTreeMap<String, Series>;

/// Points for one country's row, restricted to `[min_year, max_year]`.
///
/// Empty and missing cells are skipped. What happens at a non-numeric cell depends on
/// `gdpinfo.series_mode`: `Truncate` ends the series there, `Skip` drops that year only.
pub fn build_plot_values(gdpinfo: &GdpInfo, gdpdata: &GdpRow) -> Series {
    let (series, truncated) = scan_row(gdpinfo, gdpdata);
    SeriesMetrics::record_series(series.len(), truncated);
    series
}

fn scan_row(gdpinfo: &GdpInfo, gdpdata: &GdpRow) -> (Series, bool) {
    let mut series = Vec::new();

    for year in gdpinfo.years() {
        let Some(cell) = gdpdata.get(&year.to_string()) else {
            continue;
        };
        if cell.trim().is_empty() {
            continue;
        }
        match parse_gdp(cell) {
            Some(gdp) => series.push((year, gdp)),
            None => match gdpinfo.series_mode {
                SeriesMode::Truncate => {
                    debug!("Non-numeric GDP '{}' for {}, truncating series", cell, year);
                    return (series, true);
                }
                SeriesMode::Skip => {
                    debug!("Non-numeric GDP '{}' for {}, skipping year", cell, year);
                }
            },
        }
    }

    (series, false)
}

/// Series for every requested country from an already loaded table. Countries missing
/// from the table get an empty series.
///
/// With `MissingYears::EmptySeries`, a window year that has no column in the file
/// empties every series.
pub fn plot_dict_from_table(gdpinfo: &GdpInfo, table: &GdpTable, country_list: &[String]) -> PlotDict {
    let mut plot_dict = PlotDict::new();

    let missing_year = gdpinfo
        .years()
        .find(|year| !table.headers.contains(&year.to_string()));
    let window_incomplete = match (missing_year, gdpinfo.missing_years) {
        (Some(year), MissingYears::EmptySeries) => {
            warn!("Year column '{}' not found, every series is empty", year);
            true
        }
        (Some(year), MissingYears::SkipYear) => {
            debug!("Year column '{}' not found, skipping it", year);
            false
        }
        (None, _) => false,
    };

    for country in country_list {
        let series = match table.get(country) {
            Some(_) if window_incomplete => Vec::new(),
            Some(row) => {
                let window: GdpRow = gdpinfo
                    .years()
                    .filter_map(|year| {
                        let key = year.to_string();
                        row.get(&key).map(|cell| (key, cell.clone()))
                    })
                    .collect();
                build_plot_values(gdpinfo, &window)
            }
            None => {
                warn!("Country '{}' not found in GDP data", country);
                SeriesMetrics::record_missing_country();
                Vec::new()
            }
        };
        plot_dict.insert(country.clone(), series);
    }

    plot_dict
}

/// Load the GDP file and build a series for each country in `country_list`
#[instrument(skip(gdpinfo), fields(path = %gdpinfo.gdpfile.display()))]
pub fn build_plot_dict(gdpinfo: &GdpInfo, country_list: &[String]) -> Result<PlotDict> {
    let table = GdpTable::from_info(gdpinfo)?;
    Ok(plot_dict_from_table(gdpinfo, &table, country_list))
}

/// Build series for `country_list` and write the XY chart to `plot_file`. Lines are
/// drawn in request order.
pub fn render_xy_plot(
    gdpinfo: &GdpInfo,
    output: &OutputConfig,
    country_list: &[String],
    plot_file: &Path,
) -> Result<RenderSummary> {
    let started = std::time::Instant::now();
    let table = GdpTable::from_info(gdpinfo)?;
    let plot_dict = plot_dict_from_table(gdpinfo, &table, country_list);

    let mut ordered: Vec<(String, Series)> = Vec::with_capacity(country_list.len());
    for country in country_list {
        if ordered.iter().any(|(name, _)| name == country) {
            continue;
        }
        let series = plot_dict.get(country).cloned().unwrap_or_default();
        ordered.push((country.clone(), series));
    }

    figures::draw_xy_plot(
        plot_file,
        (output.width, output.height),
        &constants::xy_title(gdpinfo.min_year, gdpinfo.max_year),
        gdpinfo.years(),
        &ordered,
    )?;

    RenderMetrics::record_chart_rendered("xy", started.elapsed().as_secs_f64());
    info!(
        "Wrote XY plot for {} countries to {}",
        ordered.len(),
        plot_file.display()
    );

    let unmatched = ordered
        .iter()
        .filter(|(name, _)| !table.contains(name))
        .count();
    let plotted = ordered.iter().filter(|(_, s)| !s.is_empty()).count();
    Ok(RenderSummary {
        output_file: plot_file.to_path_buf(),
        plotted,
        unmatched,
        no_value: ordered.len() - plotted - unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> GdpRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_out_of_range_years_excluded() {
        let info = GdpInfo::default();
        let data = row(&[("1959", "100"), ("2000", "200")]);

        assert_eq!(build_plot_values(&info, &data), vec![(2000, 200.0)]);
    }

    #[test]
    fn test_ascending_order_and_empty_cells_skipped() {
        let info = GdpInfo::default();
        let data = row(&[("1962", "3"), ("1960", "1"), ("1961", ""), ("Country Name", "X")]);

        assert_eq!(build_plot_values(&info, &data), vec![(1960, 1.0), (1962, 3.0)]);
    }

    #[test]
    fn test_truncates_at_first_bad_value() {
        let info = GdpInfo::default();
        let data = row(&[("1960", "100"), ("1961", "bad"), ("1962", "300")]);

        assert_eq!(build_plot_values(&info, &data), vec![(1960, 100.0)]);
    }

    #[test]
    fn test_skip_mode_drops_only_bad_year() {
        let info = GdpInfo {
            series_mode: SeriesMode::Skip,
            ..GdpInfo::default()
        };
        let data = row(&[("1960", "100"), ("1961", "bad"), ("1962", "300")]);

        assert_eq!(
            build_plot_values(&info, &data),
            vec![(1960, 100.0), (1962, 300.0)]
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let info = GdpInfo {
            min_year: 1970,
            max_year: 1972,
            ..GdpInfo::default()
        };
        let data = row(&[("1969", "1"), ("1970", "2"), ("1972", "4"), ("1973", "5")]);

        assert_eq!(build_plot_values(&info, &data), vec![(1970, 2.0), (1972, 4.0)]);
    }

    fn table(headers: &[&str], name: &str, cells: &[(&str, &str)]) -> GdpTable {
        GdpTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: [(name.to_string(), row(cells))].into_iter().collect(),
        }
    }

    #[test]
    fn test_missing_year_column_empties_series() {
        let info = GdpInfo::default();
        let table = table(
            &["Country Name", "1960", "1961"],
            "China",
            &[("Country Name", "China"), ("1960", "1"), ("1961", "2")],
        );

        let dict = plot_dict_from_table(&info, &table, &["China".to_string()]);
        assert_eq!(dict["China"], Vec::<(i32, f64)>::new());
    }

    #[test]
    fn test_skip_year_keeps_available_columns() {
        let info = GdpInfo {
            missing_years: MissingYears::SkipYear,
            ..GdpInfo::default()
        };
        let table = table(
            &["Country Name", "1960", "1961"],
            "China",
            &[("Country Name", "China"), ("1960", "1"), ("1961", "2")],
        );

        let dict = plot_dict_from_table(&info, &table, &["China".to_string()]);
        assert_eq!(dict["China"], vec![(1960, 1.0), (1961, 2.0)]);
    }

    #[test]
    fn test_complete_window_builds_series() {
        let info = GdpInfo {
            min_year: 1960,
            max_year: 1961,
            ..GdpInfo::default()
        };
        let table = table(
            &["Country Name", "1959", "1960", "1961"],
            "China",
            &[("1959", "9"), ("1960", "1"), ("1961", "2")],
        );

        let dict = plot_dict_from_table(&info, &table, &["China".to_string()]);
        assert_eq!(dict["China"], vec![(1960, 1.0), (1961, 2.0)]);
    }

    #[test]
    fn test_non_finite_cell_is_not_a_number() {
        let data = row(&[("1960", "100"), ("1961", "NaN"), ("1962", "300")]);

        assert_eq!(build_plot_values(&GdpInfo::default(), &data), vec![(1960, 100.0)]);

        let skip = GdpInfo {
            series_mode: SeriesMode::Skip,
            ..GdpInfo::default()
        };
        let data = row(&[("1960", "100"), ("1961", "inf"), ("1962", "300")]);
        assert_eq!(build_plot_values(&skip, &data), vec![(1960, 100.0), (1962, 300.0)]);
    }

    #[test]
    fn test_missing_country_gets_empty_series() {
        let info = GdpInfo::default();
        let table = GdpTable::default();

        let dict = plot_dict_from_table(&info, &table, &["Atlantis".to_string()]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict["Atlantis"], Vec::<(i32, f64)>::new());
    }
}
