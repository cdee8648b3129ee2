//! GDP world map: log-scale GDP per chart-library country code for one year.

use crate::config::{GdpInfo, OutputConfig};
use crate::constants;
use crate::error::Result;
use crate::figures::{self, RenderSummary};
use crate::gdp_value::GdpValue;
use crate::metrics::{ReconcileMetrics, RenderMetrics};
use crate::reconcile::reconcile_countries_by_name;
use crate::table::read_csv_rows;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Map data for one year. The three collections partition the requested codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GdpMap {
    /// code -> log10(GDP)
    pub values: BTreeMap<String, f64>,
    /// codes whose country name is not in the GDP file
    pub unmatched: BTreeSet<String>,
    /// codes found in the GDP file but without a usable figure for the year
    pub no_value: BTreeSet<String>,
}

impl GdpMap {
    /// Number of codes across all three groups
    pub fn len(&self) -> usize {
        self.values.len() + self.unmatched.len() + self.no_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Country name -> log-scale GDP for `year`, read from the GDP file.
///
/// When a name appears on several rows the first one wins. A year column that is not
/// in the file leaves every country `Absent`.
pub fn gdp_by_name_for_year(gdpinfo: &GdpInfo, year: &str) -> Result<HashMap<String, GdpValue>> {
    let csv = read_csv_rows(&gdpinfo.gdpfile, gdpinfo.separator_byte()?, gdpinfo.quote_byte()?)?;
    csv.require_column(&gdpinfo.country_name)?;
    if !csv.has_column(year) {
        warn!("Year column '{}' not found in {}", year, gdpinfo.gdpfile.display());
    }

    let mut by_name = HashMap::with_capacity(csv.rows.len());
    for row in &csv.rows {
        let Some(name) = row.get(&gdpinfo.country_name) else {
            continue;
        };
        let value = GdpValue::from_cell(row.get(year).map(String::as_str));
        by_name.entry(name.clone()).or_insert(value);
    }
    Ok(by_name)
}

/// Build the map data for `year`: log10 GDP per code, plus the codes that could not be
/// matched and the codes that matched but have no figure.
#[instrument(skip(gdpinfo, plot_countries), fields(codes = plot_countries.len()))]
pub fn build_map_dict_by_name(
    gdpinfo: &GdpInfo,
    plot_countries: &BTreeMap<String, String>,
    year: &str,
) -> Result<GdpMap> {
    let gdp_countries = gdp_by_name_for_year(gdpinfo, year)?;
    let reconciliation = reconcile_countries_by_name(plot_countries, &gdp_countries);

    let mut map = GdpMap {
        unmatched: reconciliation.unmatched,
        ..GdpMap::default()
    };

    for (code, name) in reconciliation.matched {
        match gdp_countries.get(&name).and_then(|v| v.value()) {
            Some(v) => {
                map.values.insert(code, v);
            }
            None => {
                debug!("No GDP value for {} ({}) in {}", name, code, year);
                map.no_value.insert(code);
            }
        }
    }

    ReconcileMetrics::record_no_value(map.no_value.len());
    info!(
        "Map data for {}: {} with values, {} unmatched, {} without data",
        year,
        map.values.len(),
        map.unmatched.len(),
        map.no_value.len()
    );
    Ok(map)
}

/// Build the map data for `year` and write it as an SVG to `map_file`
pub fn render_world_map(
    gdpinfo: &GdpInfo,
    output: &OutputConfig,
    plot_countries: &BTreeMap<String, String>,
    year: &str,
    map_file: &Path,
) -> Result<RenderSummary> {
    let started = std::time::Instant::now();
    let map = build_map_dict_by_name(gdpinfo, plot_countries, year)?;

    figures::draw_world_map(
        map_file,
        (output.width, output.height),
        &constants::world_map_title(year),
        &constants::world_map_value_label(year),
        &map,
    )?;

    RenderMetrics::record_chart_rendered("world_map", started.elapsed().as_secs_f64());
    info!("Wrote world map for {} to {}", year, map_file.display());

    Ok(RenderSummary {
        output_file: map_file.to_path_buf(),
        plotted: map.values.len(),
        unmatched: map.unmatched.len(),
        no_value: map.no_value.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir) -> GdpInfo {
        let path = dir.path().join("gdp.csv");
        fs::write(
            &path,
            "Country Name,Country Code,1999,2000\n\
             Alpha,AAA,10,1000\n\
             Beta,BBB,20,\n\
             Gamma,GGG,30,abc\n\
             Delta,DDD,40,0\n\
             Alpha,AAA,10,99999\n",
        )
        .unwrap();
        GdpInfo {
            gdpfile: path,
            ..GdpInfo::default()
        }
    }

    fn plot_countries() -> BTreeMap<String, String> {
        [
            ("aa", "Alpha"),
            ("bb", "Beta"),
            ("gg", "Gamma"),
            ("dd", "Delta"),
            ("zz", "Zeta"),
        ]
        .iter()
        .map(|(c, n)| (c.to_string(), n.to_string()))
        .collect()
    }

    #[test]
    fn test_three_way_partition() {
        let tmp = TempDir::new().unwrap();
        let info = fixture(&tmp);
        let codes = plot_countries();

        let map = build_map_dict_by_name(&info, &codes, "2000").unwrap();

        assert_eq!(map.values.len(), 1);
        assert!((map.values["aa"] - 3.0).abs() < 1e-12);
        assert_eq!(map.unmatched, BTreeSet::from(["zz".to_string()]));
        assert_eq!(
            map.no_value,
            BTreeSet::from(["bb".to_string(), "dd".to_string(), "gg".to_string()])
        );
        assert_eq!(map.len(), codes.len());
    }

    #[test]
    fn test_first_row_wins_for_duplicate_names() {
        let tmp = TempDir::new().unwrap();
        let info = fixture(&tmp);

        let by_name = gdp_by_name_for_year(&info, "2000").unwrap();
        let alpha = by_name["Alpha"].value().unwrap();
        assert!((alpha - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_year_column_means_no_values() {
        let tmp = TempDir::new().unwrap();
        let info = fixture(&tmp);

        let map = build_map_dict_by_name(&info, &plot_countries(), "1850").unwrap();
        assert!(map.values.is_empty());
        assert_eq!(map.no_value.len(), 4);
        assert_eq!(map.unmatched.len(), 1);
    }
}
