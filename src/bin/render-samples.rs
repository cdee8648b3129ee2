//! Sample Chart Renderer
//!
//! Renders the standard set of charts from the configured GDP file: world maps for
//! 1960, 1980, 2000 and 2010, and XY plots for no countries, China, and the UK with
//! the USA.
//!
//! Usage:
//!   cargo run --bin render-samples                 # uses config.toml if present
//!   cargo run --bin render-samples path/to/config.toml

use anyhow::Context;
use gdp_plot::{constants, country_codes, logging, render_world_map, render_xy_plot, Config};
use std::env;
use std::path::PathBuf;

const MAP_YEARS: [&str; 4] = ["1960", "1980", "2000", "2010"];

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let (config_path, required) = match env::args().nth(1) {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from(constants::DEFAULT_CONFIG_FILE), false),
    };
    let config = Config::load(&config_path, required)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    let out_dir = &config.output.dir;

    let countries = country_codes::world_countries();
    for year in MAP_YEARS {
        let map_file = out_dir.join(constants::world_map_file_name(year));
        let summary = render_world_map(&config.gdp, &config.output, &countries, year, &map_file)?;
        eprintln!(
            "🗺️  {} -> {} ({} plotted, {} missing, {} without data)",
            year,
            summary.output_file.display(),
            summary.plotted,
            summary.unmatched,
            summary.no_value
        );
    }

    let xy_runs: [(&[&str], &str); 3] = [
        (&[], "isp_gdp_xy_none.svg"),
        (&["China"], "isp_gdp_xy_china.svg"),
        (&["United Kingdom", "United States"], "isp_gdp_xy_uk+usa.svg"),
    ];
    for (names, file) in xy_runs {
        let country_list: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let summary = render_xy_plot(&config.gdp, &config.output, &country_list, &out_dir.join(file))?;
        eprintln!(
            "📈 {:?} -> {} ({} plotted)",
            names,
            summary.output_file.display(),
            summary.plotted
        );
    }

    eprintln!("✅ Sample charts written to {}", out_dir.display());
    Ok(())
}
