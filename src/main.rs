use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use gdp_plot::{
    build_map_dict_by_name, build_plot_dict, constants, country_codes, logging, metrics,
    render_world_map, render_xy_plot, Config, GdpMap, PlotDict, RenderSummary,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "gdp_plot")]
#[command(about = "World Bank GDP charts rendered to SVG")]
#[command(version = "0.1.0")]
struct Cli {
    /// Settings file; defaults are used when the default file is absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write a Prometheus text snapshot of run metrics to this file
    #[arg(long, global = true)]
    metrics_out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the log-scale GDP world map for one year
    WorldMap {
        /// Year column to map, e.g. 2000
        #[arg(long)]
        year: String,
        /// Output SVG (default: <output dir>/isp_gdp_world_name_<year>.svg)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Two-column code,name CSV replacing the built-in country table
        #[arg(long)]
        codes: Option<PathBuf>,
    },
    /// Render GDP over time for the given countries
    Xy {
        /// Country names as they appear in the GDP file (comma-separated)
        #[arg(long)]
        countries: String,
        /// Output SVG (default: <output dir>/isp_gdp_xy.svg)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the computed chart data as JSON
    Summary {
        /// Include the world-map partition for this year
        #[arg(long)]
        year: Option<String>,
        /// Include XY series for these countries (comma-separated)
        #[arg(long)]
        countries: Option<String>,
        /// Two-column code,name CSV replacing the built-in country table
        #[arg(long)]
        codes: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct SummaryReport {
    generated_at: String,
    gdpfile: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    world_map: Option<GdpMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<PlotDict>,
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn plot_countries(config: &Config, codes: Option<&Path>) -> anyhow::Result<BTreeMap<String, String>> {
    match codes {
        Some(path) => country_codes::load_country_codes(
            path,
            config.gdp.separator_byte()?,
            config.gdp.quote_byte()?,
        )
        .with_context(|| format!("loading country codes from {}", path.display())),
        None => Ok(country_codes::world_countries()),
    }
}

fn print_summary(kind: &str, summary: &RenderSummary) {
    println!("📊 {} written to {}", kind, summary.output_file.display());
    println!("   Plotted: {}", summary.plotted);
    println!("   Missing from GDP data: {}", summary.unmatched);
    println!("   No GDP data: {}", summary.no_value);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (config_path, required) = match cli.config {
        Some(path) => (path, true),
        None => (PathBuf::from(constants::DEFAULT_CONFIG_FILE), false),
    };
    let config = Config::load(&config_path, required)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    match cli.command {
        Commands::WorldMap { year, output, codes } => {
            let countries = plot_countries(&config, codes.as_deref())?;
            let map_file =
                output.unwrap_or_else(|| config.output.dir.join(constants::world_map_file_name(&year)));
            info!("Rendering world map for {}", year);
            let summary = render_world_map(&config.gdp, &config.output, &countries, &year, &map_file)?;
            print_summary("World map", &summary);
        }
        Commands::Xy { countries, output } => {
            let country_list = split_list(&countries);
            let plot_file = output.unwrap_or_else(|| config.output.dir.join("isp_gdp_xy.svg"));
            info!("Rendering XY plot for {:?}", country_list);
            let summary = render_xy_plot(&config.gdp, &config.output, &country_list, &plot_file)?;
            print_summary("XY plot", &summary);
        }
        Commands::Summary {
            year,
            countries,
            codes,
        } => {
            let world_map = match year {
                Some(year) => {
                    let countries = plot_countries(&config, codes.as_deref())?;
                    Some(build_map_dict_by_name(&config.gdp, &countries, &year)?)
                }
                None => None,
            };
            let series = match countries {
                Some(list) => Some(build_plot_dict(&config.gdp, &split_list(&list))?),
                None => None,
            };
            let report = SummaryReport {
                generated_at: Utc::now().to_rfc3339(),
                gdpfile: config.gdp.gdpfile.clone(),
                world_map,
                series,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();
    metrics::init_metrics();

    let cli = Cli::parse();
    let metrics_out = cli.metrics_out.clone();

    let result = run(cli);
    if let Err(e) = &result {
        error!("Run failed: {:#}", e);
    }

    if let Some(path) = metrics_out {
        if let Some(snapshot) = metrics::render_snapshot() {
            fs::write(&path, snapshot)
                .with_context(|| format!("writing metrics snapshot to {}", path.display()))?;
            info!("Metrics snapshot written to {}", path.display());
        }
    }

    result
}
