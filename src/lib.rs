pub mod config;
pub mod constants;
pub mod country_codes;
pub mod error;
pub mod figures;
pub mod gdp_value;
pub mod logging;
pub mod metrics;
pub mod reconcile;
pub mod table;
pub mod world_map;
pub mod xy_plot;

pub use config::{Config, GdpInfo, MissingYears, OutputConfig, SeriesMode};
pub use error::{GdpError, Result};
pub use figures::RenderSummary;
pub use gdp_value::GdpValue;
pub use reconcile::{reconcile_countries_by_name, Reconciliation};
pub use world_map::{build_map_dict_by_name, render_world_map, GdpMap};
pub use xy_plot::{build_plot_dict, build_plot_values, render_xy_plot, PlotDict, Series};
