/// Chart text and default names shared by the CLI and the renderers

// World map
pub const WORLD_MAP_TITLE_SUFFIX: &str = " (log scale), unified by common country NAME";
pub const LEGEND_MISSING_FROM_SOURCE: &str = "Missing from World Bank Data";
pub const LEGEND_NO_GDP_DATA: &str = "No GDP data";

// XY plot
pub const XY_Y_TITLE: &str = "GDP in current US dollars";
pub const XY_X_TITLE: &str = "Year";

// Defaults mirrored by `GdpInfo::default()`
pub const DEFAULT_GDP_FILE: &str = "isp_gdp.csv";
pub const DEFAULT_COUNTRY_NAME_COLUMN: &str = "Country Name";
pub const DEFAULT_COUNTRY_CODE_COLUMN: &str = "Country Code";
pub const DEFAULT_MIN_YEAR: i32 = 1960;
pub const DEFAULT_MAX_YEAR: i32 = 2015;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

// Environment overrides
pub const ENV_GDP_FILE: &str = "GDP_FILE";
pub const ENV_OUTPUT_DIR: &str = "GDP_OUTPUT_DIR";

/// Title for the world map of a given year
pub fn world_map_title(year: &str) -> String {
    format!("GDP by country for {year}{WORLD_MAP_TITLE_SUFFIX}")
}

/// Legend label for the series carrying actual GDP values
pub fn world_map_value_label(year: &str) -> String {
    format!("GDP for {year}")
}

/// Title for the XY plot spanning the configured year window
pub fn xy_title(min_year: i32, max_year: i32) -> String {
    format!("Plot of GDP for select countries spanning {min_year} to {max_year}")
}

/// Default map file name for a given year, as used by the sample renders
pub fn world_map_file_name(year: &str) -> String {
    format!("isp_gdp_world_name_{year}.svg")
}
