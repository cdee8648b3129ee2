use crate::constants;
use crate::error::{GdpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level settings file: `[gdp]` describes the source data, `[output]` where charts go.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gdp: GdpInfo,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How to read the World Bank GDP file and which years to chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GdpInfo {
    pub gdpfile: PathBuf,
    pub separator: char,
    pub quote: char,
    pub min_year: i32,
    pub max_year: i32,
    pub country_name: String,
    pub country_code: String,
    pub series_mode: SeriesMode,
    pub missing_years: MissingYears,
}

/// What the XY series builder does with a cell that is present but not a number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    /// Stop the series at the first bad cell and keep what was built so far
    #[default]
    Truncate,
    /// Drop just the bad year and keep scanning
    Skip,
}

/// What the XY builder does when a year of the window has no column in the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingYears {
    /// Every country gets an empty series
    #[default]
    EmptySeries,
    /// Treat the missing column as an empty cell
    SkipYear,
}

/// Earliest and latest year accepted in the window
pub const YEAR_BOUNDS: std::ops::RangeInclusive<i32> = 0..=9999;

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_OUTPUT_DIR)
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    640
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for GdpInfo {
    fn default() -> Self {
        Self {
            gdpfile: PathBuf::from(constants::DEFAULT_GDP_FILE),
            separator: ',',
            quote: '"',
            min_year: constants::DEFAULT_MIN_YEAR,
            max_year: constants::DEFAULT_MAX_YEAR,
            country_name: constants::DEFAULT_COUNTRY_NAME_COLUMN.to_string(),
            country_code: constants::DEFAULT_COUNTRY_CODE_COLUMN.to_string(),
            series_mode: SeriesMode::default(),
            missing_years: MissingYears::default(),
        }
    }
}

impl GdpInfo {
    /// Separator as the single byte the CSV reader expects
    pub fn separator_byte(&self) -> Result<u8> {
        ascii_byte("separator", self.separator)
    }

    /// Quote character as the single byte the CSV reader expects
    pub fn quote_byte(&self) -> Result<u8> {
        ascii_byte("quote", self.quote)
    }

    /// Inclusive year window
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.min_year..=self.max_year
    }

    pub fn validate(&self) -> Result<()> {
        for (field, year) in [("min_year", self.min_year), ("max_year", self.max_year)] {
            if !YEAR_BOUNDS.contains(&year) {
                return Err(GdpError::Config(format!(
                    "{field} ({year}) must be between {} and {}",
                    YEAR_BOUNDS.start(),
                    YEAR_BOUNDS.end()
                )));
            }
        }
        if self.min_year > self.max_year {
            return Err(GdpError::Config(format!(
                "min_year ({}) is greater than max_year ({})",
                self.min_year, self.max_year
            )));
        }
        if self.separator_byte()? == self.quote_byte()? {
            return Err(GdpError::Config(format!(
                "separator and quote must differ, both are '{}'",
                self.separator
            )));
        }
        if self.country_name.trim().is_empty() {
            return Err(GdpError::Config("country_name column key is empty".to_string()));
        }
        if self.country_code.trim().is_empty() {
            return Err(GdpError::Config("country_code column key is empty".to_string()));
        }
        Ok(())
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GdpError::Config(format!(
                "chart size must be nonzero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

fn ascii_byte(field: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(GdpError::Config(format!(
            "{field} must be a single ASCII character, got '{c}'"
        )))
    }
}

impl Config {
    /// Parse settings from TOML text and validate them
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.gdp.validate()?;
        self.output.validate()
    }

    /// Load settings from `path`, then apply `GDP_FILE` / `GDP_OUTPUT_DIR` overrides.
    ///
    /// When `required` is false and the file does not exist, defaults are used.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let mut config = if path.exists() || required {
            let content = fs::read_to_string(path).map_err(|e| {
                GdpError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            info!("Loaded configuration from {}", path.display());
            Config::from_toml_str(&content)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Replace `gdp.gdpfile` and `output.dir` with non-empty values from `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = present(constants::ENV_GDP_FILE) {
            debug!("{} overrides gdpfile with {}", constants::ENV_GDP_FILE, v);
            self.gdp.gdpfile = PathBuf::from(v);
        }
        if let Some(v) = present(constants::ENV_OUTPUT_DIR) {
            self.output.dir = PathBuf::from(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_world_bank_layout() {
        let info = GdpInfo::default();
        assert_eq!(info.separator, ',');
        assert_eq!(info.quote, '"');
        assert_eq!(info.min_year, 1960);
        assert_eq!(info.max_year, 2015);
        assert_eq!(info.country_name, "Country Name");
        assert_eq!(info.series_mode, SeriesMode::Truncate);
        assert_eq!(info.missing_years, MissingYears::EmptySeries);
        assert!(info.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(
            r#"
            [gdp]
            gdpfile = "data/gdp.csv"
            separator = ";"
            quote = "'"
            min_year = 1970
            max_year = 1980
            country_name = "Name"
            country_code = "Code"
            series_mode = "skip"
            missing_years = "skip_year"

            [output]
            dir = "charts"
            "#,
        )
        .unwrap();

        assert_eq!(config.gdp.gdpfile, PathBuf::from("data/gdp.csv"));
        assert_eq!(config.gdp.separator_byte().unwrap(), b';');
        assert_eq!(config.gdp.quote_byte().unwrap(), b'\'');
        assert_eq!(config.gdp.series_mode, SeriesMode::Skip);
        assert_eq!(config.gdp.missing_years, MissingYears::SkipYear);
        assert_eq!(config.output.dir, PathBuf::from("charts"));
        assert_eq!(config.output.width, 1024);
    }

    #[test]
    fn test_rejects_inverted_year_window() {
        let info = GdpInfo {
            min_year: 2000,
            max_year: 1990,
            ..GdpInfo::default()
        };
        assert!(matches!(info.validate(), Err(GdpError::Config(_))));
    }

    #[test]
    fn test_rejects_non_ascii_separator() {
        let info = GdpInfo {
            separator: '§',
            ..GdpInfo::default()
        };
        assert!(info.validate().is_err());
    }

    #[test]
    fn test_rejects_same_separator_and_quote() {
        let info = GdpInfo {
            quote: ',',
            ..GdpInfo::default()
        };
        assert!(info.validate().is_err());
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(config.gdp.min_year, 1960);
    }

    #[test]
    fn test_missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(&dir.path().join("absent.toml"), true).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_years() {
        let too_late = GdpInfo {
            max_year: 10_000,
            ..GdpInfo::default()
        };
        assert!(matches!(too_late.validate(), Err(GdpError::Config(_))));

        let huge_window = GdpInfo {
            min_year: i32::MIN,
            max_year: i32::MAX,
            ..GdpInfo::default()
        };
        assert!(huge_window.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_chart_size() {
        let result = Config::from_toml_str("[output]\nwidth = 0\n");
        assert!(matches!(result, Err(GdpError::Config(_))));

        let output = OutputConfig {
            height: 0,
            ..OutputConfig::default()
        };
        assert!(output.validate().is_err());
    }

    #[test]
    fn test_overrides_replace_file_and_output_dir() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            constants::ENV_GDP_FILE => Some("other.csv".to_string()),
            constants::ENV_OUTPUT_DIR => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.gdp.gdpfile, PathBuf::from("other.csv"));
        assert_eq!(config.output.dir, PathBuf::from(constants::DEFAULT_OUTPUT_DIR));

        config.apply_overrides(|key| {
            (key == constants::ENV_OUTPUT_DIR).then(|| "charts".to_string())
        });
        assert_eq!(config.output.dir, PathBuf::from("charts"));
        assert_eq!(config.gdp.gdpfile, PathBuf::from("other.csv"));
    }

    #[test]
    fn test_load_picks_up_gdp_file_from_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[gdp]\ngdpfile = \"from_file.csv\"\n").unwrap();

        std::env::set_var(constants::ENV_GDP_FILE, "from_env.csv");
        let config = Config::load(&path, true);
        std::env::remove_var(constants::ENV_GDP_FILE);

        assert_eq!(config.unwrap().gdp.gdpfile, PathBuf::from("from_env.csv"));
    }
}
