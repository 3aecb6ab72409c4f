use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub trends: TrendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_sheet")]
    pub sheet: String,
    #[serde(default = "default_month_column")]
    pub month_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_meta_text")]
    pub meta_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
}

fn default_data_dir() -> String { ".".to_string() }
fn default_sheet() -> String { "Hoja1".to_string() }
fn default_month_column() -> String { "Mes".to_string() }
fn default_value_column() -> String { "Normalidad".to_string() }
fn default_output_file() -> String { "Normalidad_01.png".to_string() }
fn default_width() -> u32 { 1400 }
fn default_height() -> u32 { 600 }
fn default_title() -> String { "Normalidad Nivel Nacional".to_string() }
fn default_meta_text() -> String { "Meta de normalidad: 92%".to_string() }
fn default_sensitivity() -> f64 { 0.5 }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sheet: default_sheet(),
            month_column: default_month_column(),
            value_column: default_value_column(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
            width: default_width(),
            height: default_height(),
            title: default_title(),
            meta_text: default_meta_text(),
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or from `normatrend.toml` in
    /// the working directory. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.unwrap_or(Path::new("normatrend.toml"));

        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else if path.is_some() {
            Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )))
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = Config::default();
        assert_eq!(config.input.sheet, "Hoja1");
        assert_eq!(config.input.month_column, "Mes");
        assert_eq!(config.input.value_column, "Normalidad");
        assert_eq!(config.chart.output_file, "Normalidad_01.png");
        assert_eq!(config.trends.sensitivity, 0.5);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("[trends]\nsensitivity = 1.0\n").unwrap();
        assert_eq!(config.trends.sensitivity, 1.0);
        assert_eq!(config.input.sheet, "Hoja1");
        assert_eq!(config.chart.width, 1400);
    }
}
