//! YAML configuration for the `pack` command.
//!
//! Every field has a default, so an empty file is a valid config.
//! Command-line flags override whatever the file says.
//!
//! ```yaml
//! strategy: holding
//! units: mm
//! dpi: 96
//! style:
//!   placed: black
//!   support: red
//!   enclosing: blue
//!   stroke_width: 1.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use circle_pack::Strategy;

/// Unit the input diameters are given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Mm,
    Px,
}

impl Units {
    pub fn name(&self) -> &'static str {
        match self {
            Units::Mm => "mm",
            Units::Px => "px",
        }
    }

    pub fn from_name(name: &str) -> Option<Units> {
        match name.to_lowercase().as_str() {
            "mm" | "millimeters" => Some(Units::Mm),
            "px" | "pixels" => Some(Units::Px),
            _ => None,
        }
    }
}

/// Settings for one `pack` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    /// Strategy name (see `circle-pack strategies`)
    #[serde(default)]
    pub strategy: Option<String>,

    /// Unit of the input diameters
    #[serde(default)]
    pub units: Units,

    /// Screen resolution used for mm <-> px conversion
    #[serde(default = "default_dpi")]
    pub dpi: f64,

    /// Rendering style
    #[serde(default)]
    pub style: RenderStyle,
}

fn default_dpi() -> f64 {
    96.0
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            strategy: None,
            units: Units::default(),
            dpi: default_dpi(),
            style: RenderStyle::default(),
        }
    }
}

/// Stroke colours and sizes for rendered output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Stroke of ordinary placed circles
    #[serde(default = "default_placed")]
    pub placed: String,

    /// Stroke of the circles the enclosing circle rests on
    #[serde(default = "default_support")]
    pub support: String,

    /// Stroke of the enclosing circle
    #[serde(default = "default_enclosing")]
    pub enclosing: String,

    #[serde(default = "default_background")]
    pub background: String,

    /// Stroke width in pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Margin around the enclosing circle, in input units
    #[serde(default = "default_padding")]
    pub padding: f64,
}

fn default_placed() -> String {
    "black".to_string()
}

fn default_support() -> String {
    "red".to_string()
}

fn default_enclosing() -> String {
    "blue".to_string()
}

fn default_background() -> String {
    "white".to_string()
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_padding() -> f64 {
    10.0
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            placed: default_placed(),
            support: default_support(),
            enclosing: default_enclosing(),
            background: default_background(),
            stroke_width: default_stroke_width(),
            padding: default_padding(),
        }
    }
}

impl PackConfig {
    /// Load a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: PackConfig = serde_yaml::from_str(content)
            .map_err(|e| format!("Failed to parse config YAML: {}", e))?;
        if !(config.dpi.is_finite() && config.dpi > 0.0) {
            return Err(format!("dpi must be positive, got {}", config.dpi));
        }
        Ok(config)
    }

    /// Strategy named in the config, `Greedy` if none.
    pub fn strategy(&self) -> Result<Strategy, String> {
        match &self.strategy {
            None => Ok(Strategy::default()),
            Some(name) => Strategy::from_name(name)
                .ok_or_else(|| format!("Unknown strategy in config: {}", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = PackConfig::from_yaml("").unwrap();
        assert_eq!(config.units, Units::Mm);
        assert_eq!(config.dpi, 96.0);
        assert_eq!(config.style.enclosing, "blue");
        assert_eq!(config.strategy().unwrap(), Strategy::Greedy);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let yaml = "strategy: holding\nunits: px\nstyle:\n  support: orange\n  stroke_width: 2.5\n";
        let config = PackConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.strategy().unwrap(), Strategy::HoldingEnclosing);
        assert_eq!(config.units, Units::Px);
        assert_eq!(config.style.support, "orange");
        assert_eq!(config.style.stroke_width, 2.5);
        assert_eq!(config.style.placed, "black");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(PackConfig::from_yaml("dpi: -3").is_err());
        assert!(PackConfig::from_yaml("units: inches").is_err());
        let config = PackConfig::from_yaml("strategy: random").unwrap();
        assert!(config.strategy().is_err());
    }

    #[test]
    fn units_parsing() {
        assert_eq!(Units::from_name("MM"), Some(Units::Mm));
        assert_eq!(Units::from_name("pixels"), Some(Units::Px));
        assert_eq!(Units::from_name("cm"), None);
        assert_eq!(Units::Px.name(), "px");
    }
}
