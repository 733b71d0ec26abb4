//! Configuration types for umlsketch.
//!
//! This module provides configuration structures that control which node
//! kinds are offered and how exported diagrams are named. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining palette and export settings.
//! - [`PaletteConfig`] - Controls which node kinds the [`Palette`] offers.
//! - [`ExportConfig`] - Controls the default output file extension.
//!
//! # Example
//!
//! ```
//! # use umlsketch::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.palette().flowchart());
//! assert_eq!(config.export().extension(), "puml");
//! ```

use serde::Deserialize;

use umlsketch_core::palette::Palette;

/// Top-level application configuration combining palette and export settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Palette configuration section.
    #[serde(default)]
    palette: PaletteConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified palette and export configurations.
    ///
    /// # Arguments
    ///
    /// * `palette` - Node kinds offered for placement.
    /// * `export` - Output naming options.
    pub fn new(palette: PaletteConfig, export: ExportConfig) -> Self {
        Self { palette, export }
    }

    /// Returns the palette configuration.
    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Node palette configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteConfig {
    /// Whether the flowchart kinds (process, decision, ...) are offered.
    #[serde(default = "default_flowchart")]
    flowchart: bool,
}

fn default_flowchart() -> bool {
    true
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            flowchart: default_flowchart(),
        }
    }
}

impl PaletteConfig {
    /// Creates a new [`PaletteConfig`].
    pub fn new(flowchart: bool) -> Self {
        Self { flowchart }
    }

    /// Returns whether flowchart kinds are offered.
    pub fn flowchart(&self) -> bool {
        self.flowchart
    }

    /// Builds the [`Palette`] this configuration describes.
    pub fn build(&self) -> Palette {
        Palette::new(self.flowchart)
    }
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Extension of the default output file, without the leading dot.
    #[serde(default = "default_extension")]
    extension: String,
}

fn default_extension() -> String {
    "puml".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

impl ExportConfig {
    /// Creates a new [`ExportConfig`]. A leading dot is stripped.
    pub fn new(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Returns the default output extension, without the leading dot.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}
