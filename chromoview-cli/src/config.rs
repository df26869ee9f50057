//! Configuration handling for the ChromoView CLI
//!
//! Supports loading configuration from chromoview.toml files with CLI argument overrides.

use crate::error::CliError;
use anyhow::{Context, Result};
use chromoview_core::{GlyphGeometry, OverlayStyle, Transform, ViewportBounds};
use chromoview_render::{ExportConfig, RenderStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub glyph: GlyphConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphConfig {
    /// Left edge of the centromeric layer
    #[serde(default = "default_glyph_x")]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    /// Full band width
    #[serde(default = "default_glyph_width")]
    pub width: f64,

    /// Glyph height per base pair at zoom 1.0
    #[serde(default = "default_per_bp_height")]
    pub per_bp_height: f64,

    #[serde(default = "default_centromeric_width_factor")]
    pub centromeric_width_factor: f64,

    #[serde(default = "default_non_centromeric_x_offset")]
    pub non_centromeric_x_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Initial focal point x
    #[serde(default = "default_dx")]
    pub dx: f64,

    /// Initial focal point y
    #[serde(default = "default_dy")]
    pub dy: f64,

    /// Initial zoom factor
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    #[serde(default = "default_container_width")]
    pub container_width: f64,

    #[serde(default = "default_container_height")]
    pub container_height: f64,

    #[serde(default = "default_x_bounds")]
    pub x_bounds: (f64, f64),

    #[serde(default = "default_y_bounds")]
    pub y_bounds: (f64, f64),

    #[serde(default = "default_zoom_bounds")]
    pub zoom_bounds: (f64, f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_offset_x")]
    pub offset_x: f64,

    #[serde(default = "default_offset_y")]
    pub offset_y: f64,

    #[serde(default = "default_content_width")]
    pub content_width: f64,

    /// Gene list scrolls beyond this height
    #[serde(default = "default_content_height")]
    pub content_height: f64,

    #[serde(default = "default_row_height")]
    pub row_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Default export width
    #[serde(default = "default_width")]
    pub width: u32,

    /// Default export height
    #[serde(default = "default_height")]
    pub height: u32,

    /// Distance between glyph origins
    #[serde(default = "default_spacing")]
    pub spacing: f64,

    #[serde(default = "default_margin")]
    pub margin: f64,

    #[serde(default = "default_arm_color")]
    pub arm_color: String,

    #[serde(default = "default_centromere_color")]
    pub centromere_color: String,

    #[serde(default = "default_selection_color")]
    pub selection_color: String,

    #[serde(default = "default_background_color")]
    pub background_color: String,
}

// Default value functions
fn default_glyph_x() -> f64 { 10.0 }
fn default_glyph_width() -> f64 { 10.0 }
fn default_per_bp_height() -> f64 { 0.000015 }
fn default_centromeric_width_factor() -> f64 { 0.6 }
fn default_non_centromeric_x_offset() -> f64 { -2.0 }
fn default_dx() -> f64 { 300.0 }
fn default_dy() -> f64 { 150.0 }
fn default_zoom() -> f64 { 0.7 }
fn default_container_width() -> f64 { 800.0 }
fn default_container_height() -> f64 { 600.0 }
fn default_x_bounds() -> (f64, f64) { ViewportBounds::default().x }
fn default_y_bounds() -> (f64, f64) { ViewportBounds::default().y }
fn default_zoom_bounds() -> (f64, f64) { ViewportBounds::default().zoom }
fn default_offset_x() -> f64 { 20.0 }
fn default_offset_y() -> f64 { -60.0 }
fn default_content_width() -> f64 { 200.0 }
fn default_content_height() -> f64 { 100.0 }
fn default_row_height() -> f64 { 20.0 }
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_spacing() -> f64 { chromoview_render::DEFAULT_SPACING }
fn default_margin() -> f64 { 40.0 }
fn default_arm_color() -> String { "#8fb3e3".to_string() }
fn default_centromere_color() -> String { "#c0392b".to_string() }
fn default_selection_color() -> String { "#f2b134".to_string() }
fn default_background_color() -> String { "#ffffff".to_string() }

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            x: default_glyph_x(),
            y: 0.0,
            width: default_glyph_width(),
            per_bp_height: default_per_bp_height(),
            centromeric_width_factor: default_centromeric_width_factor(),
            non_centromeric_x_offset: default_non_centromeric_x_offset(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            dx: default_dx(),
            dy: default_dy(),
            zoom: default_zoom(),
            container_width: default_container_width(),
            container_height: default_container_height(),
            x_bounds: default_x_bounds(),
            y_bounds: default_y_bounds(),
            zoom_bounds: default_zoom_bounds(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            offset_x: default_offset_x(),
            offset_y: default_offset_y(),
            content_width: default_content_width(),
            content_height: default_content_height(),
            row_height: default_row_height(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            spacing: default_spacing(),
            margin: default_margin(),
            arm_color: default_arm_color(),
            centromere_color: default_centromere_color(),
            selection_color: default_selection_color(),
            background_color: default_background_color(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("chromoview.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: chromoview.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), CliError> {
        let (zoom_min, zoom_max) = self.viewport.zoom_bounds;
        if !(zoom_min > 0.0 && zoom_min <= zoom_max) {
            return Err(CliError::config(format!(
                "viewport.zoom_bounds must satisfy 0 < min <= max, got ({}, {})",
                zoom_min, zoom_max
            )));
        }
        if self.viewport.x_bounds.0 > self.viewport.x_bounds.1
            || self.viewport.y_bounds.0 > self.viewport.y_bounds.1
        {
            return Err(CliError::config("viewport bounds have min > max"));
        }
        if self.glyph.width <= 0.0 || self.glyph.per_bp_height <= 0.0 {
            return Err(CliError::config("glyph width and per_bp_height must be positive"));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(CliError::config("render width and height must be non-zero"));
        }
        Ok(())
    }

    pub fn glyph_geometry(&self) -> GlyphGeometry {
        GlyphGeometry {
            x: self.glyph.x,
            y: self.glyph.y,
            width: self.glyph.width,
            per_bp_height: self.glyph.per_bp_height,
            centromeric_width_factor: self.glyph.centromeric_width_factor,
            non_centromeric_x_offset: self.glyph.non_centromeric_x_offset,
        }
    }

    pub fn initial_transform(&self) -> Transform {
        Transform::new(self.viewport.dx, self.viewport.dy, self.viewport.zoom)
    }

    pub fn viewport_bounds(&self) -> ViewportBounds {
        ViewportBounds {
            x: self.viewport.x_bounds,
            y: self.viewport.y_bounds,
            zoom: self.viewport.zoom_bounds,
        }
    }

    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            offset_x: self.overlay.offset_x,
            offset_y: self.overlay.offset_y,
            content_width: self.overlay.content_width,
            content_height: self.overlay.content_height,
            row_height: self.overlay.row_height,
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            background_color: self.render.background_color.clone(),
            arm_color: self.render.arm_color.clone(),
            centromere_color: self.render.centromere_color.clone(),
            selection_color: self.render.selection_color.clone(),
            ..RenderStyle::default()
        }
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            width: self.render.width,
            height: self.render.height,
            margin: self.render.margin,
            ..ExportConfig::default()
        }
    }
}
