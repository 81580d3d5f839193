//! Configuration types for Kin rendering.
//!
//! This module provides configuration structures that control how trees
//! are laid out on the page and styled. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Example
//!
//! ```
//! # use kin::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

use kin_core::{color::Color, style::Palette};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style
    /// configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

fn default_horizontal_spacing() -> f32 {
    180.0
}

fn default_vertical_spacing() -> f32 {
    110.0
}

/// Page-layout spacing for the SVG renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Center-to-center distance between order columns.
    #[serde(default = "default_horizontal_spacing")]
    horizontal_spacing: f32,

    /// Center-to-center distance between levels.
    #[serde(default = "default_vertical_spacing")]
    vertical_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: default_horizontal_spacing(),
            vertical_spacing: default_vertical_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Returns the horizontal spacing between order columns.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Returns the vertical spacing between levels.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }
}

/// Visual styling configuration for rendered trees.
///
/// Colors are stored as CSS color strings and parsed on access; fields
/// that are not set fall back to the default invitation palette.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Fill for invited people bringing a plus-one.
    #[serde(default)]
    plus_one_color: Option<String>,

    /// Fill for invited people without a plus-one.
    #[serde(default)]
    invited_color: Option<String>,

    /// Fill for people not on the guest list.
    #[serde(default)]
    not_invited_color: Option<String>,
}

impl StyleConfig {
    /// Builds the invitation [`Palette`], overriding defaults with any
    /// configured colors.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn palette(&self) -> Result<Palette, String> {
        let mut palette = Palette::default();

        if let Some(color) = &self.plus_one_color {
            palette.invited_plus_one = Self::parse("plus_one_color", color)?;
        }
        if let Some(color) = &self.invited_color {
            palette.invited = Self::parse("invited_color", color)?;
        }
        if let Some(color) = &self.not_invited_color {
            palette.not_invited = Self::parse("not_invited_color", color)?;
        }

        Ok(palette)
    }

    fn parse(field: &str, color: &str) -> Result<Color, String> {
        Color::new(color).map_err(|err| format!("Invalid {field} in config: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let config = AppConfig::default();
        let palette = config.style().palette().unwrap();
        assert_eq!(palette, Palette::default());
    }

    #[test]
    fn test_overridden_color() {
        let config: AppConfig = serde_json::from_str(
            r##"{"style": {"invited_color": "#336699"}}"##,
        )
        .unwrap();

        let palette = config.style().palette().unwrap();
        assert_ne!(palette.invited, Palette::default().invited);
        // Untouched entries keep their defaults
        assert_eq!(palette.not_invited, Palette::default().not_invited);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let config: AppConfig =
            serde_json::from_str(r#"{"style": {"invited_color": "chartreuse-ish"}}"#).unwrap();
        assert!(config.style().palette().is_err());
    }

    #[test]
    fn test_layout_spacing_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().horizontal_spacing(), 180.0);
        assert_eq!(config.layout().vertical_spacing(), 110.0);
    }
}
