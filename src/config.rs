//! Serializable render configuration.
//!
//! A [`RenderConfig`] carries every style option for one request except the
//! icon itself. The pipeline reads [`theme`](RenderConfig::theme) and
//! [`trim`](RenderConfig::trim); the remaining fields pass through to the
//! icon drawing step untouched.
//!
//! # Example
//!
//! ```
//! use folder_art::{RenderConfig, Theme, TintSettings};
//!
//! let config = RenderConfig::new()
//!     .with_theme(Theme::Dark)
//!     .with_tint(TintSettings { degrees: 180.0, enabled: true });
//!
//! let json = config.to_json().unwrap();
//! let restored = RenderConfig::from_json(&json).unwrap();
//! assert_eq!(restored.theme, Theme::Dark);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Theme
// ============================================================================

/// Folder template variant to composite onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Directory name of this theme's templates under `folders/`.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme `{other}`")),
        }
    }
}

// ============================================================================
// Style Settings
// ============================================================================

/// Hue rotation applied to the icon.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct TintSettings {
    /// Rotation angle in degrees. Normalized to 0-360 when drawn.
    pub degrees: f32,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Monochrome fill: every opaque icon pixel takes this color, keeping its alpha.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct FillSettings {
    /// Hex color, `#rrggbb`.
    pub color: String,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl FillSettings {
    /// Parses [`color`](Self::color) into RGB components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Drop shadow drawn behind the icon, inside the icon canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ShadowSettings {
    /// Gaussian blur sigma as a fraction of the icon canvas' shorter side.
    pub blur: f32,

    /// Downward offset as a fraction of the icon canvas height.
    pub offset_y: f32,

    /// Shadow opacity (0.0-1.0).
    pub opacity: f32,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            blur: 0.02,
            offset_y: 0.02,
            opacity: 0.35,
            enabled: true,
        }
    }
}

/// Largest accepted [`ShadowSettings::blur`].
pub const MAX_SHADOW_BLUR: f32 = 0.25;

/// Largest accepted magnitude of [`ShadowSettings::offset_y`].
pub const MAX_SHADOW_OFFSET: f32 = 1.0;

impl ShadowSettings {
    /// Checks that every field is finite and within drawable range.
    pub fn validate(&self) -> Result<()> {
        if !self.blur.is_finite() || !(0.0..=MAX_SHADOW_BLUR).contains(&self.blur) {
            return Err(Error::InvalidConfig(format!(
                "shadow.blur must be within 0..={MAX_SHADOW_BLUR}, got {}",
                self.blur
            )));
        }
        if !self.offset_y.is_finite() || self.offset_y.abs() > MAX_SHADOW_OFFSET {
            return Err(Error::InvalidConfig(format!(
                "shadow.offsetY must be within -{MAX_SHADOW_OFFSET}..={MAX_SHADOW_OFFSET}, got {}",
                self.offset_y
            )));
        }
        if !self.opacity.is_finite() {
            return Err(Error::InvalidConfig("shadow.opacity must be finite".into()));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

// ============================================================================
// RenderConfig
// ============================================================================

/// Style options for one folder art request.
///
/// # JSON Format
///
/// ```json
/// {
///   "theme": "dark",
///   "tint": { "degrees": 30.0, "enabled": true },
///   "fill": { "color": "#1e6fd9" },
///   "shadow": { "blur": 0.02, "offsetY": 0.02, "opacity": 0.35 },
///   "opacity": 0.9,
///   "trim": true
/// }
/// ```
///
/// Unknown fields, including a stray `icon`, are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(default)]
    pub theme: Theme,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<TintSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowSettings>,

    /// Icon opacity (0.0-1.0).
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Crop fully transparent margins from the source icon before layout.
    #[serde(default = "default_true")]
    pub trim: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            tint: None,
            fill: None,
            shadow: None,
            opacity: default_opacity(),
            trim: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_tint(mut self, settings: TintSettings) -> Self {
        self.tint = Some(settings);
        self
    }

    pub fn with_fill(mut self, settings: FillSettings) -> Self {
        self.fill = Some(settings);
        self
    }

    pub fn with_shadow(mut self, settings: ShadowSettings) -> Self {
        self.shadow = Some(settings);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Returns the tint angle if tinting is configured and enabled.
    pub fn active_tint(&self) -> Option<f32> {
        self.tint
            .as_ref()
            .filter(|t| t.enabled)
            .map(|t| t.degrees.rem_euclid(360.0))
    }

    /// Returns the fill color if a valid fill is configured and enabled.
    pub fn active_fill(&self) -> Option<(u8, u8, u8)> {
        self.fill.as_ref().filter(|f| f.enabled).and_then(FillSettings::rgb)
    }

    pub fn active_shadow(&self) -> Option<&ShadowSettings> {
        self.shadow.as_ref().filter(|s| s.enabled && s.opacity > 0.0)
    }

    /// Opacity clamped to 0.0-1.0.
    pub fn clamped_opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and [validates](Self::validate) a configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects non-finite values and shadow geometry the renderer cannot draw.
    ///
    /// Out-of-range opacities are accepted and clamped when drawn.
    pub fn validate(&self) -> Result<()> {
        if !self.opacity.is_finite() {
            return Err(Error::InvalidConfig("opacity must be finite".into()));
        }
        if let Some(tint) = &self.tint {
            if !tint.degrees.is_finite() {
                return Err(Error::InvalidConfig("tint.degrees must be finite".into()));
            }
        }
        match &self.shadow {
            Some(shadow) => shadow.validate(),
            None => Ok(()),
        }
    }

    /// JSON schema of the configuration document, for front-end validation.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RenderConfig)
    }
}

/// Parses `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let bytes = hex::decode(hex).ok()?;
    Some((bytes[0], bytes[1], bytes[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_serialization_roundtrip() {
        let config = RenderConfig::new()
            .with_theme(Theme::Dark)
            .with_fill(FillSettings {
                color: "#1e6fd9".into(),
                enabled: false,
            })
            .with_opacity(0.5);

        let json = config.to_json().unwrap();
        let restored = RenderConfig::from_json(&json).unwrap();

        assert_eq!(restored, config);
        assert!(restored.active_fill().is_none());
    }

    #[test]
    fn config_json_format() {
        let config = RenderConfig::new().with_shadow(ShadowSettings::default());
        let json = config.to_json_pretty().unwrap();

        assert!(json.contains("\"theme\": \"light\""));
        assert!(json.contains("\"offsetY\""));
        assert!(!json.contains("\"tint\""));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = RenderConfig::from_json("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.opacity, 1.0);
        assert!(config.trim);
    }

    #[test]
    fn icon_field_is_ignored() {
        let config = RenderConfig::from_json(r#"{"icon":"folder","theme":"dark"}"#).unwrap();
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let err = RenderConfig::from_json(r#"{"theme":"sepia"}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn settings_default_to_enabled() {
        let config = RenderConfig::from_json(r#"{"tint":{"degrees":450}}"#).unwrap();
        assert_eq!(config.active_tint(), Some(90.0));
    }

    #[test]
    fn hex_color_parsing() {
        assert_eq!(parse_hex_color("#ff8000"), Some((255, 128, 0)));
        assert_eq!(parse_hex_color("00FF00"), Some((0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn oversized_shadow_is_rejected() {
        let err = RenderConfig::from_json(
            r#"{"shadow":{"blur":1e30,"offsetY":0.0,"opacity":0.5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = RenderConfig::from_json(
            r#"{"shadow":{"blur":0.0,"offsetY":1e10,"opacity":0.5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn validate_checks_ranges() {
        let shadow = |blur, offset_y, opacity| ShadowSettings {
            blur,
            offset_y,
            opacity,
            enabled: true,
        };

        assert!(shadow(0.0, 0.0, 0.0).validate().is_ok());
        assert!(shadow(MAX_SHADOW_BLUR, -1.0, 5.0).validate().is_ok());
        assert!(shadow(-0.1, 0.0, 0.5).validate().is_err());
        assert!(shadow(f32::NAN, 0.0, 0.5).validate().is_err());
        assert!(shadow(0.02, f32::INFINITY, 0.5).validate().is_err());
        assert!(shadow(0.02, 0.02, f32::NAN).validate().is_err());

        let tint = TintSettings {
            degrees: f32::NAN,
            enabled: true,
        };
        assert!(RenderConfig::new().with_tint(tint).validate().is_err());
        assert!(RenderConfig::new().with_opacity(f32::INFINITY).validate().is_err());
        assert!(RenderConfig::new().with_opacity(7.0).validate().is_ok());
    }

    #[test]
    fn opacity_is_clamped() {
        assert_eq!(RenderConfig::new().with_opacity(3.0).clamped_opacity(), 1.0);
        assert_eq!(RenderConfig::new().with_opacity(-1.0).clamped_opacity(), 0.0);
    }
}
