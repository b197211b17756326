//! Particle configuration supplied by the UI.
//!
//! A [`ParticleConfig`] is an immutable snapshot: the UI builds a new one (or
//! merges a [`ConfigUpdate`]) and hands it to the particle system, which
//! regenerates the cloud only when the shape or count changed.
//!
//! Configs serialize to JSON so they can be saved and loaded by the runner:
//!
//! ```json
//! { "shape": "Heart", "count": 6000, "size": 0.15, "color": "#00ffff" }
//! ```

use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// The surfaces a particle cloud can be sampled from.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Thin spherical shell of radius 4 to 4.5.
    Sphere,
    /// Filled implicit heart surface.
    #[default]
    Heart,
    /// Tilted planet with a wide ring.
    Saturn,
    /// Five-petal rose surface, flattened along z.
    Flower,
    /// Torus with major radius 5 and minor radius 1.5.
    Torus,
}

impl ShapeKind {
    /// Every shape, in menu order.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Sphere,
        ShapeKind::Heart,
        ShapeKind::Saturn,
        ShapeKind::Flower,
        ShapeKind::Torus,
    ];

    /// Display name, also used in config files.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Heart => "Heart",
            ShapeKind::Saturn => "Saturn",
            ShapeKind::Flower => "Flower",
            ShapeKind::Torus => "Torus",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ConfigError;

    /// Case-insensitive lookup by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownShape(s.to_string()))
    }
}

/// An RGB particle color with channels in 0.0-1.0.
///
/// Stored as a `#rrggbb` string in config files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub Vec3);

impl Color {
    /// Cyan, the default particle color.
    pub const CYAN: Color = Color(Vec3::new(0.0, 1.0, 1.0));

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| invalid())
        };

        Ok(Color(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self
            .0
            .clamp(Vec3::ZERO, Vec3::ONE)
            .to_array()
            .map(|c| (c * 255.0).round() as u8);
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Color as an RGB vector.
    #[inline]
    pub fn rgb(&self) -> Vec3 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::CYAN
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Snapshot of the user-facing particle settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Surface the cloud is sampled from.
    pub shape: ShapeKind,
    /// Number of particles.
    pub count: usize,
    /// Rendered point size, in world units.
    pub size: f32,
    /// Particle color.
    pub color: Color,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Heart,
            count: 6000,
            size: 0.15,
            color: Color::CYAN,
        }
    }
}

impl ParticleConfig {
    /// Create a config with the default size and color.
    pub fn new(shape: ShapeKind, count: usize) -> Self {
        Self {
            shape,
            count,
            ..Default::default()
        }
    }

    /// Set the particle size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the particle color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Reject configs the particle system cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ParticleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save this config as a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Merge a partial update, returning the new config.
    ///
    /// The result is not validated; callers pass it through
    /// [`validate`](Self::validate) before use.
    pub fn merged(&self, update: &ConfigUpdate) -> Self {
        Self {
            shape: update.shape.unwrap_or(self.shape),
            count: update.count.unwrap_or(self.count),
            size: update.size.unwrap_or(self.size),
            color: update.color.unwrap_or(self.color),
        }
    }

    /// Whether switching to `other` requires resampling the cloud.
    ///
    /// Size and color only affect rendering.
    pub fn needs_regeneration(&self, other: &ParticleConfig) -> bool {
        self.shape != other.shape || self.count != other.count
    }
}

/// A partial config change, as produced by a single UI control.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigUpdate {
    pub shape: Option<ShapeKind>,
    pub count: Option<usize>,
    pub size: Option<f32>,
    pub color: Option<Color>,
}

impl ConfigUpdate {
    pub fn shape(shape: ShapeKind) -> Self {
        Self {
            shape: Some(shape),
            ..Default::default()
        }
    }

    pub fn count(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Default::default()
        }
    }

    pub fn size(size: f32) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParticleConfig::default();
        assert_eq!(config.shape, ShapeKind::Heart);
        assert_eq!(config.count, 6000);
        assert!((config.size - 0.15).abs() < 1e-6);
        assert_eq!(config.color.to_hex(), "#00ffff");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("torus".parse::<ShapeKind>().unwrap(), ShapeKind::Torus);
        assert_eq!("Saturn".parse::<ShapeKind>().unwrap(), ShapeKind::Saturn);
        assert!(matches!(
            "Cube".parse::<ShapeKind>(),
            Err(ConfigError::UnknownShape(name)) if name == "Cube"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_count() {
        let config = ParticleConfig::new(ShapeKind::Sphere, 0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCount)));
    }

    #[test]
    fn test_validate_rejects_bad_size() {
        let config = ParticleConfig::default().with_size(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSize(_))));

        let config = ParticleConfig::default().with_size(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_color_hex() {
        let color = Color::from_hex("#ff8000").unwrap();
        assert!((color.rgb().x - 1.0).abs() < 1e-6);
        assert!((color.rgb().y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.rgb().z, 0.0);
        assert_eq!(color.to_hex(), "#ff8000");

        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#+f+f+f").is_err());
        assert!(Color::from_hex("##ffffff").is_err());
        assert!(Color::from_hex("##ff8000").is_err());
        assert_eq!(Color::from_hex("ff8000").unwrap(), color);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ParticleConfig::new(ShapeKind::Flower, 1234)
            .with_color(Color::from_hex("#aa00ff").unwrap());
        let json = config.to_json().unwrap();
        assert!(json.contains("\"Flower\""));
        assert!(json.contains("#aa00ff"));
        assert_eq!(ParticleConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r##"{ "shape": "Torus", "count": 0, "size": 0.1, "color": "#ffffff" }"##;
        assert!(matches!(
            ParticleConfig::from_json(json),
            Err(ConfigError::ZeroCount)
        ));

        let json = r##"{ "shape": "Cube", "count": 10, "size": 0.1, "color": "#ffffff" }"##;
        assert!(matches!(ParticleConfig::from_json(json), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_merge_and_regeneration() {
        let base = ParticleConfig::default();

        let recolored = base.merged(&ConfigUpdate::color(Color(Vec3::ONE)));
        assert!(!base.needs_regeneration(&recolored));

        let resized = base.merged(&ConfigUpdate::count(3000));
        assert_eq!(resized.count, 3000);
        assert!(base.needs_regeneration(&resized));

        let reshaped = base.merged(&ConfigUpdate::shape(ShapeKind::Torus));
        assert!(base.needs_regeneration(&reshaped));
    }
}
