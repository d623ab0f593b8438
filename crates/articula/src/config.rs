//! Joint and animation parameters, loadable from TOML.
//!
//! Every field is optional in the file; missing values fall back to the
//! defaults below. Lengths are millimetres, angles degrees.

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Hinge dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HingeParams {
    /// Radius of the male barrel.
    pub barrel_radius: f64,
    /// Length of the barrel along the hinge axis.
    pub barrel_length: f64,
    /// Saddle wall thickness.
    pub saddle_wall: f64,
    /// Saddle length along the hinge axis.
    pub saddle_width: f64,
    /// Radial gap between barrel and saddle.
    pub clearance: f64,
    /// Total swing; the range is symmetric about zero.
    pub max_angle_deg: f64,
    /// Radius of the connector rod.
    pub connector_radius: f64,
    /// Length of the connector rod.
    pub connector_length: f64,
    /// Facets around the barrel and saddle.
    pub sections: u32,
    /// Facets around the connector.
    pub connector_sections: u32,
}

impl Default for HingeParams {
    fn default() -> Self {
        Self {
            barrel_radius: 6.0,
            barrel_length: 22.0,
            saddle_wall: 3.0,
            saddle_width: 16.0,
            clearance: 0.4,
            max_angle_deg: 120.0,
            connector_radius: 5.0,
            connector_length: 18.0,
            sections: 64,
            connector_sections: 48,
        }
    }
}

/// The hinge between the ball stud and the slider in the chain rig.
///
/// Same fields as [`HingeParams`], but a thinner, longer connector and a
/// saddle as long as the barrel. Keys missing from `[chain_hinge]` fall back
/// to these values, not to the elbow hinge's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChainHingeParams(pub HingeParams);

impl Default for ChainHingeParams {
    fn default() -> Self {
        Self(HingeParams {
            saddle_width: 22.0,
            clearance: 0.4,
            connector_radius: 3.0,
            connector_length: 20.0,
            ..HingeParams::default()
        })
    }
}

impl<'de> Deserialize<'de> for ChainHingeParams {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let given = toml::Table::deserialize(deserializer)?;
        let mut merged = match toml::Value::try_from(Self::default().0) {
            Ok(toml::Value::Table(table)) => table,
            Ok(other) => {
                return Err(D::Error::custom(format!(
                    "chain hinge defaults serialized to {}",
                    other.type_str()
                )))
            }
            Err(e) => return Err(D::Error::custom(e)),
        };
        for (key, value) in given {
            merged.insert(key, value);
        }
        toml::Value::Table(merged)
            .try_into()
            .map(Self)
            .map_err(D::Error::custom)
    }
}

/// Ball joint dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallParams {
    /// Radius of the ball.
    pub ball_radius: f64,
    /// Radial gap between ball and socket.
    pub clearance: f64,
    /// Socket wall thickness.
    pub socket_thickness: f64,
    /// Radius of the stud leaving the ball.
    pub stud_radius: f64,
    /// Length of the stud.
    pub stud_length: f64,
    /// Facets around the stud.
    pub stud_sections: u32,
    /// Icosphere subdivision level for ball and socket.
    pub subdivisions: u32,
    /// Total swing per axis; each range is symmetric about zero.
    pub max_angle_deg: f64,
    /// Height of the socket cut plane; everything above it is removed.
    pub socket_trim_height: f64,
}

impl Default for BallParams {
    fn default() -> Self {
        Self {
            ball_radius: 10.0,
            clearance: 0.4,
            socket_thickness: 3.0,
            stud_radius: 3.0,
            stud_length: 20.0,
            stud_sections: 32,
            subdivisions: 3,
            max_angle_deg: 60.0,
            socket_trim_height: 0.0,
        }
    }
}

/// Slider dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderParams {
    /// Radius of the rail.
    pub rail_radius: f64,
    /// Length of the rail.
    pub rail_length: f64,
    /// Length of the carriage collar.
    pub carriage_length: f64,
    /// Radial gap between rail and carriage.
    pub clearance: f64,
    /// Carriage wall thickness; thicker than the hinge and ball walls.
    pub carriage_wall: f64,
    /// Facets around rail and carriage.
    pub sections: u32,
}

impl Default for SliderParams {
    fn default() -> Self {
        Self {
            rail_radius: 5.0,
            rail_length: 45.0,
            carriage_length: 18.0,
            clearance: 0.4,
            carriage_wall: 4.0,
            sections: 64,
        }
    }
}

/// Sampling of the canned animation tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    /// Samples in the single-hinge sweep.
    pub hinge_samples: usize,
    /// Samples per track in the ball/hinge/slider chain.
    pub chain_samples: usize,
    /// Index stride of the ball's second axis.
    pub ball_secondary_stride: usize,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            hinge_samples: 160,
            chain_samples: 120,
            ball_secondary_stride: 2,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticulaConfig {
    /// `[hinge]` section, the single-hinge rig.
    pub hinge: HingeParams,
    /// `[chain_hinge]` section, the hinge inside the chain rig.
    pub chain_hinge: ChainHingeParams,
    /// `[ball]` section.
    pub ball: BallParams,
    /// `[slider]` section.
    pub slider: SliderParams,
    /// `[animation]` section.
    pub animation: AnimationParams,
}

impl ArticulaConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JointError;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = ArticulaConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ArticulaConfig::default());
        assert_eq!(cfg.hinge.barrel_radius, 6.0);
        assert_eq!(cfg.ball.stud_sections, 32);
        assert_eq!(cfg.slider.rail_length, 45.0);
        assert_eq!(cfg.animation.hinge_samples, 160);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = ArticulaConfig::from_toml_str(
            r#"
            [hinge]
            clearance = 0.25

            [animation]
            chain_samples = 60
            "#,
        )
        .unwrap();
        assert_eq!(cfg.hinge.clearance, 0.25);
        assert_eq!(cfg.hinge.saddle_wall, 3.0);
        assert_eq!(cfg.animation.chain_samples, 60);
        assert_eq!(cfg.ball, BallParams::default());
    }

    #[test]
    fn chain_hinge_has_its_own_defaults() {
        let cfg = ArticulaConfig::from_toml_str(
            r#"
            [chain_hinge]
            sections = 24
            "#,
        )
        .unwrap();
        let chain = &cfg.chain_hinge.0;
        assert_eq!(chain.sections, 24);
        assert_eq!(chain.connector_radius, 3.0);
        assert_eq!(chain.connector_length, 20.0);
        assert_eq!(chain.saddle_width, 22.0);
        assert_eq!(chain.clearance, 0.4);
        assert_eq!(chain.barrel_radius, cfg.hinge.barrel_radius);
        assert_eq!(cfg.hinge, HingeParams::default());
        assert_eq!(cfg.hinge.connector_length, 18.0);
    }

    #[test]
    fn carriage_wall_is_the_thickest() {
        let cfg = ArticulaConfig::default();
        assert_eq!(cfg.slider.carriage_wall, 4.0);
        assert!(cfg.slider.carriage_wall > cfg.hinge.saddle_wall);
        assert!(cfg.slider.carriage_wall > cfg.chain_hinge.0.saddle_wall);
        assert!(cfg.slider.carriage_wall > cfg.ball.socket_thickness);
    }

    #[test]
    fn chain_hinge_rejects_bad_types() {
        let err =
            ArticulaConfig::from_toml_str("[chain_hinge]\nclearance = \"loose\"").unwrap_err();
        assert!(matches!(err, JointError::Config(_)));
    }

    #[test]
    fn serialize_round_trip() {
        let mut cfg = ArticulaConfig::default();
        cfg.ball.socket_trim_height = 2.5;
        cfg.chain_hinge.0.connector_length = 25.0;
        let text = toml::to_string(&cfg).unwrap();
        assert_eq!(ArticulaConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn bad_types_are_config_errors() {
        let err = ArticulaConfig::from_toml_str("[hinge]\nsections = \"many\"").unwrap_err();
        assert!(matches!(err, JointError::Config(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ArticulaConfig::load("/nonexistent/articula.toml").unwrap_err();
        assert!(matches!(err, JointError::Io(_)));
    }
}
