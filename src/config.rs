//! Serde-backed configuration for silo views and boards.
//!
//! Every field has a default, so a configuration file only needs to list the values it
//! changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animator::AnimatorSettings;
use crate::board::SiloId;
use crate::errors::ConfigError;
use crate::fill::DEFAULT_RADIUS_INSET;
use crate::geometry::Dimensions;
use crate::particles::ParticleSettings;

/// Tuning shared by every silo view on a board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Level smoothing.
    pub animator: AnimatorSettings,
    /// Ambient particle pool.
    pub particles: ParticleSettings,
    /// Fraction of the nominal radii removed from fill solids.
    pub radius_inset: f64,
    /// Idle rotation of the shell in radians per second.
    pub rotation_speed: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            animator: AnimatorSettings::default(),
            particles: ParticleSettings::default(),
            radius_inset: DEFAULT_RADIUS_INSET,
            rotation_speed: 0.3,
        }
    }
}

/// One silo listed in a [`BoardConfig`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiloEntry {
    /// Identifier used by telemetry.
    pub id: SiloId,
    /// Human readable name.
    #[serde(default)]
    pub name: Option<String>,
    /// Physical dimensions in metres.
    pub dimensions: Dimensions,
}

/// A set of silos and the view tuning they share.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Tuning for every view.
    pub settings: ViewSettings,
    /// Silos to register, in order.
    pub silos: Vec<SiloEntry>,
}

impl BoardConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid JSON for this layout.
    ///
    /// # Examples
    /// ```
    /// use silofill::BoardConfig;
    ///
    /// let config = BoardConfig::from_json(
    ///     r#"{
    ///         "settings": { "animator": { "smoothing_factor": 1.5 } },
    ///         "silos": [{
    ///             "id": 7,
    ///             "dimensions": {
    ///                 "cone_radius": 2.345, "cone_height": 3.29,
    ///                 "cylinder_radius": 2.345, "cylinder_height": 13.3
    ///             }
    ///         }]
    ///     }"#,
    /// )
    /// .expect("valid configuration");
    /// assert_eq!(config.silos.len(), 1);
    /// assert_eq!(config.settings.animator.smoothing_factor, 1.5);
    /// assert_eq!(config.settings.animator.snap_epsilon, 0.01);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SiloBoard;
    use crate::errors::{GeometryError, SiloError};

    #[test]
    fn empty_document_uses_defaults() {
        let config = BoardConfig::from_json("{}").expect("valid configuration");
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.settings.particles.count, 200);
        assert_eq!(config.settings.radius_inset, DEFAULT_RADIUS_INSET);
    }

    #[test]
    fn invalid_dimensions_still_parse() {
        // Dimensions are validated by the board, not the parser.
        let config = BoardConfig::from_json(
            r#"{"silos":[{"id":1,"name":"North","dimensions":{
                "cone_radius":-1.0,"cone_height":3.0,
                "cylinder_radius":2.0,"cylinder_height":10.0}}]}"#,
        )
        .expect("valid configuration");
        assert_eq!(config.silos[0].id, SiloId(1));
        assert_eq!(config.silos[0].name.as_deref(), Some("North"));
    }

    #[test]
    fn widening_inset_leaves_silo_as_placeholder() {
        let config = BoardConfig::from_json(
            r#"{"settings":{"radius_inset":-0.5},"silos":[{"id":1,"dimensions":{
                "cone_radius":2.345,"cone_height":3.29,
                "cylinder_radius":2.345,"cylinder_height":13.3}}]}"#,
        )
        .expect("valid configuration");
        let mut board = SiloBoard::from_config(&config).expect("unique identifiers");
        board.set_target_percentage(SiloId(1), 100.0).expect("known silo");
        board.tick(1.0);
        assert_eq!(
            board.current_fill_solids(SiloId(1)),
            Err(SiloError::InvalidGeometry {
                silo: SiloId(1),
                source: GeometryError::InvalidInset { fraction: -0.5 },
            })
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = BoardConfig::from_json("{ silos: ").expect_err("malformed json rejected");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let error = BoardConfig::from_path("/nonexistent/silofill/board.json")
            .expect_err("missing file rejected");
        assert!(matches!(error, ConfigError::Io(_)));
    }
}
