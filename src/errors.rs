//! Error types produced while configuring silos or reading their fill state.

use std::fmt;

use thiserror::Error;

use crate::board::SiloId;

/// One of the four physical dimensions that describe a silo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// Radius at the wide end of the conical skirt.
    ConeRadius,
    /// Height of the conical skirt from apex to rim.
    ConeHeight,
    /// Radius of the cylindrical body.
    CylinderRadius,
    /// Height of the cylindrical body.
    CylinderHeight,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::ConeRadius => "cone radius",
            Dimension::ConeHeight => "cone height",
            Dimension::CylinderRadius => "cylinder radius",
            Dimension::CylinderHeight => "cylinder height",
        };
        f.write_str(name)
    }
}

/// Error returned when silo dimensions cannot describe a physical container.
///
/// # Examples
///
/// ```
/// use silofill::{Dimension, GeometryError, SiloGeometry};
///
/// let error = SiloGeometry::new(2.0, 3.0, 2.0, -1.0).expect_err("negative height rejected");
/// assert_eq!(
///     error,
///     GeometryError::NonPositiveDimension {
///         dimension: Dimension::CylinderHeight,
///         value: -1.0,
///     }
/// );
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when a dimension is zero, negative or not a finite number.
    #[error("{dimension} must be positive and finite (received {value})")]
    NonPositiveDimension {
        /// Which dimension was rejected.
        dimension: Dimension,
        /// Rejected value in metres.
        value: f64,
    },
    /// Returned when the dimensions are individually valid but the derived volume is not.
    #[error("silo volume is not a positive finite number (computed {volume} m³)")]
    DegenerateVolume {
        /// Offending total volume in cubic metres.
        volume: f64,
    },
    /// Returned when a radius inset would not leave the fill envelope inside the shell.
    #[error("radius inset must lie in [0, 1) (received {fraction})")]
    InvalidInset {
        /// Rejected fraction of the nominal radii.
        fraction: f64,
    },
}

/// Error returned when addressing silos on a [`SiloBoard`](crate::SiloBoard).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SiloError {
    /// Returned when no silo is registered under the identifier.
    #[error("silo {0} is not registered on this board")]
    UnknownSilo(SiloId),
    /// Returned when registering a silo whose identifier is already taken.
    #[error("silo {0} is already registered on this board")]
    DuplicateSilo(SiloId),
    /// Returned when the silo exists but its geometry could not be built.
    ///
    /// Hosts should draw a placeholder for this silo and keep rendering the others.
    #[error("silo {silo} has invalid geometry: {source}")]
    InvalidGeometry {
        /// Identifier of the affected silo.
        silo: SiloId,
        /// Reason the geometry was rejected.
        #[source]
        source: GeometryError,
    },
}

/// Error returned while loading a board configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the configuration is not valid JSON for the expected layout.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
