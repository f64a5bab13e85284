//! Partial-volume solids describing the material held inside a silo.
//!
//! Material settles into the cone first, filling it from the apex upward, and only then
//! rises through the cylindrical body. Solids are sized against the fill envelope, a copy
//! of the silo with slightly smaller radii, so that rendered fill never pokes through the
//! shell.

use std::f64::consts::PI;

use serde::Serialize;

use crate::errors::GeometryError;
use crate::geometry::{clamp_percentage, SiloGeometry};

/// Fraction of the nominal radii removed from the fill envelope.
pub const DEFAULT_RADIUS_INSET: f64 = 0.01;

/// Shape of a partial-volume solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SolidKind {
    /// Inverted cone whose apex sits at the bottom of the silo.
    ConeSegment,
    /// Upright cylinder resting on the rim of the cone.
    CylinderSegment,
}

/// Filled portion of one part of the silo, ready to be turned into a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FillSolid {
    /// Which container part this solid occupies.
    pub kind: SolidKind,
    /// Height of the solid in metres.
    pub height: f64,
    /// Radius of the flat top face; for cylinder segments the constant radius.
    pub top_radius: f64,
    /// Height of the solid's vertical centre in the silo's local frame.
    pub y_offset: f64,
}

impl FillSolid {
    /// Height of the lowest point of the solid.
    #[must_use]
    pub fn base_y(&self) -> f64 {
        self.y_offset - self.height / 2.0
    }

    /// Height of the flat top face of the solid.
    #[must_use]
    pub fn top_y(&self) -> f64 {
        self.y_offset + self.height / 2.0
    }

    /// Volume enclosed by the solid in cubic metres.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let disc = PI * self.top_radius.powi(2);
        match self.kind {
            SolidKind::ConeSegment => disc * self.height / 3.0,
            SolidKind::CylinderSegment => disc * self.height,
        }
    }
}

/// Compute the solids for a fill percentage using [`DEFAULT_RADIUS_INSET`].
///
/// The result holds zero, one or two solids: the cone segment first, then the cylinder
/// segment. Percentages outside `[0, 100]` are clamped.
///
/// # Errors
///
/// Returns [`GeometryError`] when the fill envelope has no usable volume.
///
/// # Examples
/// ```
/// use silofill::{solve_fill, SiloGeometry, SolidKind};
///
/// let silo = SiloGeometry::new(2.345, 3.29, 2.345, 13.30).expect("valid silo");
/// let solids = solve_fill(&silo, 50.0).expect("solvable");
/// assert_eq!(solids.len(), 2);
/// assert_eq!(solids[0].kind, SolidKind::ConeSegment);
/// assert!((solids[0].height - silo.cone_height()).abs() < 1.0e-12);
/// ```
pub fn solve_fill(
    geometry: &SiloGeometry,
    percentage: f64,
) -> Result<Vec<FillSolid>, GeometryError> {
    solve_fill_with_inset(geometry, percentage, DEFAULT_RADIUS_INSET)
}

/// Compute the solids for a fill percentage with an explicit radius inset.
///
/// `radius_inset` is the fraction of each nominal radius removed from the fill envelope;
/// the volumes the percentage refers to are those of that envelope.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidInset`] when `radius_inset` is outside `[0, 1)` and
/// [`GeometryError::DegenerateVolume`] when the envelope volume is unusable.
pub fn solve_fill_with_inset(
    geometry: &SiloGeometry,
    percentage: f64,
    radius_inset: f64,
) -> Result<Vec<FillSolid>, GeometryError> {
    let envelope = geometry.inset(radius_inset)?;
    let volumes = envelope.checked_volumes()?;

    let mut remaining = clamp_percentage(percentage) / 100.0 * volumes.total;
    let mut solids = Vec::with_capacity(2);

    if remaining > 0.0 && volumes.cone > 0.0 {
        let volume = remaining.min(volumes.cone);
        // Volume grows with the cube of the height fraction.
        let height = envelope.cone_height() * (volume / volumes.cone).cbrt();
        let top_radius = envelope.cone_radius() * (height / envelope.cone_height());
        solids.push(FillSolid {
            kind: SolidKind::ConeSegment,
            height,
            top_radius,
            y_offset: geometry.cone_bottom_y() + height / 2.0,
        });
        remaining -= volume;
    }

    if remaining > 0.0 && volumes.cylinder > 0.0 {
        let volume = remaining.min(volumes.cylinder);
        let radius = envelope.cylinder_radius();
        let height = volume / (PI * radius * radius);
        solids.push(FillSolid {
            kind: SolidKind::CylinderSegment,
            height,
            top_radius: radius,
            y_offset: geometry.cylinder_base_y() + height / 2.0,
        });
    }

    Ok(solids)
}

/// Combined volume of a set of solids.
#[must_use]
pub fn total_volume(solids: &[FillSolid]) -> f64 {
    solids.iter().map(FillSolid::volume).sum()
}
