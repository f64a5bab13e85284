//! Shape of a cone-bottomed silo and the volumes derived from it.
//!
//! All positions are expressed in the silo's local frame: the origin sits at the
//! centre of the cylindrical body and `+y` points up, so the body spans
//! `[-h_cyl / 2, h_cyl / 2]` and the cone apex sits at `-h_cyl / 2 - h_cone`.

use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;
use uom::si::length::meter;

use crate::errors::{Dimension, GeometryError};

/// Position in the silo's local frame measured in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset along the local X axis.
    pub x: f64,
    /// Height along the local vertical axis.
    pub y: f64,
    /// Horizontal offset along the local Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Distance from the vertical axis of the silo.
    #[must_use]
    pub fn radial_distance(self) -> f64 {
        self.x.hypot(self.z)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use silofill::point;
///
/// let apex = point(0.0, -9.94, 0.0);
/// assert_eq!(apex.y, -9.94);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Unvalidated silo dimensions in metres, as they appear in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Radius at the rim of the conical skirt.
    pub cone_radius: f64,
    /// Height of the conical skirt.
    pub cone_height: f64,
    /// Radius of the cylindrical body.
    pub cylinder_radius: f64,
    /// Height of the cylindrical body.
    pub cylinder_height: f64,
}

impl Dimensions {
    /// Check every dimension, reporting the first one that is not positive and finite.
    fn validate(&self) -> Result<(), GeometryError> {
        let checks = [
            (Dimension::ConeRadius, self.cone_radius),
            (Dimension::ConeHeight, self.cone_height),
            (Dimension::CylinderRadius, self.cylinder_radius),
            (Dimension::CylinderHeight, self.cylinder_height),
        ];
        for (dimension, value) in checks {
            if !(value > 0.0 && value.is_finite()) {
                return Err(GeometryError::NonPositiveDimension { dimension, value });
            }
        }
        Ok(())
    }
}

/// Internal volumes of a silo in cubic metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volumes {
    /// Volume of the conical skirt.
    pub cone: f64,
    /// Volume of the cylindrical body.
    pub cylinder: f64,
    /// Sum of the cone and cylinder volumes.
    pub total: f64,
}

/// Compute the internal volumes of a silo from raw dimensions.
///
/// # Errors
///
/// Returns [`GeometryError::NonPositiveDimension`] when any dimension is not strictly
/// positive and [`GeometryError::DegenerateVolume`] when the volume overflows or vanishes.
///
/// # Examples
/// ```
/// use silofill::{compute_volumes, Dimensions};
///
/// let volumes = compute_volumes(&Dimensions {
///     cone_radius: 1.0,
///     cone_height: 3.0,
///     cylinder_radius: 1.0,
///     cylinder_height: 1.0,
/// })
/// .expect("valid dimensions");
/// assert!((volumes.cone - std::f64::consts::PI).abs() < 1.0e-12);
/// assert!((volumes.total - 2.0 * std::f64::consts::PI).abs() < 1.0e-12);
/// ```
pub fn compute_volumes(dimensions: &Dimensions) -> Result<Volumes, GeometryError> {
    SiloGeometry::try_from(*dimensions)?.checked_volumes()
}

/// Validated, immutable shape of a silo: a cylinder standing on an inverted cone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Dimensions", into = "Dimensions")]
pub struct SiloGeometry {
    /// Radius at the rim of the conical skirt in metres.
    cone_radius: f64,
    /// Height of the conical skirt in metres.
    cone_height: f64,
    /// Radius of the cylindrical body in metres.
    cylinder_radius: f64,
    /// Height of the cylindrical body in metres.
    cylinder_height: f64,
}

impl SiloGeometry {
    /// Create a geometry from dimensions in metres.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveDimension`] naming the first dimension that is
    /// zero, negative or not finite.
    ///
    /// # Examples
    /// ```
    /// use silofill::SiloGeometry;
    ///
    /// let silo = SiloGeometry::new(2.345, 3.29, 2.345, 13.30).expect("valid silo");
    /// assert!((silo.total_height() - 16.59).abs() < 1.0e-12);
    /// ```
    pub fn new(
        cone_radius: f64,
        cone_height: f64,
        cylinder_radius: f64,
        cylinder_height: f64,
    ) -> Result<Self, GeometryError> {
        Self::try_from(Dimensions {
            cone_radius,
            cone_height,
            cylinder_radius,
            cylinder_height,
        })
    }

    /// Create a geometry from typed lengths expressed in any unit.
    ///
    /// # Errors
    ///
    /// Fails exactly like [`SiloGeometry::new`] once the lengths are converted to metres.
    ///
    /// # Examples
    /// ```
    /// use silofill::SiloGeometry;
    /// use uom::si::f64::Length;
    /// use uom::si::length::{centimeter, meter};
    ///
    /// let silo = SiloGeometry::from_lengths(
    ///     Length::new::<centimeter>(234.5),
    ///     Length::new::<meter>(3.29),
    ///     Length::new::<centimeter>(234.5),
    ///     Length::new::<meter>(13.30),
    /// )
    /// .expect("valid silo");
    /// assert!((silo.cylinder_radius() - 2.345).abs() < 1.0e-12);
    /// ```
    pub fn from_lengths(
        cone_radius: Length,
        cone_height: Length,
        cylinder_radius: Length,
        cylinder_height: Length,
    ) -> Result<Self, GeometryError> {
        Self::new(
            cone_radius.get::<meter>(),
            cone_height.get::<meter>(),
            cylinder_radius.get::<meter>(),
            cylinder_height.get::<meter>(),
        )
    }

    /// Radius at the rim of the conical skirt in metres.
    #[must_use]
    pub fn cone_radius(&self) -> f64 {
        self.cone_radius
    }

    /// Height of the conical skirt in metres.
    #[must_use]
    pub fn cone_height(&self) -> f64 {
        self.cone_height
    }

    /// Radius of the cylindrical body in metres.
    #[must_use]
    pub fn cylinder_radius(&self) -> f64 {
        self.cylinder_radius
    }

    /// Height of the cylindrical body in metres.
    #[must_use]
    pub fn cylinder_height(&self) -> f64 {
        self.cylinder_height
    }

    /// Return the raw dimensions of this geometry.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            cone_radius: self.cone_radius,
            cone_height: self.cone_height,
            cylinder_radius: self.cylinder_radius,
            cylinder_height: self.cylinder_height,
        }
    }

    /// Internal volumes of the silo.
    #[must_use]
    pub fn volumes(&self) -> Volumes {
        let cylinder = PI * self.cylinder_radius.powi(2) * self.cylinder_height;
        let cone = PI * self.cone_radius.powi(2) * self.cone_height / 3.0;
        Volumes {
            cone,
            cylinder,
            total: cone + cylinder,
        }
    }

    /// Internal volumes of the silo, rejecting results that overflow or underflow.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateVolume`] when any volume is not positive and finite.
    pub fn checked_volumes(&self) -> Result<Volumes, GeometryError> {
        let volumes = self.volumes();
        let usable = |volume: f64| volume > 0.0 && volume.is_finite();
        if usable(volumes.cone) && usable(volumes.cylinder) && usable(volumes.total) {
            Ok(volumes)
        } else {
            Err(GeometryError::DegenerateVolume {
                volume: volumes.total,
            })
        }
    }

    /// Return the same shape with both radii reduced by `fraction` of their nominal value.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidInset`] unless `fraction` lies in `[0, 1)`; a
    /// negative fraction would widen the envelope past the shell.
    pub fn inset(&self, fraction: f64) -> Result<Self, GeometryError> {
        if !(0.0..1.0).contains(&fraction) {
            return Err(GeometryError::InvalidInset { fraction });
        }
        let keep = 1.0 - fraction;
        Self::new(
            self.cone_radius * keep,
            self.cone_height,
            self.cylinder_radius * keep,
            self.cylinder_height,
        )
    }

    /// Combined height of cone and cylinder.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.cone_height + self.cylinder_height
    }

    /// Height of the cone apex, the lowest point inside the silo.
    #[must_use]
    pub fn cone_bottom_y(&self) -> f64 {
        self.cylinder_base_y() - self.cone_height
    }

    /// Height where the cone rim meets the cylindrical body.
    #[must_use]
    pub fn cylinder_base_y(&self) -> f64 {
        -self.cylinder_height / 2.0
    }

    /// Height of the top of the cylindrical body.
    #[must_use]
    pub fn cylinder_top_y(&self) -> f64 {
        self.cylinder_height / 2.0
    }

    /// Height of the fill line for a percentage, interpolated linearly over the silo height.
    ///
    /// Percentages outside `[0, 100]` are clamped, so the result always lies between
    /// [`cone_bottom_y`](Self::cone_bottom_y) and [`cylinder_top_y`](Self::cylinder_top_y).
    #[must_use]
    pub fn fill_line_y(&self, percentage: f64) -> f64 {
        let fraction = clamp_percentage(percentage) / 100.0;
        let fill_height = self.total_height() * fraction - self.cone_height;
        self.cylinder_base_y() + fill_height
    }
}

impl TryFrom<Dimensions> for SiloGeometry {
    type Error = GeometryError;

    fn try_from(value: Dimensions) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            cone_radius: value.cone_radius,
            cone_height: value.cone_height,
            cylinder_radius: value.cylinder_radius,
            cylinder_height: value.cylinder_height,
        })
    }
}

impl From<SiloGeometry> for Dimensions {
    fn from(value: SiloGeometry) -> Self {
        value.dimensions()
    }
}

/// Clamp a percentage to `[0, 100]`, mapping `NaN` to zero.
#[must_use]
pub fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    }
}
