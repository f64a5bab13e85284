//! Registry of silo views fed by telemetry and ticked by the host renderer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{BoardConfig, ViewSettings};
use crate::errors::{GeometryError, SiloError};
use crate::fill::FillSolid;
use crate::geometry::{Dimensions, Point, SiloGeometry};
use crate::status::{FillStatus, Region};
use crate::view::SiloView;

/// Identifier of a silo as used by the telemetry source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiloId(pub u32);

impl fmt::Display for SiloId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Callback receiving the region under the pointer, or `None` when the pointer leaves.
pub type HoverListener = Box<dyn FnMut(SiloId, Option<Region>)>;

/// A registered silo: either renderable or a placeholder for a broken geometry.
#[derive(Clone, Debug)]
enum Slot {
    /// Healthy silo with live state.
    Ready(Box<SiloView>),
    /// Silo whose geometry was rejected; drawn as a placeholder.
    Placeholder(GeometryError),
}

/// Read-only summary of one silo for overlays such as readouts and progress bars.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiloSnapshot {
    /// Identifier of the silo.
    pub id: SiloId,
    /// Level currently shown.
    pub displayed_percentage: f64,
    /// Latest reading, if any.
    pub target_percentage: Option<f64>,
    /// Status band of the latest reading.
    pub status: Option<FillStatus>,
    /// Readout text for the displayed level.
    pub readout: String,
}

/// Collection of silo views keyed by [`SiloId`].
///
/// Failures are isolated per silo: a silo with invalid dimensions is kept as a
/// placeholder and reports [`SiloError::InvalidGeometry`] while the others keep
/// animating.
///
/// # Examples
/// ```
/// use silofill::{Dimensions, SiloBoard, SiloId, ViewSettings};
///
/// let mut board = SiloBoard::new(ViewSettings::default());
/// let id = SiloId(1);
/// board
///     .add_silo(id, Dimensions {
///         cone_radius: 2.345,
///         cone_height: 3.29,
///         cylinder_radius: 2.345,
///         cylinder_height: 13.30,
///     })
///     .expect("new silo");
/// board.set_target_percentage(id, 64.0).expect("known silo");
/// for _ in 0..600 {
///     board.tick(1.0 / 60.0);
/// }
/// let level = board.current_displayed_percentage(id).expect("healthy silo");
/// assert!((level - 64.0).abs() < 0.5);
/// ```
pub struct SiloBoard {
    /// Registered silos in identifier order.
    silos: BTreeMap<SiloId, Slot>,
    /// Tuning applied to every new view.
    settings: ViewSettings,
    /// Receiver of hover events.
    hover_listener: Option<HoverListener>,
}

impl SiloBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            silos: BTreeMap::new(),
            settings,
            hover_listener: None,
        }
    }

    /// Create a board with every silo listed in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SiloError::DuplicateSilo`] when two entries share an identifier.
    pub fn from_config(config: &BoardConfig) -> Result<Self, SiloError> {
        let mut board = Self::new(config.settings);
        for entry in &config.silos {
            board.add_silo(entry.id, entry.dimensions)?;
        }
        Ok(board)
    }

    /// Register a silo.
    ///
    /// Invalid dimensions do not fail the call; the silo is registered as a placeholder
    /// and its readers return [`SiloError::InvalidGeometry`].
    ///
    /// # Errors
    ///
    /// Returns [`SiloError::DuplicateSilo`] when `id` is already registered.
    pub fn add_silo(&mut self, id: SiloId, dimensions: Dimensions) -> Result<(), SiloError> {
        if self.silos.contains_key(&id) {
            return Err(SiloError::DuplicateSilo(id));
        }
        let slot = match self.build_view(id, dimensions) {
            Ok(view) => {
                log::info!("registered silo {id} ({dimensions:?})");
                Slot::Ready(Box::new(view))
            }
            Err(error) => {
                log::warn!("silo {id} will render as a placeholder: {error}");
                Slot::Placeholder(error)
            }
        };
        self.silos.insert(id, slot);
        Ok(())
    }

    /// Tear down the view of a silo.
    ///
    /// # Errors
    ///
    /// Returns [`SiloError::UnknownSilo`] when `id` is not registered.
    pub fn remove_silo(&mut self, id: SiloId) -> Result<(), SiloError> {
        self.silos
            .remove(&id)
            .map(|_| ())
            .ok_or(SiloError::UnknownSilo(id))
    }

    /// Registered identifiers in ascending order.
    pub fn silo_ids(&self) -> impl Iterator<Item = SiloId> + '_ {
        self.silos.keys().copied()
    }

    /// Number of registered silos, placeholders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.silos.len()
    }

    /// Whether no silo is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.silos.is_empty()
    }

    /// Record the latest telemetry reading for a silo.
    ///
    /// Out-of-range values are clamped. Readings for placeholders are accepted and
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SiloError::UnknownSilo`] when `id` is not registered.
    pub fn set_target_percentage(&mut self, id: SiloId, percentage: f64) -> Result<(), SiloError> {
        match self.silos.get_mut(&id) {
            Some(Slot::Ready(view)) => {
                view.set_target_percentage(percentage);
                Ok(())
            }
            Some(Slot::Placeholder(_)) => Ok(()),
            None => Err(SiloError::UnknownSilo(id)),
        }
    }

    /// Advance every healthy silo by `dt` seconds.
    ///
    /// Ticks with a non-positive or non-finite `dt` are ignored.
    pub fn tick(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            log::warn!("ignoring tick with invalid delta {dt}");
            return;
        }
        for (id, slot) in &mut self.silos {
            if let Slot::Ready(view) = slot {
                if let Err(error) = view.tick(dt) {
                    log::warn!("silo {id} failed to update and is now a placeholder: {error}");
                    *slot = Slot::Placeholder(error);
                }
            }
        }
    }

    /// Renderable view of a silo.
    ///
    /// # Errors
    ///
    /// Returns [`SiloError::UnknownSilo`] for unregistered identifiers and
    /// [`SiloError::InvalidGeometry`] for placeholders.
    pub fn view(&self, id: SiloId) -> Result<&SiloView, SiloError> {
        match self.silos.get(&id) {
            Some(Slot::Ready(view)) => Ok(&**view),
            Some(Slot::Placeholder(source)) => Err(SiloError::InvalidGeometry {
                silo: id,
                source: *source,
            }),
            None => Err(SiloError::UnknownSilo(id)),
        }
    }

    /// Fill solids for the displayed level of a silo, cone segment first.
    ///
    /// # Errors
    ///
    /// Fails like [`SiloBoard::view`].
    pub fn current_fill_solids(&self, id: SiloId) -> Result<&[FillSolid], SiloError> {
        Ok(self.view(id)?.fill_solids())
    }

    /// Level currently shown for a silo.
    ///
    /// # Errors
    ///
    /// Fails like [`SiloBoard::view`].
    pub fn current_displayed_percentage(&self, id: SiloId) -> Result<f64, SiloError> {
        Ok(self.view(id)?.displayed_percentage())
    }

    /// Visible particle positions for a silo.
    ///
    /// # Errors
    ///
    /// Fails like [`SiloBoard::view`].
    pub fn particle_positions(&self, id: SiloId) -> Result<Vec<Point>, SiloError> {
        Ok(self.view(id)?.particle_positions())
    }

    /// Overlay summary for a silo.
    ///
    /// # Errors
    ///
    /// Fails like [`SiloBoard::view`].
    pub fn snapshot(&self, id: SiloId) -> Result<SiloSnapshot, SiloError> {
        let view = self.view(id)?;
        Ok(SiloSnapshot {
            id,
            displayed_percentage: view.displayed_percentage(),
            target_percentage: view.target_percentage(),
            status: view.status(),
            readout: view.readout(),
        })
    }

    /// Install the callback receiving hover events, replacing any previous one.
    pub fn set_hover_listener(&mut self, listener: impl FnMut(SiloId, Option<Region>) + 'static) {
        self.hover_listener = Some(Box::new(listener));
    }

    /// Report that the pointer entered `region` of a silo.
    ///
    /// # Errors
    ///
    /// Returns [`SiloError::UnknownSilo`] when `id` is not registered.
    pub fn pointer_over(&mut self, id: SiloId, region: Region) -> Result<(), SiloError> {
        self.notify_hover(id, Some(region))
    }

    /// Report that the pointer left a silo.
    ///
    /// # Errors
    ///
    /// Returns [`SiloError::UnknownSilo`] when `id` is not registered.
    pub fn pointer_out(&mut self, id: SiloId) -> Result<(), SiloError> {
        self.notify_hover(id, None)
    }

    /// Forward a hover change to the listener, if one is installed.
    fn notify_hover(&mut self, id: SiloId, region: Option<Region>) -> Result<(), SiloError> {
        if !self.silos.contains_key(&id) {
            return Err(SiloError::UnknownSilo(id));
        }
        if let Some(listener) = self.hover_listener.as_mut() {
            listener(id, region);
        }
        Ok(())
    }

    /// Build the view for a new silo, giving it its own particle seed.
    fn build_view(&self, id: SiloId, dimensions: Dimensions) -> Result<SiloView, GeometryError> {
        let geometry = SiloGeometry::try_from(dimensions)?;
        geometry.checked_volumes()?;
        let mut settings = self.settings;
        settings.particles.seed ^= u64::from(id.0).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        SiloView::new(geometry, settings)
    }
}

impl Default for SiloBoard {
    fn default() -> Self {
        Self::new(ViewSettings::default())
    }
}

impl fmt::Debug for SiloBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiloBoard")
            .field("silos", &self.silos)
            .field("settings", &self.settings)
            .field("hover_listener", &self.hover_listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::errors::Dimension;

    const FRAME: f64 = 1.0 / 60.0;

    fn reference_dimensions() -> Dimensions {
        Dimensions {
            cone_radius: 2.345,
            cone_height: 3.29,
            cylinder_radius: 2.345,
            cylinder_height: 13.30,
        }
    }

    #[test]
    fn unknown_silos_are_rejected() {
        let mut board = SiloBoard::default();
        let ghost = SiloId(99);
        assert_eq!(
            board.set_target_percentage(ghost, 10.0),
            Err(SiloError::UnknownSilo(ghost))
        );
        assert_eq!(
            board.current_displayed_percentage(ghost),
            Err(SiloError::UnknownSilo(ghost))
        );
        assert_eq!(board.remove_silo(ghost), Err(SiloError::UnknownSilo(ghost)));
        assert_eq!(board.pointer_out(ghost), Err(SiloError::UnknownSilo(ghost)));
    }

    #[test]
    fn duplicate_silos_are_rejected() {
        let mut board = SiloBoard::default();
        board
            .add_silo(SiloId(1), reference_dimensions())
            .expect("first registration");
        assert_eq!(
            board.add_silo(SiloId(1), reference_dimensions()),
            Err(SiloError::DuplicateSilo(SiloId(1)))
        );
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn invalid_geometry_becomes_placeholder() {
        let mut board = SiloBoard::default();
        let broken = Dimensions {
            cylinder_radius: 0.0,
            ..reference_dimensions()
        };
        board.add_silo(SiloId(3), broken).expect("registration accepted");
        board
            .set_target_percentage(SiloId(3), 40.0)
            .expect("readings for placeholders are dropped");
        board.tick(FRAME);

        let error = board
            .current_fill_solids(SiloId(3))
            .expect_err("placeholder has no solids");
        assert_eq!(
            error,
            SiloError::InvalidGeometry {
                silo: SiloId(3),
                source: GeometryError::NonPositiveDimension {
                    dimension: Dimension::CylinderRadius,
                    value: 0.0,
                },
            }
        );
    }

    #[test]
    fn removed_silos_are_gone() {
        let mut board = SiloBoard::default();
        board
            .add_silo(SiloId(5), reference_dimensions())
            .expect("registration");
        board.remove_silo(SiloId(5)).expect("removal");
        assert!(board.is_empty());
        assert!(board.view(SiloId(5)).is_err());
    }

    #[test]
    fn invalid_ticks_are_ignored() {
        let mut board = SiloBoard::default();
        board
            .add_silo(SiloId(1), reference_dimensions())
            .expect("registration");
        board.set_target_percentage(SiloId(1), 90.0).expect("known silo");
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            board.tick(dt);
        }
        assert_eq!(board.current_displayed_percentage(SiloId(1)), Ok(0.0));
    }

    #[test]
    fn hover_events_reach_the_listener() {
        let mut board = SiloBoard::default();
        board
            .add_silo(SiloId(2), reference_dimensions())
            .expect("registration");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        board.set_hover_listener(move |id, region| sink.borrow_mut().push((id, region)));

        board
            .pointer_over(SiloId(2), Region::LadderRung)
            .expect("known silo");
        board.pointer_out(SiloId(2)).expect("known silo");

        assert_eq!(
            *seen.borrow(),
            vec![
                (SiloId(2), Some(Region::LadderRung)),
                (SiloId(2), None)
            ]
        );
    }

    #[test]
    fn silos_get_distinct_particle_fields() {
        let mut board = SiloBoard::default();
        board
            .add_silo(SiloId(1), reference_dimensions())
            .expect("registration");
        board
            .add_silo(SiloId(2), reference_dimensions())
            .expect("registration");
        let first = board.particle_positions(SiloId(1)).expect("healthy silo");
        let second = board.particle_positions(SiloId(2)).expect("healthy silo");
        assert_ne!(first, second);
    }

    #[test]
    fn snapshot_reports_readout_and_status() {
        let mut board = SiloBoard::default();
        board
            .add_silo(SiloId(4), reference_dimensions())
            .expect("registration");
        let empty = board.snapshot(SiloId(4)).expect("healthy silo");
        assert_eq!(empty.readout, "—");
        assert_eq!(empty.status, None);

        board.set_target_percentage(SiloId(4), 85.0).expect("known silo");
        board.tick(10.0);
        let full = board.snapshot(SiloId(4)).expect("healthy silo");
        assert_eq!(full.readout, "85.0%");
        assert_eq!(full.status, Some(FillStatus::Healthy));
        assert_eq!(full.target_percentage, Some(85.0));
    }
}
