//! Exponential smoothing of the displayed fill level toward the latest reading.

use serde::{Deserialize, Serialize};

use crate::geometry::clamp_percentage;

/// Tuning for [`LevelAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorSettings {
    /// Decay rate of the gap between displayed and target level, per second.
    pub smoothing_factor: f64,
    /// Gap in percentage points below which the displayed level snaps to the target.
    pub snap_epsilon: f64,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.5,
            snap_epsilon: 0.01,
        }
    }
}

/// Advance a displayed percentage toward `target` by one frame of `dt` seconds.
///
/// The blend factor `smoothing_factor * dt` is capped at one so long frames land on the
/// target instead of overshooting it. A non-positive or non-finite `dt` leaves the
/// level where it is.
///
/// # Examples
/// ```
/// use silofill::{advance, AnimatorSettings};
///
/// let settings = AnimatorSettings::default();
/// let next = advance(0.0, 50.0, 0.1, &settings);
/// assert!((next - 2.5).abs() < 1.0e-12);
/// assert_eq!(advance(49.995, 50.0, 0.1, &settings), 50.0);
/// ```
#[must_use]
pub fn advance(displayed: f64, target: f64, dt: f64, settings: &AnimatorSettings) -> f64 {
    if !(dt > 0.0 && dt.is_finite()) {
        return clamp_percentage(displayed);
    }
    let target = clamp_percentage(target);
    let blend = (settings.smoothing_factor * dt).clamp(0.0, 1.0);
    let next = clamp_percentage(displayed + (target - displayed) * blend);
    if (target - next).abs() < settings.snap_epsilon {
        target
    } else {
        next
    }
}

/// Displayed fill level of one silo, chasing the most recent telemetry reading.
///
/// # Examples
/// ```
/// use silofill::LevelAnimator;
///
/// let mut animator = LevelAnimator::default();
/// assert!(!animator.has_data());
/// animator.set_target(64.0);
/// for _ in 0..600 {
///     animator.tick(1.0 / 60.0);
/// }
/// assert!((animator.displayed() - 64.0).abs() < 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LevelAnimator {
    /// Latest reading, absent until telemetry arrives.
    target: Option<f64>,
    /// Level currently shown to the user.
    displayed: f64,
    /// Smoothing parameters.
    settings: AnimatorSettings,
}

impl LevelAnimator {
    /// Create an animator with no reading, showing an empty silo.
    #[must_use]
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            target: None,
            displayed: 0.0,
            settings,
        }
    }

    /// Create an animator already resting at a known reading.
    #[must_use]
    pub fn starting_at(settings: AnimatorSettings, percentage: f64) -> Self {
        let percentage = clamp_percentage(percentage);
        Self {
            target: Some(percentage),
            displayed: percentage,
            settings,
        }
    }

    /// Record a new reading. Values outside `[0, 100]` are clamped; non-finite values
    /// are dropped and the previous reading stays in effect.
    pub fn set_target(&mut self, percentage: f64) {
        if !percentage.is_finite() {
            log::warn!("ignoring non-finite fill reading {percentage}");
            return;
        }
        let clamped = clamp_percentage(percentage);
        if clamped != percentage {
            log::debug!("clamped fill reading {percentage} to {clamped}");
        }
        self.target = Some(clamped);
    }

    /// Advance the displayed level by `dt` seconds and return it.
    ///
    /// Ticks with a non-positive or non-finite `dt` are ignored.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if !(dt > 0.0 && dt.is_finite()) {
            log::warn!("ignoring animator tick with invalid delta {dt}");
            return self.displayed;
        }
        if let Some(target) = self.target {
            self.displayed = advance(self.displayed, target, dt, &self.settings);
        }
        self.displayed
    }

    /// Level currently shown, always within `[0, 100]`.
    #[must_use]
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    /// Latest reading, if any has arrived.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Whether at least one reading has arrived.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.target.is_some()
    }

    /// Whether the displayed level has reached the latest reading.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.target.map_or(true, |target| target == self.displayed)
    }
}

impl Default for LevelAnimator {
    fn default() -> Self {
        Self::new(AnimatorSettings::default())
    }
}
