//! Status bands, numeric readouts and hover regions shown around a silo model.

use std::fmt;

use serde::Serialize;

use crate::geometry::clamp_percentage;

/// Placeholder shown in place of a percentage before the first reading arrives.
pub const NO_DATA: &str = "—";

/// Coarse classification of a fill level used to colour the fill and progress bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FillStatus {
    /// Below 30%.
    Critical,
    /// From 30% up to 60%.
    Low,
    /// From 60% up to 80%.
    Moderate,
    /// 80% and above.
    Healthy,
}

impl FillStatus {
    /// Classify a fill percentage.
    ///
    /// # Examples
    /// ```
    /// use silofill::FillStatus;
    ///
    /// assert_eq!(FillStatus::from_percentage(80.0), FillStatus::Healthy);
    /// assert_eq!(FillStatus::from_percentage(29.9), FillStatus::Critical);
    /// ```
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        let percentage = clamp_percentage(percentage);
        if percentage >= 80.0 {
            FillStatus::Healthy
        } else if percentage >= 60.0 {
            FillStatus::Moderate
        } else if percentage >= 30.0 {
            FillStatus::Low
        } else {
            FillStatus::Critical
        }
    }

    /// Display colour as a CSS hex string.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            FillStatus::Healthy => "#44ff44",
            FillStatus::Moderate => "#ffdd00",
            FillStatus::Low => "#ffaa00",
            FillStatus::Critical => "#ff4444",
        }
    }
}

impl fmt::Display for FillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FillStatus::Healthy => "healthy",
            FillStatus::Moderate => "moderate",
            FillStatus::Low => "low",
            FillStatus::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Format the numeric readout for a silo, or [`NO_DATA`] when nothing was read yet.
#[must_use]
pub fn readout(percentage: Option<f64>) -> String {
    match percentage {
        Some(percentage) => format!("{:.1}%", clamp_percentage(percentage)),
        None => NO_DATA.to_owned(),
    }
}

/// Structural part of a silo that can be pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    /// The cylindrical body.
    Body,
    /// Rim around the top of the body.
    TopCap,
    /// Flat roof.
    Roof,
    /// Conical skirt under the body.
    ConicalSkirt,
    /// One of the reinforcement rings around the body.
    ReinforcementRing,
    /// One of the rungs of the access ladder.
    LadderRung,
    /// Discharge hopper under the cone apex.
    DischargeHopper,
}

impl Region {
    /// Every region, from top to bottom of the model.
    pub const ALL: [Region; 7] = [
        Region::Roof,
        Region::TopCap,
        Region::Body,
        Region::ReinforcementRing,
        Region::LadderRung,
        Region::ConicalSkirt,
        Region::DischargeHopper,
    ];

    /// Text shown while the pointer rests on the region.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Region::Body => "Silo body",
            Region::TopCap => "Top cap",
            Region::Roof => "Roof",
            Region::ConicalSkirt => "Conical skirt",
            Region::ReinforcementRing => "Reinforcement ring",
            Region::LadderRung => "Ladder rung",
            Region::DischargeHopper => "Discharge hopper",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
