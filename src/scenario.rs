use silofill::{BoardConfig, Dimensions, SiloBoard, SiloEntry, SiloError, SiloId, ViewSettings};

/// A telemetry reading scheduled at a point in simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Simulated time of arrival in seconds.
    pub at: f64,
    /// Silo the reading belongs to.
    pub silo: SiloId,
    /// Reported fill percentage, possibly out of range.
    pub percentage: f64,
}

/// Silo catalogue used when no configuration file is given.
///
/// The third entry has a zero cone height so the report shows how a
/// placeholder silo is handled next to healthy ones.
#[must_use]
pub fn default_config() -> BoardConfig {
    let standard = Dimensions {
        cone_radius: 2.345,
        cone_height: 3.29,
        cylinder_radius: 2.345,
        cylinder_height: 13.30,
    };
    BoardConfig {
        settings: ViewSettings::default(),
        silos: vec![
            SiloEntry {
                id: SiloId(1),
                name: Some("North".to_owned()),
                dimensions: standard,
            },
            SiloEntry {
                id: SiloId(2),
                name: Some("South".to_owned()),
                dimensions: Dimensions {
                    cone_radius: 3.0,
                    cone_height: 2.5,
                    cylinder_radius: 3.0,
                    cylinder_height: 9.0,
                },
            },
            SiloEntry {
                id: SiloId(3),
                name: Some("Annex".to_owned()),
                dimensions: Dimensions {
                    cone_height: 0.0,
                    ..standard
                },
            },
        ],
    }
}

/// Telemetry replayed against every silo in `config`.
///
/// Readings arrive every few seconds, the way the dashboard polls its
/// backend, and include one out-of-range value that gets clamped.
#[must_use]
pub fn default_readings(config: &BoardConfig) -> Vec<Reading> {
    let script = [(0.0, 35.0), (4.0, 62.5), (9.0, 120.0), (15.0, 81.0)];
    let mut readings = Vec::new();
    for (offset, entry) in config.silos.iter().enumerate() {
        let stagger = offset as f64 * 0.5;
        for (index, (at, percentage)) in script.iter().enumerate() {
            let drift = (offset * 7 + index * 3) as f64 % 11.0;
            readings.push(Reading {
                at: at + stagger,
                silo: entry.id,
                percentage: percentage - drift,
            });
        }
    }
    readings.sort_by(|a, b| a.at.total_cmp(&b.at));
    readings
}

/// Register every silo from `config` on a fresh board.
pub fn build_board(config: &BoardConfig) -> Result<SiloBoard, SiloError> {
    SiloBoard::from_config(config)
}
