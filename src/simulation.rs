use silofill::{BoardConfig, FillSolid, SiloBoard, SiloError, SiloId, SiloSnapshot};

use crate::scenario::Reading;

/// Frame durations cycled through while replaying, to mimic an uneven frame rate.
const FRAME_PATTERN: [f64; 4] = [1.0 / 60.0, 1.0 / 60.0, 1.0 / 45.0, 1.0 / 75.0];

/// State of one healthy silo at the end of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct SiloOutcome {
    /// Overlay summary.
    pub snapshot: SiloSnapshot,
    /// Fill solids for the final displayed level.
    pub solids: Vec<FillSolid>,
    /// Number of particles the renderer would draw.
    pub visible_particles: usize,
    /// Particles recycled during the replay.
    pub recycled_particles: u64,
}

/// Result of replaying telemetry against one silo.
#[derive(Debug, Clone, PartialEq)]
pub struct SiloReport {
    /// Identifier of the silo.
    pub id: SiloId,
    /// Name from the configuration, if any.
    pub name: Option<String>,
    /// Final state, or the reason the silo could not be rendered.
    pub outcome: Result<SiloOutcome, SiloError>,
}

/// Summary of a whole replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    /// Simulated seconds elapsed.
    pub elapsed: f64,
    /// Frames ticked.
    pub frames: usize,
    /// Readings delivered.
    pub readings: usize,
    /// Per-silo results in configuration order.
    pub silos: Vec<SiloReport>,
}

/// Tick `board` for `duration` simulated seconds, delivering each reading at
/// the first frame boundary at or after its arrival time.
pub fn replay(
    board: &mut SiloBoard,
    config: &BoardConfig,
    readings: &[Reading],
    duration: f64,
) -> Result<ReplaySummary, SiloError> {
    let mut elapsed = 0.0;
    let mut frames = 0;
    let mut pending = readings.iter().peekable();
    let mut delivered = 0;

    while elapsed < duration {
        while let Some(reading) = pending.next_if(|reading| reading.at <= elapsed) {
            board.set_target_percentage(reading.silo, reading.percentage)?;
            log::debug!(
                "t={elapsed:.2}s silo {} reported {:.1}%",
                reading.silo,
                reading.percentage
            );
            delivered += 1;
        }
        let dt = FRAME_PATTERN[frames % FRAME_PATTERN.len()];
        board.tick(dt);
        elapsed += dt;
        frames += 1;
    }
    log::info!("replayed {delivered} readings over {frames} frames");

    let silos = config
        .silos
        .iter()
        .map(|entry| SiloReport {
            id: entry.id,
            name: entry.name.clone(),
            outcome: outcome(board, entry.id),
        })
        .collect();

    Ok(ReplaySummary {
        elapsed,
        frames,
        readings: delivered,
        silos,
    })
}

/// Collect the final state of one silo.
fn outcome(board: &SiloBoard, id: SiloId) -> Result<SiloOutcome, SiloError> {
    let view = board.view(id)?;
    Ok(SiloOutcome {
        snapshot: board.snapshot(id)?,
        solids: view.fill_solids().to_vec(),
        visible_particles: view.particle_positions().len(),
        recycled_particles: view.particle_field().recycled_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{build_board, default_config, default_readings};

    #[test]
    fn replay_settles_on_last_readings() {
        let config = default_config();
        let readings = default_readings(&config);
        let mut board = build_board(&config).expect("unique identifiers");
        let summary = replay(&mut board, &config, &readings, 40.0).expect("known silos");

        assert_eq!(summary.readings, readings.len());
        assert!(summary.elapsed >= 40.0);

        let north = summary.silos[0].outcome.as_ref().expect("healthy silo");
        let target = north.snapshot.target_percentage.expect("readings arrived");
        assert!((north.snapshot.displayed_percentage - target).abs() < 0.5);
        assert_eq!(north.solids.len(), 2);
        assert!(north.recycled_particles > 0);

        assert!(matches!(
            summary.silos[2].outcome,
            Err(SiloError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn unknown_silo_in_telemetry_is_reported() {
        let config = default_config();
        let mut board = build_board(&config).expect("unique identifiers");
        let stray = [Reading {
            at: 0.0,
            silo: SiloId(404),
            percentage: 10.0,
        }];
        let error = replay(&mut board, &config, &stray, 1.0).expect_err("stray silo");
        assert_eq!(error, SiloError::UnknownSilo(SiloId(404)));
    }
}
