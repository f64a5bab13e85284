use crate::simulation::{ReplaySummary, SiloReport};
use silofill::SolidKind;
use std::fmt::Write;

/// Render a textual summary of a telemetry replay.
///
/// Each silo gets its readout, status band and the solids a renderer would
/// draw, so the output can be checked by hand against the silo dimensions.
#[must_use]
pub fn render_summary(summary: &ReplaySummary) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Silo fill replay ({:.1} s, {} frames, {} readings)",
        summary.elapsed, summary.frames, summary.readings
    )
    .expect("writing to string cannot fail");

    for silo in &summary.silos {
        render_silo(&mut output, silo);
    }

    output
}

/// Append the section for one silo.
fn render_silo(output: &mut String, silo: &SiloReport) {
    let name = silo.name.as_deref().unwrap_or("unnamed");
    match &silo.outcome {
        Ok(outcome) => {
            let status = outcome
                .snapshot
                .status
                .map_or_else(|| "no data".to_owned(), |status| status.to_string());
            writeln!(
                output,
                "Silo {} {name}: {} ({status})",
                silo.id, outcome.snapshot.readout
            )
            .expect("writing to string cannot fail");

            for solid in &outcome.solids {
                let kind = match solid.kind {
                    SolidKind::ConeSegment => "cone",
                    SolidKind::CylinderSegment => "cylinder",
                };
                writeln!(
                    output,
                    "  {kind:<8} height = {:.3} m, radius = {:.3} m, y = [{:+.3}, {:+.3}] m, volume = {:.2} m³",
                    solid.height,
                    solid.top_radius,
                    solid.base_y(),
                    solid.top_y(),
                    solid.volume()
                )
                .expect("writing to string cannot fail");
            }
            if outcome.solids.is_empty() {
                output.push_str("  empty\n");
            }

            writeln!(
                output,
                "  particles: {} visible, {} recycled",
                outcome.visible_particles, outcome.recycled_particles
            )
            .expect("writing to string cannot fail");
        }
        Err(error) => {
            writeln!(output, "Silo {} {name}: placeholder ({error})", silo.id)
                .expect("writing to string cannot fail");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SiloOutcome;
    use silofill::{
        Dimension, FillSolid, FillStatus, GeometryError, SiloError, SiloId, SiloSnapshot,
    };

    #[test]
    fn formats_human_readable_report() {
        let summary = ReplaySummary {
            elapsed: 20.0,
            frames: 1_200,
            readings: 4,
            silos: vec![
                SiloReport {
                    id: SiloId(1),
                    name: Some("North".to_owned()),
                    outcome: Ok(SiloOutcome {
                        snapshot: SiloSnapshot {
                            id: SiloId(1),
                            displayed_percentage: 7.0,
                            target_percentage: Some(7.0),
                            status: Some(FillStatus::Critical),
                            readout: "7.0%".to_owned(),
                        },
                        solids: vec![FillSolid {
                            kind: SolidKind::ConeSegment,
                            height: 2.0,
                            top_radius: 1.5,
                            y_offset: -7.0,
                        }],
                        visible_particles: 200,
                        recycled_particles: 31,
                    }),
                },
                SiloReport {
                    id: SiloId(3),
                    name: None,
                    outcome: Err(SiloError::InvalidGeometry {
                        silo: SiloId(3),
                        source: GeometryError::NonPositiveDimension {
                            dimension: Dimension::ConeHeight,
                            value: 0.0,
                        },
                    }),
                },
            ],
        };
        let report = render_summary(&summary);
        assert!(report.contains("Silo fill replay (20.0 s, 1200 frames, 4 readings)"));
        assert!(report.contains("Silo #1 North: 7.0% (critical)"));
        assert!(report.contains("cone     height = 2.000 m"));
        assert!(report.contains("y = [-8.000, -6.000] m"));
        assert!(report.contains("200 visible, 31 recycled"));
        assert!(report.contains("Silo #3 unnamed: placeholder"));
        assert!(report.contains("cone height must be positive"));
    }
}
