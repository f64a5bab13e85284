use approx::assert_relative_eq;
use silofill::{
    solve_fill, total_volume, Dimensions, SiloBoard, SiloError, SiloGeometry, SiloId, SolidKind,
    ViewSettings, DEFAULT_RADIUS_INSET,
};

const FRAME: f64 = 1.0 / 60.0;

fn reference_dimensions() -> Dimensions {
    Dimensions {
        cone_radius: 2.345,
        cone_height: 3.29,
        cylinder_radius: 2.345,
        cylinder_height: 13.30,
    }
}

fn reference_board() -> (SiloBoard, SiloId) {
    let mut board = SiloBoard::new(ViewSettings::default());
    let id = SiloId(1);
    board
        .add_silo(id, reference_dimensions())
        .expect("fresh identifier");
    (board, id)
}

#[test]
fn half_full_silo_fills_cone_then_cylinder() {
    let silo = SiloGeometry::try_from(reference_dimensions()).expect("valid silo");
    let envelope = silo.inset(DEFAULT_RADIUS_INSET).expect("valid envelope");
    let volumes = envelope.volumes();
    assert!(volumes.cone <= 0.5 * volumes.total);

    let solids = solve_fill(&silo, 50.0).expect("solvable");
    assert_eq!(solids.len(), 2);
    assert_eq!(solids[0].kind, SolidKind::ConeSegment);
    assert_relative_eq!(solids[0].height, silo.cone_height(), max_relative = 1.0e-12);
    assert_relative_eq!(solids[0].volume(), volumes.cone, max_relative = 1.0e-9);
    assert_eq!(solids[1].kind, SolidKind::CylinderSegment);
    assert_relative_eq!(
        total_volume(&solids),
        0.5 * volumes.total,
        max_relative = 1.0e-6
    );
}

#[test]
fn empty_silo_has_no_solids_but_falling_particles() {
    let (mut board, id) = reference_board();
    board.set_target_percentage(id, 0.0).expect("known silo");
    let before = board.particle_positions(id).expect("healthy silo");
    board.tick(FRAME);

    assert!(board.current_fill_solids(id).expect("healthy silo").is_empty());
    let after = board.particle_positions(id).expect("healthy silo");
    assert_eq!(after.len(), 200);
    let fallen = before
        .iter()
        .zip(&after)
        .filter(|(before, after)| after.y < before.y)
        .count();
    assert!(fallen > 190, "only {fallen} particles fell");
}

#[test]
fn displayed_level_converges_from_zero_to_fifty() {
    let (mut board, id) = reference_board();
    board.set_target_percentage(id, 50.0).expect("known silo");
    for _ in 0..600 {
        board.tick(FRAME);
    }
    let displayed = board.current_displayed_percentage(id).expect("healthy silo");
    assert!((displayed - 50.0).abs() < 0.5, "displayed {displayed}");
}

#[test]
fn particles_stay_between_cone_bottom_and_roof() {
    let (mut board, id) = reference_board();
    let silo = SiloGeometry::try_from(reference_dimensions()).expect("valid silo");
    let readings = [12.0, 88.0, 0.0, 99.5, 47.0];
    for reading in readings {
        board.set_target_percentage(id, reading).expect("known silo");
        for frame in 0..240 {
            board.tick(if frame % 50 == 0 { 0.5 } else { FRAME });
            for position in board.particle_positions(id).expect("healthy silo") {
                assert!(position.y >= silo.cone_bottom_y());
                assert!(position.y <= silo.cylinder_top_y());
            }
        }
    }
}

#[test]
fn broken_silo_does_not_disturb_its_neighbours() {
    let (mut board, healthy) = reference_board();
    let broken = SiloId(2);
    board
        .add_silo(
            broken,
            Dimensions {
                cone_radius: -2.0,
                ..reference_dimensions()
            },
        )
        .expect("registration accepted");

    board.set_target_percentage(healthy, 75.0).expect("known silo");
    board.set_target_percentage(broken, 75.0).expect("known silo");
    for _ in 0..900 {
        board.tick(FRAME);
    }

    let level = board.current_displayed_percentage(healthy).expect("healthy silo");
    assert!((level - 75.0).abs() < 0.5);
    assert!(matches!(
        board.current_displayed_percentage(broken),
        Err(SiloError::InvalidGeometry { silo, .. }) if silo == broken
    ));
    assert!(board.particle_positions(broken).is_err());
}

#[test]
fn missing_telemetry_renders_empty_with_placeholder_readout() {
    let (mut board, id) = reference_board();
    for _ in 0..60 {
        board.tick(FRAME);
    }
    let snapshot = board.snapshot(id).expect("healthy silo");
    assert_eq!(snapshot.displayed_percentage, 0.0);
    assert_eq!(snapshot.target_percentage, None);
    assert_eq!(snapshot.readout, silofill::NO_DATA);
    assert!(board.current_fill_solids(id).expect("healthy silo").is_empty());
}
