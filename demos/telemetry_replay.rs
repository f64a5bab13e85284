use silofill::{Dimensions, SiloBoard, SiloId, ViewSettings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut board = SiloBoard::new(ViewSettings::default());
    let silo = SiloId(1);
    board.add_silo(
        silo,
        Dimensions {
            cone_radius: 2.345,
            cone_height: 3.29,
            cylinder_radius: 2.345,
            cylinder_height: 13.30,
        },
    )?;
    board.set_hover_listener(|id, region| match region {
        Some(region) => println!("silo {id}: pointer over {region}"),
        None => println!("silo {id}: pointer left"),
    });

    // Readings arrive once every five seconds; frames tick at 60 Hz in between.
    for reading in [20.0, 55.0, 40.0] {
        board.set_target_percentage(silo, reading)?;
        for _ in 0..300 {
            board.tick(1.0 / 60.0);
        }
        let snapshot = board.snapshot(silo)?;
        println!(
            "reading {reading:>5.1}% -> displayed {} with {} solid(s)",
            snapshot.readout,
            board.current_fill_solids(silo)?.len()
        );
    }

    board.pointer_over(silo, silofill::Region::ConicalSkirt)?;
    board.pointer_out(silo)?;

    Ok(())
}
