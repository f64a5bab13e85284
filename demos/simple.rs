use silofill::{solve_fill, SiloGeometry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let silo = SiloGeometry::new(2.345, 3.29, 2.345, 13.30)?;
    let volumes = silo.checked_volumes()?;
    println!(
        "cone = {:.2} m³, cylinder = {:.2} m³, total = {:.2} m³",
        volumes.cone, volumes.cylinder, volumes.total
    );

    for percentage in [0.0, 5.0, 50.0, 100.0] {
        let solids = solve_fill(&silo, percentage)?;
        println!("{percentage:>5.1}%: {} solid(s)", solids.len());
        for solid in solids {
            println!(
                "        {:?} height = {:.3} m, top radius = {:.3} m",
                solid.kind, solid.height, solid.top_radius
            );
        }
    }

    Ok(())
}
