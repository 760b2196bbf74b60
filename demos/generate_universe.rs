//! Example: Generate a universe
//!
//! Demonstrates the basic usage of the generator. Set `RUST_LOG=debug` to see
//! the seed map logged between placement and growth.
//!
//! Usage: cargo run --example generate_universe [seed]

use rust_universe_generator::*;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rust_universe_generator=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    println!("Universe Generation Example");
    println!("===========================\n");

    let settings = UniverseSettings::default();
    let thresholds = SpacingThresholds::for_cell_count(settings.cell_count());

    println!("Configuration:");
    println!("  Seed: {}", seed);
    println!("  Grid: {}x{} ({} sectors)", settings.width, settings.height, settings.cell_count());
    println!("  Seed spacing: same race {}, different race {}", thresholds.same_race, thresholds.diff_race);
    println!("  Active races: {}", settings.active_races().count());
    println!();

    let mut last_reported = 0;
    let mut observer = |event: &GenerationEvent| match event {
        GenerationEvent::PhaseStarted(phase) => println!("Phase: {:?}", phase),
        GenerationEvent::SectorClaimed { progress, .. } => {
            let percent = (progress * 100.0) as u32;
            if percent >= last_reported + 25 {
                last_reported = percent - percent % 25;
                println!("  {}%", last_reported);
            }
        }
        _ => {}
    };

    let universe = UniverseGenerator::from_seed(seed)
        .generate_with_observer(&settings, &mut observer)
        .expect("Failed to generate universe");

    println!("\nMap (uppercase marks a cluster seed):");
    print!("{}", render_ascii(&universe));
    println!();

    println!("Legend:");
    for quota in settings.active_races() {
        println!("  {} {:<8} {}", quota.race.glyph(), quota.race.name(), quota.color.to_hex());
    }
    println!();

    println!("Results:");
    println!("{}", universe.summary());

    let lonely = universe.clusters().iter().filter(|c| !c.has_neighbors()).count();
    println!("Clusters without neighbors: {}", lonely);

    #[cfg(feature = "spatial-index")]
    if let Some(id) = universe.nearest_cluster(Coord::new(0, 0)) {
        if let Some(cluster) = universe.cluster(id) {
            println!(
                "Nearest seed to the top-left corner: {} at ({}, {})",
                cluster.race.name(),
                cluster.seed.x,
                cluster.seed.y
            );
        }
    }

    println!("\nGeneration complete!");
}
