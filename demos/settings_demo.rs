//! Example: Configure races
//!
//! Builds custom settings, shows how validation rejects bad quotas, and
//! compares how spacing scales with the grid.

use rust_universe_generator::*;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rust_universe_generator=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("Universe Settings Demo");
    println!("======================\n");

    println!("Spacing by grid size:");
    for (width, height) in [(5u8, 5u8), (22, 17), (40, 30), (100, 100)] {
        let cells = usize::from(width) * usize::from(height);
        let t = SpacingThresholds::for_cell_count(cells);
        println!(
            "  {:>3}x{:<3} same race {:>4}, different race {:>3}",
            width, height, t.same_race, t.diff_race
        );
    }
    println!();

    println!("Validation:");
    let attempts = [
        ("tiny grid", UniverseSettingsBuilder::new().dimensions(4, 10).map(|_| ())),
        (
            "more clusters than race sectors",
            UniverseSettingsBuilder::new()
                .race(RaceSettings::new(Race::Argon, 3, 5, 1))
                .map(|_| ()),
        ),
        (
            "duplicate race",
            UniverseSettingsBuilder::new()
                .race(RaceSettings::new(Race::Boron, 10, 2, 5))
                .and_then(|b| b.race(RaceSettings::new(Race::Boron, 10, 2, 5)))
                .map(|_| ()),
        ),
        ("bad color", RaceColor::from_hex("#12345").map(|_| ())),
    ];
    for (label, result) in attempts {
        match result {
            Ok(()) => println!("  {}: accepted", label),
            Err(e) => println!("  {}: {}", label, e),
        }
    }
    println!();

    let settings = UniverseSettingsBuilder::new()
        .dimensions(30, 12)
        .unwrap()
        .race(RaceSettings::new(Race::Argon, 90, 3, 40).with_color(RaceColor::from_hex("#3070ff").unwrap()))
        .unwrap()
        .race(RaceSettings::new(Race::Xenon, 60, 6, 10))
        .unwrap()
        .race(RaceSettings::new(Race::Khaak, 5, 5, 1))
        .unwrap()
        .build()
        .unwrap();

    let universe = UniverseGenerator::from_seed(2024)
        .generate(&settings)
        .expect("Failed to generate universe");

    print!("{}", render_ascii(&universe));
    println!();
    for race in universe.summary().races {
        println!("  {}", race);
    }

    let colors = color_grid(&universe, &RaceColorMapper::default());
    let tinted = colors.iter().filter(|c| **c != RaceColorMapper::default().empty).count();
    println!("\n{} of {} sectors colored", tinted, colors.len());
}
