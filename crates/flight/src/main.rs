//! flightsim - headless flight demo
//!
//! Flies a scripted sortie over procedural terrain and logs what the
//! aircraft does. Set `RUST_LOG=debug` to see every shot and tier change.
//! Tuning comes from `flight.ron` and sortie settings from `sortie.ron` in the
//! working directory when present.

mod demo;

use anyhow::Result;
use flight::FlightConfig;

use demo::{Demo, DemoSettings};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FlightConfig::load();
    let mut settings = DemoSettings::load();
    if let Some(seed) = std::env::args().nth(1) {
        settings.seed = seed.parse()?;
    }

    log::info!("Flight demo: seed {}, {} enemies", settings.seed, settings.enemy_count);
    let mut demo = Demo::new(config, settings)?;
    let summary = demo.run();

    println!("Sortie complete");
    println!("  shots fired:    {}", summary.shots);
    println!("  barrel rolls:   {}", summary.barrel_rolls);
    println!("  ticks locked:   {}", summary.locked_ticks);
    println!("  final state:    {:?}", summary.final_state);
    Ok(())
}
