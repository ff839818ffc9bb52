//! Spantree Simulator
//!
//! Load a topology file, run the switches to quiescence, write the
//! active-link log.
//!
//! ```text
//! spantree-sim <topology.json> <log-out> [ttl] [seed] [events-out]
//! ```
//!
//! Without a seed, messages are delivered in send order.

use std::env;
use std::process;

use spantree_sim::{Simulation, SimulationConfig};
use spantree_topology::Topology;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();
    let (Some(topology_path), Some(log_path)) = (args.get(1), args.get(2)) else {
        eprintln!("usage: spantree-sim <topology.json> <log-out> [ttl] [seed] [events-out]");
        process::exit(2);
    };

    let mut config = SimulationConfig::default();
    if let Some(ttl) = args.get(3) {
        config = config.with_ttl(ttl.parse()?);
    }
    if let Some(seed) = args.get(4) {
        config = config.shuffled(seed.parse()?);
    }
    let events_path = args.get(5);
    if events_path.is_some() {
        config = config.recording_events();
    }

    let topology = Topology::load(topology_path)?;
    let mut sim = Simulation::new(topology, config)?;
    let report = sim.run();

    sim.write_log(log_path)?;
    if let Some(path) = events_path {
        sim.write_events(path)?;
    }

    println!("Spantree Simulation");
    println!("===================");
    println!("  Switches:   {}", sim.topology().switch_count());
    println!("  Links:      {}", sim.topology().link_count());
    println!("  Deliveries: {}", report.deliveries);
    println!("  Updates:    {}", report.updates);
    println!("  Messages:   {}", report.messages_sent);
    println!("  Outcome:    {:?}", report.outcome);
    match sim.converged_root() {
        Some(root) => println!("  Root:       {}", root),
        None => println!("  Root:       (no agreement)"),
    }
    match sim.check_tree() {
        Ok(()) => println!("  Tree:       ok"),
        Err(violation) => println!("  Tree:       {}", violation),
    }

    if !report.quiesced() {
        process::exit(1);
    }
    Ok(())
}
