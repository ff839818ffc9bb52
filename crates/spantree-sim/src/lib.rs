//! Spantree Simulation Harness
//!
//! Runs a network of switches over an in-memory transport until it goes
//! quiet, then reports what tree they agreed on.
//!
//! # Architecture
//!
//! - **Transport**: per-link FIFO queues, delivered in global send order or
//!   in a seeded random link order
//! - **Simulation**: owns the bridges, feeds each delivery's output back into
//!   the transport, stops at quiescence or a delivery budget
//! - **Events**: optional timeline of announcements, deliveries and state changes
//! - **Log**: one rendered active-link line per switch
//!
//! # Usage
//!
//! ```
//! use spantree_sim::{Simulation, SimulationConfig};
//! use spantree_topology::generate;
//! use spantree_core::SwitchId;
//!
//! let mut sim = Simulation::new(generate::path(3), SimulationConfig::default()).unwrap();
//! let report = sim.run();
//!
//! assert!(report.quiesced());
//! assert_eq!(sim.converged_root(), Some(SwitchId(1)));
//! assert_eq!(sim.log_lines()[1], "2 - 1, 2 - 3");
//! ```

mod config;
mod error;
mod events;
mod simulation;
mod transport;

pub use config::{DeliveryOrder, SimulationConfig, DEFAULT_MAX_DELIVERIES, DEFAULT_TTL};
pub use error::{Result, SimError};
pub use events::{NetworkSnapshot, SimEvent, SwitchSnapshot};
pub use simulation::{Outcome, Simulation, SimulationReport};
pub use transport::Transport;
