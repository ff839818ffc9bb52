//! The convergence harness.
//!
//! Owns one bridge per switch and the transport between them. A run is:
//!
//! 1. every switch announces itself to its neighbors
//! 2. queued messages are delivered one at a time, each delivery feeding the
//!    receiver's outgoing messages back into the transport
//! 3. the run ends when the transport drains (quiescence) or the delivery
//!    budget is spent
//!
//! Each bridge is touched only by its own deliveries, one at a time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use spantree_core::{Bridge, Message, SwitchId, SwitchState, Transition};
use spantree_topology::{check_spanning_tree, ActiveLinks, Topology, TreeViolation};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::{Result, SimError};
use crate::events::{NetworkSnapshot, SimEvent, SwitchSnapshot};
use crate::transport::Transport;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// No messages left in flight
    Quiesced,
    /// Delivery budget reached with messages still queued
    BudgetExhausted,
}

/// Totals for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub deliveries: u64,
    /// Deliveries that changed root, distance or parent
    pub updates: u64,
    pub messages_sent: u64,
    pub dropped: u64,
    pub outcome: Outcome,
}

impl SimulationReport {
    pub fn quiesced(&self) -> bool {
        self.outcome == Outcome::Quiesced
    }
}

/// Drives a network of bridges to convergence.
pub struct Simulation<B: Bridge = SwitchState> {
    config: SimulationConfig,
    topology: Topology,
    bridges: BTreeMap<SwitchId, B>,
    transport: Transport,
    events: Vec<SimEvent>,
    announced: bool,
    deliveries: u64,
    updates: u64,
    messages_sent: u64,
    dropped: u64,
}

impl Simulation<SwitchState> {
    /// Simulate the stock switch implementation.
    pub fn new(topology: Topology, config: SimulationConfig) -> Result<Self> {
        Self::with_bridges(topology, config)
    }
}

impl<B: Bridge> Simulation<B> {
    /// Validate the topology and create one bridge per switch.
    pub fn with_bridges(topology: Topology, config: SimulationConfig) -> Result<Self> {
        topology.validate()?;

        let mut bridges = BTreeMap::new();
        for id in topology.switch_ids() {
            let neighbors = topology.neighbors(id)?.iter().copied().collect();
            bridges.insert(id, B::new(id, neighbors));
        }

        info!(
            switches = topology.switch_count(),
            links = topology.link_count(),
            ttl = config.ttl,
            order = ?config.order,
            "simulation created"
        );

        Ok(Self {
            transport: Transport::new(config.order),
            config,
            topology,
            bridges,
            events: Vec::new(),
            announced: false,
            deliveries: 0,
            updates: 0,
            messages_sent: 0,
            dropped: 0,
        })
    }

    /// Queue every switch's initial advertisement. Only the first call has effect.
    pub fn announce_all(&mut self) {
        if self.announced {
            return;
        }
        self.announced = true;

        let ttl = self.config.ttl;
        let mut outgoing = Vec::new();
        for (&id, bridge) in &self.bridges {
            let messages = bridge.announce(ttl);
            if self.config.record_events {
                self.events.push(SimEvent::Announced {
                    switch: id,
                    messages: messages.len(),
                    delivery: self.deliveries,
                });
            }
            outgoing.extend(messages);
        }
        self.send_all(outgoing);
    }

    /// Deliver one message. `None` when nothing is queued.
    pub fn step(&mut self) -> Option<(Message, Transition)> {
        let message = self.transport.pop()?;

        let Some(bridge) = self.bridges.get_mut(&message.destination) else {
            warn!(
                origin = %message.origin,
                destination = %message.destination,
                "dropping message for unknown switch"
            );
            self.dropped += 1;
            if self.config.record_events {
                self.events.push(SimEvent::Dropped {
                    message,
                    delivery: self.deliveries,
                });
            }
            return Some((message, Transition::default()));
        };

        let transition = bridge.process_message(message);
        self.deliveries += 1;

        if transition.updated {
            self.updates += 1;
            if self.config.record_events {
                self.events.push(SimEvent::StateChanged {
                    switch: bridge.id(),
                    root: bridge.root(),
                    distance: bridge.distance(),
                    parent: bridge.path_to_root(),
                    delivery: self.deliveries,
                });
            }
        }
        if self.config.record_events {
            self.events.push(SimEvent::Delivered {
                message,
                updated: transition.updated,
                sent: transition.outgoing.len(),
                delivery: self.deliveries,
            });
        }

        self.send_all(transition.outgoing.iter().copied());
        Some((message, transition))
    }

    /// Announce (if not yet done) and deliver until quiet or out of budget.
    pub fn run(&mut self) -> SimulationReport {
        self.announce_all();

        while !self.transport.is_empty() && self.deliveries < self.config.max_deliveries {
            self.step();
        }

        let report = self.report();
        match report.outcome {
            Outcome::Quiesced => info!(
                deliveries = report.deliveries,
                updates = report.updates,
                messages = report.messages_sent,
                "network quiesced"
            ),
            Outcome::BudgetExhausted => warn!(
                deliveries = report.deliveries,
                pending = self.transport.len(),
                "delivery budget exhausted before quiescence"
            ),
        }
        report
    }

    /// Totals so far.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            deliveries: self.deliveries,
            updates: self.updates,
            messages_sent: self.messages_sent,
            dropped: self.dropped,
            outcome: if self.transport.is_empty() {
                Outcome::Quiesced
            } else {
                Outcome::BudgetExhausted
            },
        }
    }

    fn send_all(&mut self, messages: impl IntoIterator<Item = Message>) {
        for message in messages {
            debug!(
                origin = %message.origin,
                destination = %message.destination,
                root = %message.root,
                distance = message.distance,
                path_through = message.path_through,
                ttl = message.ttl,
                "send"
            );
            self.transport.send(message);
            self.messages_sent += 1;
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn bridge(&self, id: SwitchId) -> Option<&B> {
        self.bridges.get(&id)
    }

    /// All bridges, in increasing identifier order.
    pub fn bridges(&self) -> impl Iterator<Item = &B> {
        self.bridges.values()
    }

    /// Messages still queued.
    pub fn pending(&self) -> usize {
        self.transport.len()
    }

    /// Recorded timeline (empty unless `record_events` is set).
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// The root every switch agrees on, if they all agree.
    pub fn converged_root(&self) -> Option<SwitchId> {
        let mut roots = self.bridges.values().map(Bridge::root);
        let first = roots.next()?;
        roots.all(|root| root == first).then_some(first)
    }

    /// Active links as reported by every switch.
    pub fn active_links(&self) -> ActiveLinks {
        self.bridges
            .iter()
            .map(|(&id, bridge)| (id, bridge.active_links().clone()))
            .collect()
    }

    /// Check that the active links form a spanning tree of the topology.
    pub fn check_tree(&self) -> std::result::Result<(), TreeViolation> {
        check_spanning_tree(&self.topology, &self.active_links())
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            deliveries: self.deliveries,
            switches: self.bridges.values().map(SwitchSnapshot::of).collect(),
        }
    }

    /// One rendered line per switch, in increasing identifier order.
    pub fn log_lines(&self) -> Vec<String> {
        self.bridges.values().map(Bridge::render_active_links).collect()
    }

    /// Write the active-link log, one newline-terminated line per switch.
    pub fn write_log(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut contents = String::new();
        for line in self.log_lines() {
            contents.push_str(&line);
            contents.push('\n');
        }
        fs::write(path, contents).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "wrote active-link log");
        Ok(())
    }

    /// Write the recorded timeline as JSON lines.
    pub fn write_events(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut contents = String::new();
        for event in &self.events {
            contents.push_str(&serde_json::to_string(event)?);
            contents.push('\n');
        }
        fs::write(path, contents).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
