//! Canonical bridge graphs. Identifiers start at 1.

use spantree_core::SwitchId;

use crate::Topology;

fn id(index: u32) -> SwitchId {
    SwitchId(index + 1)
}

/// `1 - 2 - ... - n`
pub fn path(n: u32) -> Topology {
    let mut topology = Topology::new();
    for i in 0..n {
        topology.add_switch(id(i));
        if i > 0 {
            topology.insert_link(id(i - 1), id(i));
        }
    }
    topology
}

/// A path closed back to switch 1. Fewer than 3 switches gives a path.
pub fn ring(n: u32) -> Topology {
    let mut topology = path(n);
    if n >= 3 {
        topology.insert_link(id(n - 1), id(0));
    }
    topology
}

/// Switch 1 linked to every other switch.
pub fn star(n: u32) -> Topology {
    let mut topology = Topology::new();
    for i in 0..n {
        topology.add_switch(id(i));
        if i > 0 {
            topology.insert_link(id(0), id(i));
        }
    }
    topology
}

/// Every pair of switches linked.
pub fn complete(n: u32) -> Topology {
    let mut topology = Topology::new();
    for i in 0..n {
        topology.add_switch(id(i));
        for j in 0..i {
            topology.insert_link(id(j), id(i));
        }
    }
    topology
}

/// A `width` x `height` lattice, numbered row by row.
pub fn grid(width: u32, height: u32) -> Topology {
    let mut topology = Topology::new();
    for row in 0..height {
        for col in 0..width {
            let here = id(row * width + col);
            topology.add_switch(here);
            if col > 0 {
                topology.insert_link(id(row * width + col - 1), here);
            }
            if row > 0 {
                topology.insert_link(id((row - 1) * width + col), here);
            }
        }
    }
    topology
}
