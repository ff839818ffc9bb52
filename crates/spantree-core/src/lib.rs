//! Distributed Spanning-Tree Convergence
//!
//! Every switch in an arbitrary connected bridge graph runs the same local
//! decision logic. Using only messages exchanged with direct neighbors, the
//! network agrees on a single root and a loop-free set of active links.
//!
//! # Core Insight
//!
//! There is no election and no coordinator. Each switch keeps a belief
//! `(root, distance, parent)` and replaces it only with a strictly better one.
//! Smaller root identifiers always win, so the belief can only move toward the
//! global minimum identifier, and distances toward that root can only shrink.
//!
//! # Active Links
//!
//! A switch's parent link is active. A child link is active because the child
//! says so: every advertisement carries `path_through`, set when the sender
//! reaches the root via the receiver. Links whose far end stops claiming them
//! are retracted.
//!
//! # Usage
//!
//! ```
//! use spantree_core::{process_message, render_active_links, Message, SwitchId, SwitchState};
//!
//! let mut switch = SwitchState::new(SwitchId(2), vec![SwitchId(1), SwitchId(3)]);
//! let offer = Message::new(SwitchId(1), 0, SwitchId(1), SwitchId(2), false, 0);
//!
//! let transition = process_message(&mut switch, offer);
//! assert!(transition.updated);
//! assert_eq!(transition.outgoing.len(), 2);
//! assert_eq!(render_active_links(&switch), "2 - 1");
//! ```

mod bridge;
mod id;
mod invariant;
mod message;
mod switch;

pub use bridge::Bridge;
pub use id::SwitchId;
pub use invariant::InvariantViolation;
pub use message::Message;
pub use switch::{announce, process_message, render_active_links, SwitchState, Transition};
