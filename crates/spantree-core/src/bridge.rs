//! The capability a harness needs from a switch implementation.

use std::collections::BTreeSet;

use crate::switch::{self, SwitchState, Transition};
use crate::{Message, SwitchId};

/// A participant in spanning-tree convergence.
///
/// Harnesses depend only on this trait, so any implementation with the same
/// observable behavior can be dropped in for [`SwitchState`].
pub trait Bridge {
    /// Create a bridge with a fixed identifier and neighbor list.
    fn new(id: SwitchId, neighbors: Vec<SwitchId>) -> Self
    where
        Self: Sized;

    fn id(&self) -> SwitchId;

    fn neighbors(&self) -> &[SwitchId];

    /// Advertisements sent once, before any delivery.
    fn announce(&self, ttl: u32) -> Vec<Message>;

    /// Consume one delivered message.
    fn process_message(&mut self, message: Message) -> Transition;

    /// Active links in log form (see [`switch::render_active_links`]).
    fn render_active_links(&self) -> String;

    fn root(&self) -> SwitchId;

    fn distance(&self) -> u32;

    fn path_to_root(&self) -> Option<SwitchId>;

    fn active_links(&self) -> &BTreeSet<SwitchId>;
}

impl Bridge for SwitchState {
    fn new(id: SwitchId, neighbors: Vec<SwitchId>) -> Self {
        SwitchState::new(id, neighbors)
    }

    fn id(&self) -> SwitchId {
        SwitchState::id(self)
    }

    fn neighbors(&self) -> &[SwitchId] {
        SwitchState::neighbors(self)
    }

    fn announce(&self, ttl: u32) -> Vec<Message> {
        switch::announce(self, ttl)
    }

    fn process_message(&mut self, message: Message) -> Transition {
        switch::process_message(self, message)
    }

    fn render_active_links(&self) -> String {
        switch::render_active_links(self)
    }

    fn root(&self) -> SwitchId {
        SwitchState::root(self)
    }

    fn distance(&self) -> u32 {
        SwitchState::distance(self)
    }

    fn path_to_root(&self) -> Option<SwitchId> {
        SwitchState::path_to_root(self)
    }

    fn active_links(&self) -> &BTreeSet<SwitchId> {
        SwitchState::active_links(self)
    }
}
