//! Protocol advertisement exchanged between neighboring switches.

use crate::SwitchId;

/// One protocol advertisement.
///
/// A message carries the sender's current belief about the root. It is a
/// plain value: once built, only `ttl` changes, and only by the receiver
/// (see [`Message::received`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Root the sender currently believes in
    pub root: SwitchId,
    /// Sender's hop count to that root
    pub distance: u32,
    /// The sending switch
    pub origin: SwitchId,
    /// The receiving switch (used by the transport only)
    pub destination: SwitchId,
    /// Sender reaches the root through `destination`
    pub path_through: bool,
    /// Remaining re-flood budget
    pub ttl: u32,
}

impl Message {
    /// Build a message.
    pub const fn new(
        root: SwitchId,
        distance: u32,
        origin: SwitchId,
        destination: SwitchId,
        path_through: bool,
        ttl: u32,
    ) -> Self {
        Self {
            root,
            distance,
            origin,
            destination,
            path_through,
            ttl,
        }
    }

    /// The message as seen by its receiver: `ttl` decremented once, floored at 0.
    #[must_use]
    pub const fn received(self) -> Self {
        Self {
            ttl: self.ttl.saturating_sub(1),
            ..self
        }
    }

    /// The directed link `(origin, destination)` this message travels on.
    pub const fn link(&self) -> (SwitchId, SwitchId) {
        (self.origin, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn received_decrements_ttl_once() {
        let msg = Message::new(SwitchId(1), 0, SwitchId(1), SwitchId(2), false, 3);
        let seen = msg.received();
        assert_eq!(seen.ttl, 2);
        assert_eq!(seen.root, msg.root);
        assert_eq!(seen.origin, msg.origin);
    }

    #[test]
    fn received_ttl_floors_at_zero() {
        let msg = Message::new(SwitchId(1), 0, SwitchId(1), SwitchId(2), false, 0);
        assert_eq!(msg.received().ttl, 0);
    }

    #[test]
    fn link_is_origin_then_destination() {
        let msg = Message::new(SwitchId(1), 0, SwitchId(4), SwitchId(9), true, 1);
        assert_eq!(msg.link(), (SwitchId(4), SwitchId(9)));
    }
}
