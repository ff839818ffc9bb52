//! In-memory message transport.
//!
//! Messages queue per directed link `(origin, destination)`. Whatever the
//! delivery order, two messages on the same link are delivered in the order
//! they were sent, and each send is delivered at most once.

use std::collections::{BTreeMap, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spantree_core::{Message, SwitchId};

use crate::config::DeliveryOrder;

type Link = (SwitchId, SwitchId);

/// Queued messages awaiting delivery.
pub struct Transport {
    queues: Queues,
    pending: usize,
}

enum Queues {
    Fifo(VecDeque<Message>),
    Shuffled(Box<LinkQueues>),
}

/// Non-empty per-link queues, indexable so a random pick is O(1).
struct LinkQueues {
    slots: Vec<(Link, VecDeque<Message>)>,
    index: BTreeMap<Link, usize>,
    rng: StdRng,
}

impl LinkQueues {
    fn new(seed: u64) -> Self {
        Self {
            slots: Vec::new(),
            index: BTreeMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn push(&mut self, message: Message) {
        let link = message.link();
        match self.index.get(&link) {
            Some(&slot) => self.slots[slot].1.push_back(message),
            None => {
                self.index.insert(link, self.slots.len());
                self.slots.push((link, VecDeque::from([message])));
            }
        }
    }

    fn pop(&mut self) -> Option<Message> {
        if self.slots.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..self.slots.len());
        let message = self.slots[pick].1.pop_front();

        if self.slots[pick].1.is_empty() {
            let (link, _) = self.slots.swap_remove(pick);
            self.index.remove(&link);
            if let Some((moved, _)) = self.slots.get(pick) {
                self.index.insert(*moved, pick);
            }
        }
        message
    }
}

impl Transport {
    /// Create an empty transport with the given scheduling.
    pub fn new(order: DeliveryOrder) -> Self {
        let queues = match order {
            DeliveryOrder::Fifo => Queues::Fifo(VecDeque::new()),
            DeliveryOrder::Shuffled { seed } => Queues::Shuffled(Box::new(LinkQueues::new(seed))),
        };
        Self { queues, pending: 0 }
    }

    /// Queue a message on its link.
    pub fn send(&mut self, message: Message) {
        match &mut self.queues {
            Queues::Fifo(queue) => queue.push_back(message),
            Queues::Shuffled(links) => links.push(message),
        }
        self.pending += 1;
    }

    /// Take the next message to deliver.
    pub fn pop(&mut self) -> Option<Message> {
        let message = match &mut self.queues {
            Queues::Fifo(queue) => queue.pop_front(),
            Queues::Shuffled(links) => links.pop(),
        }?;
        self.pending -= 1;
        Some(message)
    }

    /// Messages still queued.
    pub fn len(&self) -> usize {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(origin: u32, dest: u32, distance: u32) -> Message {
        Message::new(SwitchId(1), distance, SwitchId(origin), SwitchId(dest), false, 0)
    }

    fn drain(transport: &mut Transport) -> Vec<Message> {
        std::iter::from_fn(|| transport.pop()).collect()
    }

    #[test]
    fn fifo_keeps_send_order() {
        let mut transport = Transport::new(DeliveryOrder::Fifo);
        transport.send(msg(1, 2, 0));
        transport.send(msg(3, 2, 1));
        transport.send(msg(1, 2, 2));
        assert_eq!(transport.len(), 3);

        let order: Vec<_> = drain(&mut transport).iter().map(|m| m.distance).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert!(transport.is_empty());
    }

    #[test]
    fn shuffled_keeps_per_link_order() {
        let mut transport = Transport::new(DeliveryOrder::Shuffled { seed: 9 });
        for i in 0..20 {
            transport.send(msg(1 + i % 3, 4, i));
        }

        let delivered = drain(&mut transport);
        assert_eq!(delivered.len(), 20);
        for origin in 1..=3 {
            let per_link: Vec<_> = delivered
                .iter()
                .filter(|m| m.origin == SwitchId(origin))
                .map(|m| m.distance)
                .collect();
            let mut sorted = per_link.clone();
            sorted.sort_unstable();
            assert_eq!(per_link, sorted, "link {} reordered", origin);
        }
    }

    #[test]
    fn shuffled_is_reproducible() {
        let run = |seed| {
            let mut transport = Transport::new(DeliveryOrder::Shuffled { seed });
            for i in 0..30 {
                transport.send(msg(i % 5, 9, i));
            }
            drain(&mut transport)
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn drained_links_can_be_reused() {
        let mut transport = Transport::new(DeliveryOrder::Shuffled { seed: 5 });
        let mut delivered = Vec::new();
        for round in 0..10 {
            for origin in 1..=4 {
                transport.send(msg(origin, 7, round));
            }
            // Drain part of the queue so links empty out and come back.
            for _ in 0..3 {
                delivered.extend(transport.pop());
            }
        }
        delivered.extend(drain(&mut transport));

        assert_eq!(delivered.len(), 40);
        assert!(transport.is_empty());
        for origin in 1..=4 {
            let per_link: Vec<_> = delivered
                .iter()
                .filter(|m| m.origin == SwitchId(origin))
                .map(|m| m.distance)
                .collect();
            assert_eq!(per_link, (0..10).collect::<Vec<_>>(), "link {} reordered", origin);
        }
    }

    #[test]
    fn empty_transport_yields_nothing() {
        let mut transport = Transport::new(DeliveryOrder::Shuffled { seed: 1 });
        assert!(transport.pop().is_none());
        assert_eq!(transport.len(), 0);
    }
}
