//! Simulation configuration.

/// Initial TTL stamped on announcements.
///
/// Every delivery with TTL left re-floods to all neighbors, so traffic grows
/// roughly as `degree ^ ttl`. Convergence itself only needs the re-floods
/// triggered by state changes.
pub const DEFAULT_TTL: u32 = 2;

/// Delivery cap before a run is declared exhausted.
pub const DEFAULT_MAX_DELIVERIES: u64 = 1_000_000;

/// Order in which queued messages are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryOrder {
    /// Global send order
    #[default]
    Fifo,
    /// Random link each step; order within a link is kept
    Shuffled { seed: u64 },
}

/// Configuration for the simulation.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// TTL for the initial announcements
    pub ttl: u32,
    /// Stop after this many deliveries even if messages remain
    pub max_deliveries: u64,
    /// Delivery scheduling
    pub order: DeliveryOrder,
    /// Keep a timeline of [`SimEvent`](crate::SimEvent)s
    pub record_events: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_deliveries: DEFAULT_MAX_DELIVERIES,
            order: DeliveryOrder::Fifo,
            record_events: false,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_max_deliveries(mut self, max_deliveries: u64) -> Self {
        self.max_deliveries = max_deliveries;
        self
    }

    /// Deliver in a seeded random order.
    #[must_use]
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.order = DeliveryOrder::Shuffled { seed };
        self
    }

    #[must_use]
    pub fn recording_events(mut self) -> Self {
        self.record_events = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.ttl, DEFAULT_TTL);
        assert_eq!(config.max_deliveries, DEFAULT_MAX_DELIVERIES);
        assert_eq!(config.order, DeliveryOrder::Fifo);
        assert!(!config.record_events);
    }

    #[test]
    fn builders_compose() {
        let config = SimulationConfig::default()
            .with_ttl(5)
            .with_max_deliveries(10)
            .shuffled(7)
            .recording_events();

        assert_eq!(config.ttl, 5);
        assert_eq!(config.max_deliveries, 10);
        assert_eq!(config.order, DeliveryOrder::Shuffled { seed: 7 });
        assert!(config.record_events);
    }
}
