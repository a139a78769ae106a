//! Simulated network latency.
//!
//! Every store call waits a fixed delay before touching data, standing in for
//! the round trip a real backend would need. Tests and tools switch it off
//! with [`Latency::none`].

use std::time::Duration;

/// The store operation being delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
}

/// Per-operation delays applied by the in-memory stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Latency {
    /// Delays used by the mock services: 300/200/400/300/250 ms.
    #[must_use]
    pub const fn simulated() -> Self {
        Self {
            get_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(250),
        }
    }

    /// No delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            get_all: Duration::ZERO,
            get_by_id: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn of(&self, operation: Operation) -> Duration {
        match operation {
            Operation::GetAll => self.get_all,
            Operation::GetById => self.get_by_id,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }

    /// Waits out the delay configured for `operation`.
    pub async fn simulate(&self, operation: Operation) {
        pause(self.of(operation)).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

/// Sleeps for `delay`, skipping the timer entirely when it is zero.
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
