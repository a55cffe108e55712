use crate::order::Order;
use crate::{Error, Result};

use std::collections::VecDeque;

/// Outcome of an [`acquire()`] call.
///
/// [`acquire()`]: RiderPool::acquire
#[derive(Debug, PartialEq)]
pub enum Acquire {
    /// A rider was free; the order starts service at this same instant.
    Granted(Order),
    /// All riders busy; the order joined the tail of the wait queue.
    Queued,
}

/// Fixed pool of interchangeable riders with a FIFO wait queue.
///
/// A request is granted immediately whenever fewer than `capacity` riders are
/// busy; otherwise it waits its turn. On release the freed rider is handed to
/// the longest-waiting order at the exact release instant, so the pool never
/// sits idle while anyone queues and never exceeds capacity. There is no
/// priority, preemption, or timeout: a waiting order holds its position until
/// served.
#[derive(Debug)]
pub struct RiderPool {
    capacity: u32,
    busy: u32,
    waiting: VecDeque<Order>,
}

impl RiderPool {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            busy: 0,
            waiting: VecDeque::new(),
        }
    }

    /// Request a rider for `order`.
    ///
    /// Grants at the current instant if a rider is free, otherwise appends
    /// the order to the wait queue.
    ///
    /// # Errors
    ///
    /// [`Error::PoolOverCapacity`] if the busy count would exceed capacity,
    /// which indicates a bug in the caller's acquire/release pairing.
    pub fn acquire(&mut self, order: Order) -> Result<Acquire> {
        if self.busy < self.capacity {
            self.busy += 1;
            self.check_capacity()?;
            Ok(Acquire::Granted(order))
        } else {
            self.waiting.push_back(order);
            Ok(Acquire::Queued)
        }
    }

    /// Free the rider held by a completed delivery.
    ///
    /// If anyone is waiting, the head of the queue takes the freed rider
    /// immediately and is returned so the caller can start its service; the
    /// busy count does not dip in between.
    ///
    /// # Errors
    ///
    /// [`Error::IdleRelease`] if no rider was busy, again a bug in the
    /// caller's pairing rather than a recoverable condition.
    pub fn release(&mut self) -> Result<Option<Order>> {
        self.busy = self.busy.checked_sub(1).ok_or(Error::IdleRelease)?;
        match self.waiting.pop_front() {
            Some(next) => {
                self.busy += 1;
                self.check_capacity()?;
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }

    /// Invariant guard run after every busy-count increment.
    fn check_capacity(&self) -> Result {
        if self.busy > self.capacity {
            return Err(Error::PoolOverCapacity {
                busy: self.busy,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn busy(&self) -> u32 {
        self.busy
    }

    /// Length of the wait queue, the quantity the metrics timeline samples
    /// after every acquire and release.
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// True when no rider is busy and nobody waits; together with a stopped
    /// arrival generator and an empty event queue this is the run's
    /// termination condition.
    pub fn is_idle(&self) -> bool {
        self.busy == 0 && self.waiting.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SimTime;

    fn order(id: u64, at: f64) -> Order {
        Order {
            id,
            arrival_time: SimTime::new(at),
            service_time: 5.0,
        }
    }

    #[test]
    fn grants_immediately_below_capacity() {
        let mut pool = RiderPool::new(2);
        assert_eq!(pool.acquire(order(1, 0.0)).unwrap(), Acquire::Granted(order(1, 0.0)));
        assert_eq!(pool.acquire(order(2, 1.0)).unwrap(), Acquire::Granted(order(2, 1.0)));
        assert_eq!(pool.busy(), 2);
        assert_eq!(pool.queue_len(), 0);
    }

    #[test]
    fn queues_at_capacity() {
        let mut pool = RiderPool::new(1);
        pool.acquire(order(1, 0.0)).unwrap();
        assert_eq!(pool.acquire(order(2, 1.0)).unwrap(), Acquire::Queued);
        assert_eq!(pool.busy(), 1);
        assert_eq!(pool.queue_len(), 1);
    }

    #[test]
    fn release_hands_rider_to_longest_waiting() {
        let mut pool = RiderPool::new(1);
        pool.acquire(order(1, 0.0)).unwrap();
        pool.acquire(order(2, 1.0)).unwrap();
        pool.acquire(order(3, 2.0)).unwrap();

        // FIFO: order 2 waited longest, it goes first and the busy count
        // never dips to zero during the handoff.
        let next = pool.release().unwrap();
        assert_eq!(next, Some(order(2, 1.0)));
        assert_eq!(pool.busy(), 1);
        assert_eq!(pool.queue_len(), 1);

        let next = pool.release().unwrap();
        assert_eq!(next, Some(order(3, 2.0)));

        assert_eq!(pool.release().unwrap(), None);
        assert!(pool.is_idle());
    }

    #[test]
    fn release_on_idle_pool_is_an_error() {
        let mut pool = RiderPool::new(1);
        assert_eq!(pool.release().unwrap_err(), Error::IdleRelease);
    }

    #[test]
    fn busy_count_never_exceeds_capacity() {
        let mut pool = RiderPool::new(3);
        for id in 0..20 {
            pool.acquire(order(id, id as f64)).unwrap();
            assert!(pool.busy() <= pool.capacity());
        }
        for _ in 0..20 {
            pool.release().unwrap();
            assert!(pool.busy() <= pool.capacity());
        }
        assert!(pool.is_idle());
    }
}
