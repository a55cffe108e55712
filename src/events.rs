use crate::time::SimTime;
use crate::{Error, Result};

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::{self, Debug};
use tracing::trace;

/// A resumption point in the simulation: some process picks back up when the
/// clock reaches the time this event was scheduled for.
///
/// Each event executes exactly once, at its due time, with exclusive access
/// to the simulation state and the queue so it can mutate state and schedule
/// follow-up events. The clock on `queue` has already advanced to the event's
/// due time when [`execute()`] is invoked.
///
/// Requiring [`Debug`] lets a stuck queue print its contents.
///
/// # Errors
///
/// Implementations report invariant violations through the returned
/// [`Result`]; the runner stops at the first failing event and bubbles the
/// error up unchanged.
///
/// [`execute()`]: Event::execute
pub trait Event<State>: Debug {
    fn execute(&mut self, state: &mut State, queue: &mut EventQueue<State>) -> Result;
}

/// Heap entry pairing a boxed event with its sort key.
///
/// Ordering cares first about the due time; the scheduling sequence number
/// breaks ties so that two events due at the same instant execute in the
/// order they were scheduled.
struct EventHolder<State> {
    due_time: SimTime,
    sequence: u64,
    event: Box<dyn Event<State>>,
}

impl<State> PartialEq for EventHolder<State> {
    fn eq(&self, other: &Self) -> bool {
        self.due_time == other.due_time && self.sequence == other.sequence
    }
}

impl<State> Eq for EventHolder<State> {}

impl<State> PartialOrd for EventHolder<State> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<State> Ord for EventHolder<State> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_time
            .cmp(&other.due_time)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl<State> Debug for EventHolder<State> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EventHolder")
            .field("due_time", &self.due_time)
            .field("sequence", &self.sequence)
            .field("event", &self.event)
            .finish()
    }
}

/// Time-ordered queue of pending resumptions, plus the virtual clock.
///
/// Events pop in ascending `(due_time, sequence)` order, so the observed
/// execution order is deterministic: earlier times first, and within one
/// instant, first scheduled runs first. Scheduling is checked: an event may
/// never land before the current clock value, and a negative delay is
/// rejected with [`Error::BackInTime`] rather than silently reordering the
/// past.
///
/// Popping is crate-internal; it only happens inside
/// [`Simulation::run()`](crate::Simulation::run), which is what keeps the
/// clock monotone.
#[derive(Debug)]
pub struct EventQueue<State> {
    events: BinaryHeap<Reverse<EventHolder<State>>>,
    now: SimTime,
    next_sequence: u64,
}

impl<State> EventQueue<State> {
    pub(crate) fn new(start_time: SimTime) -> Self {
        Self {
            events: BinaryHeap::new(),
            now: start_time,
            next_sequence: 0,
        }
    }

    /// The current clock value: the due time of the most recently popped
    /// event, or the start time if nothing has executed yet.
    pub fn current_time(&self) -> SimTime {
        self.now
    }

    /// Number of scheduled events not yet executed.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Schedule `event` to execute at the absolute time `due_time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackInTime`] if `due_time` is before the current
    /// clock value, with no modification to the queue.
    pub fn schedule_at<E>(&mut self, event: E, due_time: SimTime) -> Result
    where
        E: Event<State> + 'static,
    {
        if due_time < self.now {
            return Err(Error::BackInTime {
                scheduled: due_time.as_f64(),
                now: self.now.as_f64(),
            });
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(Reverse(EventHolder {
            due_time,
            sequence,
            event: Box::new(event),
        }));
        Ok(())
    }

    /// Schedule `event` to execute `delay` minutes from now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackInTime`] if `delay` is negative or NaN. Callers
    /// uphold the clock invariant by always computing delays as non-negative
    /// offsets from [`current_time()`](EventQueue::current_time).
    pub fn schedule_in<E>(&mut self, event: E, delay: f64) -> Result
    where
        E: Event<State> + 'static,
    {
        if delay < 0.0 || delay.is_nan() {
            return Err(Error::BackInTime {
                scheduled: self.now.as_f64() + delay,
                now: self.now.as_f64(),
            });
        }
        self.schedule_at(event, self.now + delay)
    }

    /// Pop the next event and advance the clock to its due time.
    pub(crate) fn next(&mut self) -> Option<Box<dyn Event<State>>> {
        let Reverse(holder) = self.events.pop()?;
        self.now = holder.due_time;
        trace!(
            time = holder.due_time.as_f64(),
            sequence = holder.sequence,
            "executing event"
        );
        Some(holder.event)
    }
}

impl<State> fmt::Display for EventQueue<State> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "EventQueue with {} scheduled events at time {}",
            self.events.len(),
            self.now
        )
    }
}
