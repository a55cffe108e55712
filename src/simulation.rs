use crate::events::EventQueue;
use crate::time::SimTime;
use crate::Result;

use std::fmt::{self, Formatter};

/// The overall state a simulation run threads through its events.
///
/// The single hook lets [`Simulation::run()`] ask before each pop whether it
/// should wrap up early. The default always answers no, so a run with the
/// default continues until the event queue drains, which is the termination
/// condition the dispatch model relies on.
pub trait SimState {
    /// Invoked before popping each event; `true` stops the run with events
    /// possibly still queued.
    #[allow(unused_variables)]
    fn is_complete(&self, current_time: SimTime) -> bool {
        false
    }
}

/// Owns the event queue and the model state, and drives the run.
///
/// The expected workflow:
///
/// 1. Build a [`SimState`] value.
/// 2. Pass it and the start time to [`new()`].
/// 3. Schedule at least one initial event.
/// 4. Call [`run()`] and handle any error it returns.
/// 5. Take the final state apart with [`state()`] or [`into_state()`].
///
/// [`new()`]: Simulation::new
/// [`run()`]: Simulation::run
/// [`state()`]: Simulation::state
/// [`into_state()`]: Simulation::into_state
#[derive(Debug)]
pub struct Simulation<State>
where
    State: SimState,
{
    event_queue: EventQueue<State>,
    state: State,
}

impl<State> Simulation<State>
where
    State: SimState,
{
    pub fn new(initial_state: State, start_time: SimTime) -> Self {
        Self {
            event_queue: EventQueue::new(start_time),
            state: initial_state,
        }
    }

    /// Execute events one at a time in ascending `(due_time, sequence)`
    /// order, advancing the clock to each event's due time before it runs.
    ///
    /// Stops when [`SimState::is_complete()`] answers yes, or when the queue
    /// is empty. Exactly one event body executes at a time, so event code
    /// never observes a half-applied state mutation.
    ///
    /// # Errors
    ///
    /// The first error returned by an executing event aborts the run and is
    /// passed back unchanged.
    pub fn run(&mut self) -> Result {
        loop {
            if self.state.is_complete(self.event_queue.current_time()) {
                return Ok(());
            }

            let Some(mut event) = self.event_queue.next() else {
                return Ok(());
            };
            event.execute(&mut self.state, &mut self.event_queue)?;
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Consume the simulation and hand back the final state, typically to
    /// derive end-of-run metrics from it.
    pub fn into_state(self) -> State {
        self.state
    }

    pub fn event_queue(&self) -> &EventQueue<State> {
        &self.event_queue
    }

    pub fn event_queue_mut(&mut self) -> &mut EventQueue<State> {
        &mut self.event_queue
    }
}

impl<State> fmt::Display for Simulation<State>
where
    State: SimState,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Simulation at time {}", self.event_queue.current_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;

    #[derive(Debug)]
    struct Recorder {
        executed: Vec<u32>,
        complete: bool,
    }

    impl SimState for Recorder {
        fn is_complete(&self, _: SimTime) -> bool {
            self.complete
        }
    }

    #[derive(Debug)]
    struct Tagged(u32);

    impl Event<Recorder> for Tagged {
        fn execute(&mut self, state: &mut Recorder, _: &mut EventQueue<Recorder>) -> Result {
            state.executed.push(self.0);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Finish;

    impl Event<Recorder> for Finish {
        fn execute(&mut self, state: &mut Recorder, _: &mut EventQueue<Recorder>) -> Result {
            state.complete = true;
            Ok(())
        }
    }

    fn setup() -> Simulation<Recorder> {
        let mut sim = Simulation::new(
            Recorder {
                executed: Vec::new(),
                complete: false,
            },
            SimTime::ZERO,
        );
        for (i, tag) in [1u32, 3, 2].into_iter().enumerate() {
            sim.event_queue_mut()
                .schedule_at(Tagged(tag), SimTime::new(2.0 * i as f64))
                .unwrap();
        }
        sim
    }

    #[test]
    fn run_executes_events_in_order() {
        let mut sim = setup();
        sim.run().unwrap();
        assert_eq!(sim.state().executed, vec![1, 3, 2]);
    }

    #[test]
    fn run_stops_with_events_still_queued() {
        let mut sim = setup();
        sim.event_queue_mut()
            .schedule_at(Finish, SimTime::new(3.0))
            .unwrap();
        sim.run().unwrap();
        assert_eq!(sim.state().executed, vec![1, 3]);
        assert!(!sim.event_queue().is_empty());
    }
}
