//! Flat state machines
//!
//! A transition table keyed by `(state, event)`. Events with no entry for
//! the current state are ignored, so callers can send freely without
//! checking first. Every taken transition is recorded for diagnostics.

use rustc_hash::FxHashMap;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// One row of the transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub event: EventId,
    pub to: StateId,
}

impl Transition {
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self { from, event, to }
    }
}

/// Builder for [`StateMachine`]
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// `event` moves `from` to `to`
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine::new(self.initial_state, self.transitions)
    }
}

pub struct StateMachine {
    current_state: StateId,
    table: FxHashMap<(StateId, EventId), StateId>,
    history: Vec<(StateId, EventId, StateId)>,
}

impl StateMachine {
    /// Later rows for the same `(from, event)` replace earlier ones
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        let table = transitions
            .into_iter()
            .map(|t| ((t.from, t.event), t.to))
            .collect();

        Self {
            current_state: initial_state,
            table,
            history: Vec::new(),
        }
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Transitions taken so far, oldest first
    pub fn history(&self) -> &[(StateId, EventId, StateId)] {
        &self.history
    }

    /// Whether `event` would move the machine from its current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.table.contains_key(&(self.current_state, event))
    }

    /// Apply `event`, returning the resulting state
    pub fn send(&mut self, event: EventId) -> StateId {
        let from = self.current_state;
        match self.table.get(&(from, event)) {
            Some(&to) => {
                self.current_state = to;
                self.history.push((from, event, to));
                tracing::trace!(from, event, to, "fsm: transition");
            }
            None => tracing::trace!(state = from, event, "fsm: event ignored"),
        }
        self.current_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: StateId = 0;
    const SUBMITTING: StateId = 1;
    const SUCCESS: StateId = 2;
    const FAILURE: StateId = 3;

    const SUBMIT: EventId = 1;
    const ACCEPTED: EventId = 2;
    const REJECTED: EventId = 3;
    const EXPIRED: EventId = 4;

    fn form_machine() -> StateMachine {
        StateMachine::new(
            IDLE,
            vec![
                Transition::new(IDLE, SUBMIT, SUBMITTING),
                Transition::new(SUBMITTING, ACCEPTED, SUCCESS),
                Transition::new(SUBMITTING, REJECTED, FAILURE),
                Transition::new(SUCCESS, EXPIRED, IDLE),
                Transition::new(FAILURE, EXPIRED, IDLE),
            ],
        )
    }

    #[test]
    fn test_round_trip_through_failure() {
        let mut fsm = form_machine();
        assert_eq!(fsm.current_state(), IDLE);

        assert_eq!(fsm.send(SUBMIT), SUBMITTING);
        assert_eq!(fsm.send(REJECTED), FAILURE);
        assert_eq!(fsm.send(EXPIRED), IDLE);
        assert!(fsm.is_in(IDLE));
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        let mut fsm = form_machine();

        // Can't resolve a submission that never started
        assert!(!fsm.can_send(ACCEPTED));
        assert_eq!(fsm.send(ACCEPTED), IDLE);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_builder_and_history() {
        let mut fsm = StateMachine::builder(IDLE)
            .on(IDLE, SUBMIT, SUBMITTING)
            .on(SUBMITTING, ACCEPTED, SUCCESS)
            .build();

        assert!(fsm.can_send(SUBMIT));
        fsm.send(SUBMIT);
        fsm.send(SUBMIT);
        fsm.send(ACCEPTED);

        assert_eq!(
            fsm.history(),
            &[(IDLE, SUBMIT, SUBMITTING), (SUBMITTING, ACCEPTED, SUCCESS)]
        );
    }

    #[test]
    fn test_later_row_wins() {
        let mut fsm = StateMachine::new(
            IDLE,
            vec![
                Transition::new(IDLE, SUBMIT, FAILURE),
                Transition::new(IDLE, SUBMIT, SUBMITTING),
            ],
        );
        assert_eq!(fsm.send(SUBMIT), SUBMITTING);
    }
}
