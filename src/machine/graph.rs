//! Immutable graph description of a state machine.

use crate::builder::GraphBuilder;
use crate::core::{Matcher, Shape, Transition};
use std::fmt;
use std::sync::Arc;

/// Listener invoked with every transition record, valid or invalid.
pub type TransitionListener<S, E, SE> = Arc<dyn Fn(&Transition<S, E, SE>) + Send + Sync>;

/// Listener invoked with `(state, causing_event)` on enter or exit.
pub type StateListener<S, E> = Arc<dyn Fn(&S, &E) + Send + Sync>;

/// Handler computing the target of a transition from `(state, event)`.
pub type TransitionFn<S, E, SE> = Arc<dyn Fn(&S, &E) -> TransitionTo<S, SE> + Send + Sync>;

/// Target state and optional side-effect returned by a transition handler.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionTo<S, SE> {
    pub to_state: S,
    pub side_effect: Option<SE>,
}

impl<S: Clone, SE> TransitionTo<S, SE> {
    /// Move to `state` without a side-effect.
    pub fn to(state: S) -> Self {
        Self {
            to_state: state,
            side_effect: None,
        }
    }

    /// Move to `state`, emitting `side_effect`.
    pub fn to_with(state: S, side_effect: SE) -> Self {
        Self {
            to_state: state,
            side_effect: Some(side_effect),
        }
    }

    /// Stay in `state`.
    ///
    /// This is still a valid self-loop: exit and enter listeners of the
    /// state's definition fire as for any other transition.
    pub fn stay(state: &S) -> Self {
        Self::to(state.clone())
    }

    /// Stay in `state`, emitting `side_effect`.
    pub fn stay_with(state: &S, side_effect: SE) -> Self {
        Self::to_with(state.clone(), side_effect)
    }
}

/// Event handlers and lifecycle listeners for states matching one matcher.
pub struct StateDefinition<S: Shape, E: Shape, SE> {
    pub(crate) transitions: Vec<(Matcher<E>, TransitionFn<S, E, SE>)>,
    pub(crate) on_enter: Vec<StateListener<S, E>>,
    pub(crate) on_exit: Vec<StateListener<S, E>>,
}

impl<S: Shape, E: Shape, SE> StateDefinition<S, E, SE> {
    /// First handler, in insertion order, whose matcher accepts `event`.
    pub(crate) fn handler_for(&self, event: &E) -> Option<&TransitionFn<S, E, SE>> {
        self.transitions
            .iter()
            .find(|(matcher, _)| matcher.matches(event))
            .map(|(_, handler)| handler)
    }

    /// Event matchers in the order they are consulted.
    pub fn event_matchers(&self) -> impl Iterator<Item = &Matcher<E>> {
        self.transitions.iter().map(|(matcher, _)| matcher)
    }

    pub fn enter_listener_count(&self) -> usize {
        self.on_enter.len()
    }

    pub fn exit_listener_count(&self) -> usize {
        self.on_exit.len()
    }
}

impl<S: Shape, E: Shape, SE> Clone for StateDefinition<S, E, SE> {
    fn clone(&self) -> Self {
        Self {
            transitions: self.transitions.clone(),
            on_enter: self.on_enter.clone(),
            on_exit: self.on_exit.clone(),
        }
    }
}

impl<S: Shape, E: Shape, SE> fmt::Debug for StateDefinition<S, E, SE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("events", &self.event_matchers().collect::<Vec<_>>())
            .field("on_enter", &self.on_enter.len())
            .field("on_exit", &self.on_exit.len())
            .finish()
    }
}

/// Immutable description of a state machine.
///
/// Built once by a [`GraphBuilder`] and never mutated afterwards. State
/// definitions are consulted in insertion order and the first matching one
/// wins. Cloning a graph is cheap: handlers and listeners are shared.
pub struct Graph<S: Shape, E: Shape, SE> {
    pub(crate) initial_state: S,
    pub(crate) states: Vec<(Matcher<S>, StateDefinition<S, E, SE>)>,
    pub(crate) on_transition: Vec<TransitionListener<S, E, SE>>,
}

impl<S: Shape, E: Shape, SE: Clone + Send + Sync + 'static> Graph<S, E, SE> {
    /// Start a builder for a new graph.
    pub fn builder() -> GraphBuilder<S, E, SE> {
        GraphBuilder::new()
    }

    /// Start a builder seeded with a copy of this graph.
    ///
    /// The new graph may override definitions and add listeners; this graph
    /// is left untouched.
    pub fn derive(&self) -> GraphBuilder<S, E, SE> {
        GraphBuilder::from_graph(self)
    }
}

impl<S: Shape, E: Shape, SE> Graph<S, E, SE> {
    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// First definition, in insertion order, whose matcher accepts `state`.
    pub fn definition_for(&self, state: &S) -> Option<&StateDefinition<S, E, SE>> {
        self.states
            .iter()
            .find(|(matcher, _)| matcher.matches(state))
            .map(|(_, definition)| definition)
    }

    /// State matchers in the order they are consulted.
    pub fn state_matchers(&self) -> impl Iterator<Item = &Matcher<S>> {
        self.states.iter().map(|(matcher, _)| matcher)
    }

    pub fn transition_listener_count(&self) -> usize {
        self.on_transition.len()
    }
}

impl<S: Shape, E: Shape, SE> Clone for Graph<S, E, SE> {
    fn clone(&self) -> Self {
        Self {
            initial_state: self.initial_state.clone(),
            states: self.states.clone(),
            on_transition: self.on_transition.clone(),
        }
    }
}

impl<S: Shape, E: Shape, SE> fmt::Debug for Graph<S, E, SE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("initial_state", &self.initial_state)
            .field("states", &self.states)
            .field("on_transition", &self.on_transition.len())
            .finish()
    }
}
