//! Graph-driven state machine.

use crate::builder::{BuildErrors, GraphBuilder};
use crate::core::{Shape, Transition};
use crate::machine::error::MachineError;
use crate::machine::graph::{Graph, StateDefinition, TransitionTo};
use std::sync::{Mutex, PoisonError, RwLock};

/// State machine executing a [`Graph`].
///
/// `transition` resolves the current state's definition (first matching
/// state matcher wins), then the handler for the event (first matching
/// event matcher wins), commits the target state, and finally notifies
/// listeners in this order:
///
/// 1. every graph-level transition listener, valid or invalid;
/// 2. for valid transitions, the exit listeners of the from-state's
///    definition, then the enter listeners of the to-state's definition.
///
/// Resolution and commit happen under a per-machine lock, so concurrent
/// callers observe one serialized sequence of commits. Listeners run after
/// the lock is released.
///
/// # Example
///
/// ```rust
/// use switchboard::builder::go_to;
/// use switchboard::core::{Matcher, Transition};
/// use switchboard::machine::StateMachine;
///
/// let machine = StateMachine::<&str, &str, ()>::create(|graph| {
///     graph
///         .initial_state("off")
///         .state(Matcher::eq("off"), |s| s.on(Matcher::eq("flip"), go_to("on")))
///         .state(Matcher::eq("on"), |s| s.on(Matcher::eq("flip"), go_to("off")))
/// })
/// .unwrap();
///
/// let transition = machine.transition("flip").unwrap();
/// assert_eq!(
///     transition,
///     Transition::Valid { from_state: "off", event: "flip", to_state: "on", side_effect: None }
/// );
/// assert_eq!(machine.state(), "on");
/// ```
pub struct StateMachine<S: Shape, E: Shape, SE> {
    graph: Graph<S, E, SE>,
    state: RwLock<S>,
    dispatch: Mutex<()>,
}

impl<S: Shape, E: Shape, SE: Clone + Send + Sync + 'static> StateMachine<S, E, SE> {
    /// Build a graph with `define` and start a machine on it.
    pub fn create<F>(define: F) -> Result<Self, BuildErrors>
    where
        F: FnOnce(GraphBuilder<S, E, SE>) -> GraphBuilder<S, E, SE>,
    {
        Ok(Self::new(define(GraphBuilder::new()).build()?))
    }
}

impl<S: Shape, E: Shape, SE> StateMachine<S, E, SE> {
    /// Start a machine in the graph's initial state.
    pub fn new(graph: Graph<S, E, SE>) -> Self {
        let state = RwLock::new(graph.initial_state.clone());
        Self {
            graph,
            state,
            dispatch: Mutex::new(()),
        }
    }

    /// Current state.
    ///
    /// Does not wait for handlers or listeners of an in-flight dispatch,
    /// only for the assignment of a committing one. The value may already
    /// reflect a transition whose listeners have not run yet.
    pub fn state(&self) -> S {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn graph(&self) -> &Graph<S, E, SE> {
        &self.graph
    }

    /// Dispatch `event` from the current state.
    ///
    /// Returns `Ok(Transition::Invalid)` when no handler of the current
    /// state's definition accepts the event; the state is unchanged.
    ///
    /// # Errors
    ///
    /// [`MachineError::NoStateDefinition`] when no state definition matches
    /// the current state at all. The graph is incomplete; retrying will not
    /// help.
    pub fn transition(&self, event: E) -> Result<Transition<S, E, SE>, MachineError> {
        let (transition, from_definition) = {
            let _guard = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);
            let from_state = self.state();

            let Some(definition) = self.graph.definition_for(&from_state) else {
                tracing::error!(
                    state = from_state.shape(),
                    event = event.shape(),
                    "no state definition matches current state"
                );
                return Err(MachineError::NoStateDefinition {
                    state: format!("{from_state:?}"),
                });
            };

            tracing::trace!(
                state = from_state.shape(),
                event = event.shape(),
                "resolved state definition"
            );

            let transition = match definition.handler_for(&event) {
                Some(handler) => {
                    let TransitionTo {
                        to_state,
                        side_effect,
                    } = handler(&from_state, &event);
                    self.commit(to_state.clone());
                    Transition::Valid {
                        from_state,
                        event,
                        to_state,
                        side_effect,
                    }
                }
                None => Transition::Invalid { from_state, event },
            };
            (transition, definition)
        };

        self.notify(&transition, from_definition);
        Ok(transition)
    }

    /// Swap in the new state. The previous value is dropped after the write
    /// lock is released.
    fn commit(&self, next: S) {
        let previous = std::mem::replace(
            &mut *self.state.write().unwrap_or_else(PoisonError::into_inner),
            next,
        );
        drop(previous);
    }

    fn notify(
        &self,
        transition: &Transition<S, E, SE>,
        from_definition: &StateDefinition<S, E, SE>,
    ) {
        for listener in &self.graph.on_transition {
            listener(transition);
        }

        match transition {
            Transition::Valid {
                from_state,
                event,
                to_state,
                ..
            } => {
                tracing::debug!(
                    from = from_state.shape(),
                    event = event.shape(),
                    to = to_state.shape(),
                    "transition committed"
                );

                for listener in &from_definition.on_exit {
                    listener(from_state, event);
                }

                match self.graph.definition_for(to_state) {
                    Some(to_definition) => {
                        for listener in &to_definition.on_enter {
                            listener(to_state, event);
                        }
                    }
                    None => tracing::warn!(
                        to = to_state.shape(),
                        "committed a state no definition matches; next dispatch will fail"
                    ),
                }
            }
            Transition::Invalid { from_state, event } => {
                tracing::debug!(
                    from = from_state.shape(),
                    event = event.shape(),
                    "no handler accepts event"
                );
            }
        }
    }
}
