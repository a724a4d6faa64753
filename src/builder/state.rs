//! Builder for a single state definition.

use crate::core::{Matcher, Shape};
use crate::machine::{StateDefinition, TransitionTo};
use std::sync::Arc;

/// Fluent builder for the handlers and listeners of one state definition.
///
/// Obtained through `GraphBuilder::state`. Handlers are consulted in the
/// order they were added; the first whose matcher accepts the event wins.
pub struct StateBuilder<S: Shape, E: Shape, SE> {
    definition: StateDefinition<S, E, SE>,
}

impl<S: Shape, E: Shape, SE: Send + Sync + 'static> StateBuilder<S, E, SE> {
    pub(crate) fn new() -> Self {
        Self {
            definition: StateDefinition {
                transitions: Vec::new(),
                on_enter: Vec::new(),
                on_exit: Vec::new(),
            },
        }
    }

    /// Handle events matching `matcher` with `handler`.
    pub fn on<F>(mut self, matcher: Matcher<E>, handler: F) -> Self
    where
        F: Fn(&S, &E) -> TransitionTo<S, SE> + Send + Sync + 'static,
    {
        self.definition
            .transitions
            .push((matcher, Arc::new(handler)));
        self
    }

    /// Handle events whose shape is `shape`.
    pub fn on_shape<F>(self, shape: &str, handler: F) -> Self
    where
        F: Fn(&S, &E) -> TransitionTo<S, SE> + Send + Sync + 'static,
    {
        self.on(Matcher::shape(shape), handler)
    }

    /// Run `listener` with `(state, event)` whenever a valid transition
    /// lands in a state governed by this definition.
    pub fn on_enter<F>(mut self, listener: F) -> Self
    where
        F: Fn(&S, &E) + Send + Sync + 'static,
    {
        self.definition.on_enter.push(Arc::new(listener));
        self
    }

    /// Run `listener` with `(state, event)` whenever a valid transition
    /// leaves a state governed by this definition.
    pub fn on_exit<F>(mut self, listener: F) -> Self
    where
        F: Fn(&S, &E) + Send + Sync + 'static,
    {
        self.definition.on_exit.push(Arc::new(listener));
        self
    }

    pub(crate) fn build(self) -> StateDefinition<S, E, SE> {
        self.definition
    }
}
