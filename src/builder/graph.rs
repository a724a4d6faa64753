//! Builder for constructing graphs.

use crate::builder::error::{BuildError, BuildErrors};
use crate::builder::state::StateBuilder;
use crate::core::{Matcher, Shape, Transition};
use crate::machine::{Graph, StateDefinition, StateMachine, TransitionListener};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing graphs with a fluent API.
///
/// A builder may start empty (`new`) or as a copy of an existing graph
/// (`from_graph` / `Graph::derive`). Definitions are copied by value, so a
/// derived builder can replace them without affecting the source graph.
pub struct GraphBuilder<S: Shape, E: Shape, SE> {
    initial_state: Option<S>,
    states: Vec<(Matcher<S>, StateDefinition<S, E, SE>)>,
    on_transition: Vec<TransitionListener<S, E, SE>>,
}

impl<S: Shape, E: Shape, SE: Clone + Send + Sync + 'static> GraphBuilder<S, E, SE> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            initial_state: None,
            states: Vec::new(),
            on_transition: Vec::new(),
        }
    }

    /// Create a builder seeded with a copy of `graph`.
    pub fn from_graph(graph: &Graph<S, E, SE>) -> Self {
        Self {
            initial_state: Some(graph.initial_state.clone()),
            states: graph.states.clone(),
            on_transition: graph.on_transition.clone(),
        }
    }

    /// Set the initial state (required).
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Define the handlers and listeners for states matching `matcher`.
    ///
    /// A definition already registered under an equal matcher is replaced
    /// in place, keeping its position; otherwise the definition is appended.
    pub fn state<F>(mut self, matcher: Matcher<S>, define: F) -> Self
    where
        F: FnOnce(StateBuilder<S, E, SE>) -> StateBuilder<S, E, SE>,
    {
        let definition = define(StateBuilder::new()).build();
        match self.states.iter_mut().find(|(m, _)| *m == matcher) {
            Some((_, existing)) => *existing = definition,
            None => self.states.push((matcher, definition)),
        }
        self
    }

    /// Define states whose shape is `shape`.
    pub fn state_shape<F>(self, shape: &str, define: F) -> Self
    where
        F: FnOnce(StateBuilder<S, E, SE>) -> StateBuilder<S, E, SE>,
    {
        self.state(Matcher::shape(shape), define)
    }

    /// Register a listener for every transition, valid or invalid.
    pub fn on_transition<F>(mut self, listener: F) -> Self
    where
        F: Fn(&Transition<S, E, SE>) + Send + Sync + 'static,
    {
        self.on_transition.push(Arc::new(listener));
        self
    }

    /// Build the graph.
    ///
    /// All problems are reported together rather than stopping at the
    /// first one.
    pub fn build(self) -> Result<Graph<S, E, SE>, BuildErrors> {
        let checks = vec![
            self.check_initial_state(),
            self.check_has_definitions(),
        ];

        match Validation::all_vec(checks) {
            Validation::Success(_) => {}
            Validation::Failure(errors) => {
                return Err(BuildErrors(errors.iter().cloned().collect()));
            }
        }

        let initial_state = self
            .initial_state
            .ok_or_else(|| BuildErrors(vec![BuildError::MissingInitialState]))?;

        tracing::trace!(
            initial = initial_state.shape(),
            states = self.states.len(),
            listeners = self.on_transition.len(),
            "built state machine graph"
        );

        Ok(Graph {
            initial_state,
            states: self.states,
            on_transition: self.on_transition,
        })
    }

    /// Build the graph and start a machine on it.
    pub fn start(self) -> Result<StateMachine<S, E, SE>, BuildErrors> {
        Ok(StateMachine::new(self.build()?))
    }

    fn check_initial_state(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        // An empty graph is reported by check_has_definitions alone.
        match &self.initial_state {
            None => Validation::fail(BuildError::MissingInitialState),
            Some(state)
                if !self.states.is_empty()
                    && !self.states.iter().any(|(m, _)| m.matches(state)) =>
            {
                Validation::fail(BuildError::UnmatchedInitialState {
                    state: format!("{state:?}"),
                })
            }
            Some(_) => Validation::success(()),
        }
    }

    fn check_has_definitions(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        if self.states.is_empty() {
            Validation::fail(BuildError::NoStateDefinitions)
        } else {
            Validation::success(())
        }
    }
}

impl<S: Shape, E: Shape, SE: Clone + Send + Sync + 'static> Default for GraphBuilder<S, E, SE> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TransitionTo;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl Shape for TestState {
        fn shape(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    type Builder = GraphBuilder<TestState, &'static str, ()>;

    #[test]
    fn builder_accumulates_all_problems() {
        let result = Builder::new().build();

        let errors = result.unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert!(errors.contains(&BuildError::MissingInitialState));
        assert!(errors.contains(&BuildError::NoStateDefinitions));
    }

    #[test]
    fn builder_requires_initial_state() {
        let result = Builder::new()
            .state(Matcher::any(), |s| s)
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildErrors(vec![BuildError::MissingInitialState])
        );
    }

    #[test]
    fn builder_requires_matchable_initial_state() {
        let result = Builder::new()
            .initial_state(TestState::Initial)
            .state_shape("Processing", |s| s)
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildErrors(vec![BuildError::UnmatchedInitialState {
                state: "Initial".to_string(),
            }])
        );
    }

    #[test]
    fn fluent_api_builds_graph() {
        let graph = Builder::new()
            .initial_state(TestState::Initial)
            .state_shape("Initial", |s| {
                s.on(Matcher::eq("start"), |_, _| {
                    TransitionTo::to(TestState::Processing)
                })
            })
            .state_shape("Processing", |s| {
                s.on(Matcher::eq("finish"), |_, _| TransitionTo::to(TestState::Complete))
            })
            .on_transition(|_| {})
            .build()
            .unwrap();

        assert_eq!(graph.initial_state(), &TestState::Initial);
        assert_eq!(graph.state_matchers().count(), 2);
        assert_eq!(graph.transition_listener_count(), 1);
    }

    #[test]
    fn equal_matcher_replaces_definition_in_place() {
        let graph = Builder::new()
            .initial_state(TestState::Initial)
            .state_shape("Initial", |s| {
                s.on(Matcher::eq("a"), |s, _| TransitionTo::stay(s))
                    .on(Matcher::eq("b"), |s, _| TransitionTo::stay(s))
            })
            .state_shape("Processing", |s| s)
            .state_shape("Initial", |s| {
                s.on(Matcher::eq("c"), |s, _| TransitionTo::stay(s))
            })
            .build()
            .unwrap();

        let shapes: Vec<_> = graph
            .state_matchers()
            .map(|m| m.required_shape())
            .collect();
        assert_eq!(shapes, vec![Some("Initial"), Some("Processing")]);

        let initial = graph.definition_for(&TestState::Initial).unwrap();
        assert_eq!(initial.event_matchers().count(), 1);
        assert!(initial.handler_for(&"c").is_some());
        assert!(initial.handler_for(&"a").is_none());
    }

    #[test]
    fn derived_builder_does_not_touch_source() {
        let base = Builder::new()
            .initial_state(TestState::Initial)
            .state_shape("Initial", |s| {
                s.on(Matcher::eq("start"), |_, _| {
                    TransitionTo::to(TestState::Processing)
                })
            })
            .on_transition(|_| {})
            .build()
            .unwrap();

        let derived = GraphBuilder::from_graph(&base)
            .initial_state(TestState::Processing)
            .state_shape("Initial", |s| s)
            .state_shape("Processing", |s| s)
            .on_transition(|_| {})
            .build()
            .unwrap();

        assert_eq!(base.initial_state(), &TestState::Initial);
        assert_eq!(base.state_matchers().count(), 1);
        assert_eq!(base.transition_listener_count(), 1);
        assert_eq!(
            base.definition_for(&TestState::Initial)
                .unwrap()
                .event_matchers()
                .count(),
            1
        );

        assert_eq!(derived.initial_state(), &TestState::Processing);
        assert_eq!(derived.state_matchers().count(), 2);
        assert_eq!(derived.transition_listener_count(), 2);
        assert_eq!(
            derived
                .definition_for(&TestState::Initial)
                .unwrap()
                .event_matchers()
                .count(),
            0
        );
    }
}
