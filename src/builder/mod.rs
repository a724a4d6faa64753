//! Builder API for ergonomic graph construction.
//!
//! This module provides fluent builders and macros for declaring state
//! machine graphs with minimal boilerplate while keeping matching typed.

pub mod error;
pub mod graph;
pub mod macros;
pub mod state;

pub use error::{BuildError, BuildErrors};
pub use graph::GraphBuilder;
pub use state::StateBuilder;

use crate::core::Shape;
use crate::machine::TransitionTo;

/// Handler that always moves to `target`, without a side-effect.
///
/// # Example
///
/// ```
/// use switchboard::builder::go_to;
/// use switchboard::core::Matcher;
/// use switchboard::machine::Graph;
///
/// let graph = Graph::<u8, &str, ()>::builder()
///     .initial_state(1)
///     .state(Matcher::eq(1), |s| s.on(Matcher::eq("up"), go_to(2)))
///     .state(Matcher::eq(2), |s| s)
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.initial_state(), &1);
/// ```
pub fn go_to<S, E, SE>(target: S) -> impl Fn(&S, &E) -> TransitionTo<S, SE> + Send + Sync + 'static
where
    S: Shape,
    E: 'static,
    SE: 'static,
{
    move |_, _| TransitionTo::to(target.clone())
}

/// Handler that always moves to `target`, emitting a copy of `side_effect`.
pub fn go_to_with<S, E, SE>(
    target: S,
    side_effect: SE,
) -> impl Fn(&S, &E) -> TransitionTo<S, SE> + Send + Sync + 'static
where
    S: Shape,
    E: 'static,
    SE: Clone + Send + Sync + 'static,
{
    move |_, _| TransitionTo::to_with(target.clone(), side_effect.clone())
}

/// Handler that keeps the current state: a valid self-loop.
pub fn stay<S, E, SE>() -> impl Fn(&S, &E) -> TransitionTo<S, SE> + Send + Sync + 'static
where
    S: Shape,
    E: 'static,
    SE: 'static,
{
    |state, _| TransitionTo::stay(state)
}
