//! Executable state machines.
//!
//! - [`Graph`]: immutable description built by a `GraphBuilder`
//! - [`StateMachine`]: runs a graph, matching states and events structurally
//! - [`ReducerMachine`]: runs a single `(state, event)` function
//!
//! Both machines serialize state mutation behind a per-instance lock and
//! notify listeners after the lock is released, so a listener may call back
//! into `transition` without deadlocking.

mod engine;
mod error;
mod graph;
mod reducer;

pub use engine::StateMachine;
pub use error::MachineError;
pub use graph::{
    Graph, StateDefinition, StateListener, TransitionFn, TransitionListener, TransitionTo,
};
pub use reducer::{ReducerFn, ReducerMachine};
