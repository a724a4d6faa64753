//! Switchboard: a graph-based finite state machine
//!
//! Given the current state and an incoming event, a machine computes the next
//! state and an optional side-effect, reports the outcome as a typed
//! transition record, and notifies listeners. Concurrent callers observe a
//! single serialized sequence of state commits.
//!
//! # Core Concepts
//!
//! - **Shape**: the kind of a state or event value, via the `Shape` trait
//! - **Matcher**: a shape test plus predicates, deciding which definition or
//!   handler applies
//! - **Graph**: the immutable description: initial state, ordered state
//!   definitions, transition listeners
//! - **StateMachine**: runs a graph; first match wins at every level
//! - **ReducerMachine**: the same contract driven by one plain function
//!
//! # Example
//!
//! ```rust
//! use switchboard::builder::go_to_with;
//! use switchboard::core::{Matcher, Transition};
//! use switchboard::machine::{StateMachine, TransitionTo};
//! use switchboard::shape_enum;
//!
//! shape_enum! {
//!     enum Turnstile {
//!         Locked { credit: u32 },
//!         Unlocked,
//!     }
//! }
//!
//! shape_enum! {
//!     enum Input {
//!         Coin(u32),
//!         Push,
//!     }
//! }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Command {
//!     Open,
//!     Close,
//! }
//!
//! let machine = StateMachine::create(|graph| {
//!     graph
//!         .initial_state(Turnstile::Locked { credit: 0 })
//!         .state_shape("Locked", |s| {
//!             s.on_shape("Coin", |state, input| match (state, input) {
//!                 (Turnstile::Locked { credit }, Input::Coin(value)) if credit + value >= 50 => {
//!                     TransitionTo::to_with(Turnstile::Unlocked, Command::Open)
//!                 }
//!                 (Turnstile::Locked { credit }, Input::Coin(value)) => {
//!                     TransitionTo::to(Turnstile::Locked { credit: credit + value })
//!                 }
//!                 _ => TransitionTo::stay(state),
//!             })
//!         })
//!         .state_shape("Unlocked", |s| {
//!             s.on(
//!                 Matcher::eq(Input::Push),
//!                 go_to_with(Turnstile::Locked { credit: 0 }, Command::Close),
//!             )
//!         })
//! })
//! .unwrap();
//!
//! machine.transition(Input::Coin(20)).unwrap();
//! let opened = machine.transition(Input::Coin(30)).unwrap();
//!
//! assert_eq!(opened.side_effect(), Some(&Command::Open));
//! assert_eq!(machine.state(), Turnstile::Unlocked);
//! assert!(matches!(machine.transition(Input::Coin(5)), Ok(Transition::Invalid { .. })));
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, BuildErrors, GraphBuilder};
pub use crate::core::{Matcher, Shape, Transition};
pub use crate::machine::{Graph, MachineError, ReducerMachine, StateMachine, TransitionTo};
