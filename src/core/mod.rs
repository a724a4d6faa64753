//! Core value types and predicates.
//!
//! This module contains the pure pieces the machines are assembled from:
//! - The `Shape` trait naming the kind of a state or event
//! - Matchers over shapes and values
//! - Transition records and an in-memory transition log
//!
//! Nothing in this module holds a lock or mutates shared state, except the
//! `Recorder` wrapper around a log.

mod history;
mod matcher;
mod shape;
mod transition;

pub use history::{LogEntry, Recorder, TransitionLog};
pub use matcher::Matcher;
pub use shape::Shape;
pub use transition::Transition;
