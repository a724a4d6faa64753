//! Dispatch-time errors.

use thiserror::Error;

/// Faults raised while dispatching an event.
///
/// These are configuration errors in the graph, not inapplicable events:
/// an event nobody handles is reported as `Transition::Invalid` instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    /// No state definition matches the machine's current state.
    #[error("No state definition matches current state {state}; the graph is incomplete")]
    NoStateDefinition { state: String },
}
