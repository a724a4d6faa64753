//! Build errors for graph builders.

use thiserror::Error;

/// Problems found while validating a graph in `GraphBuilder::build`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial_state(state) before .build()")]
    MissingInitialState,

    #[error("No state definitions. Add at least one with .state(matcher, ..)")]
    NoStateDefinitions,

    #[error("Initial state {state} is not matched by any state definition")]
    UnmatchedInitialState { state: String },
}

/// Every problem found by a single `build()` call.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("graph is invalid ({} problem(s)): {}", .0.len(), describe(.0))]
pub struct BuildErrors(pub Vec<BuildError>);

impl BuildErrors {
    pub fn errors(&self) -> &[BuildError] {
        &self.0
    }

    pub fn contains(&self, error: &BuildError) -> bool {
        self.0.contains(error)
    }
}

fn describe(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
