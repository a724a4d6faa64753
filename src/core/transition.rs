//! The outcome of a single dispatch.

use serde::{Deserialize, Serialize};

/// Record of one `transition(event)` call.
///
/// A `Valid` record means some handler accepted the event and the machine
/// committed `to_state`. An `Invalid` record means nothing accepted the
/// event in `from_state`; the machine's state was left untouched.
///
/// Records are plain immutable values. Two records are equal iff every field
/// is equal, and an absent side-effect differs from any present one.
///
/// # Example
///
/// ```rust
/// use switchboard::core::Transition;
///
/// let valid: Transition<&str, &str, &str> = Transition::Valid {
///     from_state: "solid",
///     event: "melt",
///     to_state: "liquid",
///     side_effect: Some("log_melted"),
/// };
///
/// assert!(valid.is_valid());
/// assert_eq!(valid.to_state(), Some(&"liquid"));
///
/// let invalid: Transition<&str, &str, &str> = Transition::Invalid {
///     from_state: "solid",
///     event: "condense",
/// };
/// assert_eq!(invalid.to_state(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transition<S, E, SE> {
    /// The event was accepted and the machine moved to `to_state`.
    Valid {
        from_state: S,
        event: E,
        to_state: S,
        side_effect: Option<SE>,
    },

    /// No handler accepted the event.
    Invalid { from_state: S, event: E },
}

impl<S, E, SE> Transition<S, E, SE> {
    /// The state the machine was in when the event arrived.
    pub fn from_state(&self) -> &S {
        match self {
            Self::Valid { from_state, .. } | Self::Invalid { from_state, .. } => from_state,
        }
    }

    /// The event that was dispatched.
    pub fn event(&self) -> &E {
        match self {
            Self::Valid { event, .. } | Self::Invalid { event, .. } => event,
        }
    }

    /// The committed target state, if the transition was valid.
    pub fn to_state(&self) -> Option<&S> {
        match self {
            Self::Valid { to_state, .. } => Some(to_state),
            Self::Invalid { .. } => None,
        }
    }

    /// The side-effect emitted by a valid transition, if any.
    pub fn side_effect(&self) -> Option<&SE> {
        match self {
            Self::Valid { side_effect, .. } => side_effect.as_ref(),
            Self::Invalid { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}
