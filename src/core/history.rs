//! In-memory transition log.
//!
//! A `TransitionLog` is an immutable, ordered journal of transition records
//! stamped with the time they were observed. `Recorder` wraps one behind a
//! lock so it can be registered as a transition listener and shared across
//! threads. Nothing here touches the disk.

use super::transition::Transition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// One observed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry<S, E, SE> {
    /// Position in the log, starting at 0
    pub sequence: usize,
    /// When the record was observed
    pub timestamp: DateTime<Utc>,
    /// The record itself
    pub transition: Transition<S, E, SE>,
}

/// Ordered log of transition records.
///
/// `record` returns a new log with the entry appended; the original is left
/// unchanged.
///
/// # Example
///
/// ```rust
/// use switchboard::core::{Transition, TransitionLog};
///
/// let log: TransitionLog<u8, &str, ()> = TransitionLog::new();
/// let log = log.record(Transition::Valid {
///     from_state: 1,
///     event: "up",
///     to_state: 2,
///     side_effect: None,
/// });
/// let log = log.record(Transition::Invalid { from_state: 2, event: "sideways" });
///
/// assert_eq!(log.entries().len(), 2);
/// assert_eq!(log.get_path(), vec![&1, &2]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionLog<S, E, SE> {
    entries: Vec<LogEntry<S, E, SE>>,
}

impl<S: Clone, E: Clone, SE: Clone> Default for TransitionLog<S, E, SE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, E: Clone, SE: Clone> TransitionLog<S, E, SE> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a transition observed now, returning a new log.
    pub fn record(&self, transition: Transition<S, E, SE>) -> Self {
        self.record_at(transition, Utc::now())
    }

    /// Record a transition with an explicit timestamp, returning a new log.
    pub fn record_at(&self, transition: Transition<S, E, SE>, timestamp: DateTime<Utc>) -> Self {
        let mut entries = self.entries.clone();
        entries.push(LogEntry {
            sequence: entries.len(),
            timestamp,
            transition,
        });
        Self { entries }
    }

    /// Append in place, stamped now.
    pub(crate) fn push(&mut self, transition: Transition<S, E, SE>) {
        self.entries.push(LogEntry {
            sequence: self.entries.len(),
            timestamp: Utc::now(),
            transition,
        });
    }

    /// States traversed by the valid transitions, in order.
    ///
    /// Starts with the `from_state` of the first valid entry, followed by
    /// the `to_state` of each valid entry. Invalid entries are skipped.
    pub fn get_path(&self) -> Vec<&S> {
        let mut valid = self
            .entries
            .iter()
            .filter_map(|entry| match &entry.transition {
                Transition::Valid {
                    from_state,
                    to_state,
                    ..
                } => Some((from_state, to_state)),
                Transition::Invalid { .. } => None,
            })
            .peekable();

        let mut path = Vec::new();
        if let Some((first, _)) = valid.peek() {
            path.push(*first);
        }
        for (_, to) in valid {
            path.push(to);
        }
        path
    }

    /// Time between the first and last entry, or `None` if empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn entries(&self) -> &[LogEntry<S, E, SE>] {
        &self.entries
    }

    /// Just the records, in order.
    pub fn transitions(&self) -> Vec<&Transition<S, E, SE>> {
        self.entries.iter().map(|entry| &entry.transition).collect()
    }
}

/// Thread-safe shared `TransitionLog`, usable as a transition listener.
///
/// Clones share the same underlying log.
///
/// ```rust
/// use switchboard::core::{Recorder, Transition};
///
/// let recorder: Recorder<u8, u8, ()> = Recorder::new();
/// let listener = recorder.listener();
/// listener(&Transition::Invalid { from_state: 0, event: 9 });
///
/// assert_eq!(recorder.snapshot().entries().len(), 1);
/// ```
pub struct Recorder<S, E, SE> {
    log: Arc<Mutex<TransitionLog<S, E, SE>>>,
}

impl<S, E, SE> Clone for Recorder<S, E, SE> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<S, E, SE> Default for Recorder<S, E, SE>
where
    S: Clone + Send + 'static,
    E: Clone + Send + 'static,
    SE: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E, SE> Recorder<S, E, SE>
where
    S: Clone + Send + 'static,
    E: Clone + Send + 'static,
    SE: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(TransitionLog::new())),
        }
    }

    /// Append a record to the shared log.
    pub fn observe(&self, transition: &Transition<S, E, SE>) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(transition.clone());
    }

    /// A listener closure that appends every record it receives.
    pub fn listener(&self) -> impl Fn(&Transition<S, E, SE>) + Send + Sync + 'static {
        let recorder = self.clone();
        move |transition| recorder.observe(transition)
    }

    /// Copy of the log as it stands now.
    pub fn snapshot(&self) -> TransitionLog<S, E, SE> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
