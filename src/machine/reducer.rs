//! Reducer-driven state machine.

use crate::core::Transition;
use crate::machine::graph::TransitionListener;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Function computing the next state and optional side-effect, or `None`
/// when the event does not apply in the given state.
pub type ReducerFn<S, E, SE> = Box<dyn Fn(&S, &E) -> Option<(S, Option<SE>)> + Send + Sync>;

/// State machine whose whole dispatch table is a single function.
///
/// The function runs under the machine's lock together with the state
/// commit. The optional transition listener runs after the lock is
/// released. There are no matchers and no enter/exit listeners.
///
/// # Example
///
/// ```rust
/// use switchboard::core::Transition;
/// use switchboard::machine::ReducerMachine;
///
/// let counter = ReducerMachine::new(0_u32, |count: &u32, step: &u32| {
///     (*step > 0).then(|| (count + step, (count + step >= 10).then_some("ten")))
/// });
///
/// assert!(counter.transition(4).is_valid());
/// assert_eq!(counter.transition(0), Transition::Invalid { from_state: 4, event: 0 });
/// assert_eq!(counter.transition(6).side_effect(), Some(&"ten"));
/// assert_eq!(counter.state(), 10);
/// ```
pub struct ReducerMachine<S, E, SE> {
    state: RwLock<S>,
    dispatch: Mutex<()>,
    reducer: ReducerFn<S, E, SE>,
    listener: Option<TransitionListener<S, E, SE>>,
}

impl<S, E, SE> ReducerMachine<S, E, SE>
where
    S: Clone + Debug + Send + Sync + 'static,
    E: Debug + Send + Sync + 'static,
    SE: Send + Sync + 'static,
{
    /// Start a machine in `initial` dispatching through `reducer`.
    pub fn new<F>(initial: S, reducer: F) -> Self
    where
        F: Fn(&S, &E) -> Option<(S, Option<SE>)> + Send + Sync + 'static,
    {
        Self {
            state: RwLock::new(initial),
            dispatch: Mutex::new(()),
            reducer: Box::new(reducer),
            listener: None,
        }
    }

    /// Like `new`, with a listener notified of every transition.
    pub fn with_listener<L, F>(initial: S, listener: L, reducer: F) -> Self
    where
        L: Fn(&Transition<S, E, SE>) + Send + Sync + 'static,
        F: Fn(&S, &E) -> Option<(S, Option<SE>)> + Send + Sync + 'static,
    {
        Self {
            listener: Some(Arc::new(listener)),
            ..Self::new(initial, reducer)
        }
    }

    /// Current state. Waits at most for the assignment of a committing
    /// dispatch, never for the reducer or listener.
    pub fn state(&self) -> S {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn commit(&self, next: S) {
        let previous = std::mem::replace(
            &mut *self.state.write().unwrap_or_else(PoisonError::into_inner),
            next,
        );
        drop(previous);
    }

    /// Dispatch `event` through the reducer.
    pub fn transition(&self, event: E) -> Transition<S, E, SE> {
        let transition = {
            let _guard = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);
            let from_state = self.state();

            match (self.reducer)(&from_state, &event) {
                Some((to_state, side_effect)) => {
                    self.commit(to_state.clone());
                    Transition::Valid {
                        from_state,
                        event,
                        to_state,
                        side_effect,
                    }
                }
                None => Transition::Invalid { from_state, event },
            }
        };

        match &transition {
            Transition::Valid {
                from_state,
                event,
                to_state,
                ..
            } => tracing::debug!(
                from = ?from_state,
                event = ?event,
                to = ?to_state,
                "reducer transition committed"
            ),
            Transition::Invalid { from_state, event } => tracing::debug!(
                from = ?from_state,
                event = ?event,
                "reducer rejected event"
            ),
        }

        if let Some(listener) = &self.listener {
            listener(&transition);
        }
        transition
    }
}

impl<S, E> ReducerMachine<S, E, ()>
where
    S: Clone + Debug + Send + Sync + 'static,
    E: Debug + Send + Sync + 'static,
{
    /// A machine without side-effects: `reducer` only computes the next
    /// state, and every valid record carries `side_effect: None`.
    pub fn state_only<F>(initial: S, reducer: F) -> Self
    where
        F: Fn(&S, &E) -> Option<S> + Send + Sync + 'static,
    {
        Self::new(initial, move |state: &S, event: &E| {
            reducer(state, event).map(|next| (next, None))
        })
    }
}
