//! Composable matchers over states and events.
//!
//! A matcher decides whether a value "is" a given shape: an optional shape
//! test followed by conditions that must all hold. Matchers are pure and may
//! be evaluated any number of times.

use super::shape::Shape;
use std::fmt;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

enum Condition<T> {
    Equals(T),
    Where(Predicate<T>),
}

impl<T: Shape> Condition<T> {
    fn check(&self, candidate: &T) -> bool {
        match self {
            Self::Equals(value) => candidate == value,
            Self::Where(predicate) => predicate(candidate),
        }
    }
}

impl<T: Shape> Clone for Condition<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Equals(value) => Self::Equals(value.clone()),
            Self::Where(predicate) => Self::Where(Arc::clone(predicate)),
        }
    }
}

impl<T: Shape> PartialEq for Condition<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Equals(a), Self::Equals(b)) => a == b,
            (Self::Where(a), Self::Where(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Pure predicate deciding whether a value has a given shape.
///
/// `matches` is true iff the shape test passes (when one is set) and every
/// condition holds, evaluated left to right and short-circuiting on the
/// first failure.
///
/// Two matchers are equal when they test the same shape and carry pairwise
/// equal conditions. `eq` conditions compare by value; `where_` predicates
/// compare by identity, so a clone of a matcher equals the original.
///
/// # Example
///
/// ```rust
/// use switchboard::core::{Matcher, Shape};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Account {
///     Open { balance: i64 },
///     Frozen,
/// }
///
/// impl Shape for Account {
///     fn shape(&self) -> &str {
///         match self {
///             Self::Open { .. } => "Open",
///             Self::Frozen => "Frozen",
///         }
///     }
/// }
///
/// let overdrawn = Matcher::shape("Open")
///     .where_(|a: &Account| matches!(a, Account::Open { balance } if *balance < 0));
///
/// assert!(overdrawn.matches(&Account::Open { balance: -5 }));
/// assert!(!overdrawn.matches(&Account::Open { balance: 5 }));
/// assert!(!overdrawn.matches(&Account::Frozen));
/// ```
pub struct Matcher<T: Shape> {
    shape: Option<String>,
    conditions: Vec<Condition<T>>,
}

impl<T: Shape> Matcher<T> {
    /// Match every value of `T`.
    pub fn any() -> Self {
        Self {
            shape: None,
            conditions: Vec::new(),
        }
    }

    /// Match every value whose shape is `shape`.
    pub fn shape(shape: impl Into<String>) -> Self {
        Self {
            shape: Some(shape.into()),
            conditions: Vec::new(),
        }
    }

    /// Match exactly `value`: same shape, and equal to it.
    ///
    /// Useful when states or events are plain identifiers that shape alone
    /// cannot tell apart.
    ///
    /// ```rust
    /// use switchboard::core::Matcher;
    ///
    /// let two = Matcher::eq(2_u8);
    /// assert!(two.matches(&2));
    /// assert!(!two.matches(&3));
    /// ```
    pub fn eq(value: T) -> Self {
        Self {
            shape: Some(value.shape().to_string()),
            conditions: vec![Condition::Equals(value)],
        }
    }

    /// Add a predicate that must also hold. Predicates accumulate.
    pub fn where_<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.conditions.push(Condition::Where(Arc::new(predicate)));
        self
    }

    /// Check whether `candidate` satisfies this matcher.
    pub fn matches(&self, candidate: &T) -> bool {
        if let Some(shape) = &self.shape {
            if candidate.shape() != shape {
                return false;
            }
        }
        self.conditions.iter().all(|c| c.check(candidate))
    }

    /// The shape this matcher requires, or `None` for `any()`.
    pub fn required_shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }
}

impl<T: Shape> Clone for Matcher<T> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            conditions: self.conditions.clone(),
        }
    }
}

impl<T: Shape> PartialEq for Matcher<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.conditions == other.conditions
    }
}

impl<T: Shape> fmt::Debug for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Matcher");
        out.field("shape", &self.shape.as_deref().unwrap_or("*"));
        for condition in &self.conditions {
            match condition {
                Condition::Equals(value) => out.field("eq", value),
                Condition::Where(_) => out.field("where", &".."),
            };
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Idle,
        Counting(u32),
        Done,
    }

    impl Shape for TestState {
        fn shape(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Counting(_) => "Counting",
                Self::Done => "Done",
            }
        }
    }

    #[test]
    fn any_matches_everything() {
        let matcher = Matcher::<TestState>::any();

        assert!(matcher.matches(&TestState::Idle));
        assert!(matcher.matches(&TestState::Counting(7)));
        assert!(matcher.matches(&TestState::Done));
        assert_eq!(matcher.required_shape(), None);
    }

    #[test]
    fn shape_matches_only_that_shape() {
        let matcher = Matcher::<TestState>::shape("Counting");

        assert!(matcher.matches(&TestState::Counting(0)));
        assert!(matcher.matches(&TestState::Counting(99)));
        assert!(!matcher.matches(&TestState::Idle));
    }

    #[test]
    fn eq_matches_exact_value() {
        let matcher = Matcher::eq(TestState::Counting(3));

        assert!(matcher.matches(&TestState::Counting(3)));
        assert!(!matcher.matches(&TestState::Counting(4)));
        assert!(!matcher.matches(&TestState::Done));
    }

    #[test]
    fn where_predicates_accumulate() {
        let matcher = Matcher::shape("Counting")
            .where_(|s: &TestState| matches!(s, TestState::Counting(n) if *n > 2))
            .where_(|s: &TestState| matches!(s, TestState::Counting(n) if *n < 5));

        assert!(!matcher.matches(&TestState::Counting(2)));
        assert!(matcher.matches(&TestState::Counting(3)));
        assert!(matcher.matches(&TestState::Counting(4)));
        assert!(!matcher.matches(&TestState::Counting(5)));
    }

    #[test]
    fn shape_is_checked_before_predicates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let matcher = Matcher::shape("Counting").where_(move |_: &TestState| {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        });

        assert!(!matcher.matches(&TestState::Idle));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(matcher.matches(&TestState::Counting(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn predicates_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let matcher = Matcher::<TestState>::any()
            .where_(|_| false)
            .where_(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                true
            });

        assert!(!matcher.matches(&TestState::Done));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn matcher_equality() {
        assert_eq!(Matcher::<TestState>::any(), Matcher::any());
        assert_eq!(
            Matcher::<TestState>::shape("Idle"),
            Matcher::shape("Idle")
        );
        assert_eq!(
            Matcher::eq(TestState::Counting(1)),
            Matcher::eq(TestState::Counting(1))
        );
        assert_ne!(
            Matcher::eq(TestState::Counting(1)),
            Matcher::eq(TestState::Counting(2))
        );
        assert_ne!(Matcher::<TestState>::any(), Matcher::shape("Idle"));

        let filtered = Matcher::<TestState>::shape("Counting").where_(|_| true);
        assert_eq!(filtered.clone(), filtered);
        assert_ne!(
            filtered,
            Matcher::<TestState>::shape("Counting").where_(|_| true)
        );
    }

    #[test]
    fn eq_works_for_plain_values() {
        let matcher = Matcher::eq("locked");

        assert!(matcher.matches(&"locked"));
        assert!(!matcher.matches(&"unlocked"));
    }

    #[test]
    fn matcher_is_deterministic() {
        let matcher = Matcher::shape("Counting")
            .where_(|s: &TestState| matches!(s, TestState::Counting(n) if n % 2 == 0));
        let state = TestState::Counting(4);

        assert_eq!(matcher.matches(&state), matcher.matches(&state));
    }
}
