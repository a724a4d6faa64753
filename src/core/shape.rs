//! The `Shape` trait: a runtime kind discriminant for states and events.
//!
//! Matchers test a value's shape first and only then run their conditions,
//! so every state and event type used by a graph must be able to name its
//! own kind.

use std::fmt::Debug;

/// Trait for values that flow through a graph machine as states or events.
///
/// The shape is the coarse "what kind of value is this" answer. For an enum
/// it is the variant name; for plain identifier values (integers, strings)
/// it is the type name, so any two values of that type share a shape.
///
/// # Required Traits
///
/// - `Clone`: values are copied into transition records
/// - `PartialEq`: needed by `Matcher::eq` and record equality
/// - `Debug`: values show up in logs and error messages
/// - `Send` + `Sync`: machines are shared across threads
///
/// # Example
///
/// ```rust
/// use switchboard::core::Shape;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Door {
///     Open,
///     Closed { locked: bool },
/// }
///
/// impl Shape for Door {
///     fn shape(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed { .. } => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Closed { locked: true }.shape(), "Closed");
/// ```
pub trait Shape: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Name of this value's kind.
    fn shape(&self) -> &str;
}

macro_rules! impl_shape_for_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Shape for $ty {
                fn shape(&self) -> &str {
                    std::any::type_name::<$ty>()
                }
            }
        )*
    };
}

impl_shape_for_values!(
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    bool,
    char,
    String,
    &'static str,
);
