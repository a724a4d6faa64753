//! Macros for ergonomic state and event definitions.

/// Generate an enum together with its `Shape` implementation.
///
/// The shape of each value is its variant name. Unit, tuple and struct
/// variants are supported; the enum derives `Clone`, `PartialEq` and
/// `Debug`, and extra attributes are passed through.
///
/// # Example
///
/// ```
/// use switchboard::core::Shape;
/// use switchboard::shape_enum;
///
/// shape_enum! {
///     pub enum Vending {
///         Idle,
///         Paid(u32),
///         Dispensing { slot: u8, change: u32 },
///     }
/// }
///
/// assert_eq!(Vending::Paid(50).shape(), "Paid");
/// assert_eq!(Vending::Dispensing { slot: 3, change: 0 }.shape(), "Dispensing");
/// ```
#[macro_export]
macro_rules! shape_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
                $( ( $($tuple:ty),* $(,)? ) )?
                $( { $($field:ident : $field_ty:ty),* $(,)? } )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
                $( ( $($tuple),* ) )?
                $( { $($field : $field_ty),* } )?
            ),*
        }

        impl $crate::core::Shape for $name {
            fn shape(&self) -> &str {
                match self {
                    $(Self::$variant { .. } => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Matcher, Shape};

    shape_enum! {
        enum TestState {
            Initial,
            Counting(u32),
            Broken { previous: Box<TestState>, reason: String },
        }
    }

    #[test]
    fn shape_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.shape(), "Initial");
        assert_eq!(TestState::Counting(4).shape(), "Counting");

        let broken = TestState::Broken {
            previous: Box::new(TestState::Counting(1)),
            reason: "jammed".to_string(),
        };
        assert_eq!(broken.shape(), "Broken");
    }

    #[test]
    fn generated_enum_works_with_matchers() {
        let counting = Matcher::shape("Counting");

        assert!(counting.matches(&TestState::Counting(0)));
        assert!(!counting.matches(&TestState::Initial));
        assert_eq!(TestState::Counting(2), TestState::Counting(2).clone());
    }

    #[test]
    fn shape_enum_supports_visibility_and_attributes() {
        shape_enum! {
            /// Doc comments pass through.
            #[allow(dead_code)]
            pub enum PublicEvent {
                Ping,
                Pong,
            }
        }

        assert_eq!(PublicEvent::Pong.shape(), "Pong");
    }
}
