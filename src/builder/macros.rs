//! Macros for ergonomic state definitions.

/// Generate a `State` implementation for a plain enum.
///
/// Each variant's name is its identifier, which is also the name handlers
/// register `leave` and `enter` paths under.
///
/// # Example
///
/// ```
/// use lifecycle_fsm::core::State;
/// use lifecycle_fsm::state_enum;
///
/// state_enum! {
///     pub enum OrderState {
///         Draft,
///         Submitted,
///         Shipped,
///     }
///     final: [Shipped]
/// }
///
/// assert_eq!(OrderState::Draft.name(), "Draft");
/// assert!(OrderState::Shipped.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
        final: [Complete]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        let state = TestState::Initial;
        assert_eq!(state.name(), "Initial");
        assert!(!state.is_final());

        let complete = TestState::Complete;
        assert_eq!(complete.name(), "Complete");
        assert!(complete.is_final());
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
            final: [B]
        }

        let _state = PublicState::A;
    }

    #[test]
    fn state_enum_works_without_final() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert!(!MinimalState::One.is_final());
        assert_eq!(MinimalState::Two.name(), "Two");
    }
}
