//! Macros for ergonomic state machine construction.

/// Generate a `State` implementation for a simple fieldless enum.
///
/// The enum gets the derives every state needs, a `ALL` constant listing
/// its variants in declaration order, and a `from_name` lookup that
/// inverts `State::name`.
///
/// # Example
///
/// ```
/// use permflow::state_enum;
/// use permflow::core::State;
///
/// state_enum! {
///     pub enum DoorState {
///         Open,
///         Closed,
///     }
/// }
///
/// assert_eq!(DoorState::ALL.len(), 2);
/// assert_eq!(DoorState::from_name("Closed"), Some(DoorState::Closed));
/// assert_eq!(DoorState::Open.name(), "Open");
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
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Look a variant up by its `State::name`.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
