//! Macros for ergonomic state machine construction.

/// Generate a state enum and its `State` trait implementation.
///
/// # Example
///
/// ```
/// use smcore::core::State;
/// use smcore::state_enum;
///
/// state_enum! {
///     pub enum Oven {
///         Top,
///         Initial,
///         Heating,
///         Baking,
///         Toasting,
///         DoorOpen,
///     }
/// }
///
/// assert_eq!(Oven::Baking.name(), "Baking");
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

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
