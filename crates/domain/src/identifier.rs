/// Declares a surrogate identifier newtype backed by a store-assigned `i64`.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            /// Wraps a store-assigned identifier value.
            #[must_use]
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying identifier value.
            #[must_use]
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}
