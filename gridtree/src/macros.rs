//! Test-support macros.

/// Generate a pair of `#[test]` functions running one body under both
/// child-complement policies.
macro_rules! policy_tests {
    ($name:ident, $body:expr) => {
        paste::paste! {
            #[test]
            fn [<$name _full>]() {
                ($body)(crate::types::RefinePolicy::Full);
            }

            #[test]
            fn [<$name _partial>]() {
                ($body)(crate::types::RefinePolicy::Partial);
            }
        }
    };
}

pub(crate) use policy_tests;
