//! Newtype IDs for type-safe entity references.
//!
//! The backend issues entity IDs as UUID strings. The `define_id!` macro
//! wraps them in distinct newtypes so a listing id cannot be handed to an
//! operation expecting a user id.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use onlylands_core::define_id;
/// define_id!(ListingId);
/// define_id!(UserId);
///
/// let listing_id = ListingId::new("8d2c7e6a-6a1f-4b40-9f9d-0c6f1d3a9e21");
/// let user_id = UserId::new("f7e3b1d0-2a54-4b8f-8f0e-5d9c2a7b1c34");
///
/// // These are different types, so this won't compile:
/// // let _: ListingId = user_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ListingId);
define_id!(BrokerId);
define_id!(OrderId);
define_id!(PaymentId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trips_through_serde_as_plain_string() {
        let id = ListingId::new("8d2c7e6a-6a1f-4b40-9f9d-0c6f1d3a9e21");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"8d2c7e6a-6a1f-4b40-9f9d-0c6f1d3a9e21\"");

        let back: ListingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display_matches_inner() {
        let id = OrderId::new("order_demo_1700000000");
        assert_eq!(id.to_string(), "order_demo_1700000000");
        assert_eq!(id.as_str(), "order_demo_1700000000");
    }
}
