//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing an OrderId where a ProductId is expected.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

/// Prefix of storefront order numbers.
pub const ORDER_NUMBER_PREFIX: &str = "SUP";

impl OrderId {
    /// Generate a display order number such as `SUP004217`.
    pub fn generate() -> Self {
        let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
        Self(format!("{}{:06}", ORDER_NUMBER_PREFIX, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "42".into();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.into_inner(), "42");
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new("7");
        assert_eq!(format!("{}", id), "7");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("12");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""12""#);
        let back: ProductId = serde_json::from_str(r#""12""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_order_number_format() {
        let id = OrderId::generate();
        let s = id.as_str();
        assert!(s.starts_with(ORDER_NUMBER_PREFIX));
        assert_eq!(s.len(), ORDER_NUMBER_PREFIX.len() + 6);
        assert!(s[ORDER_NUMBER_PREFIX.len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
