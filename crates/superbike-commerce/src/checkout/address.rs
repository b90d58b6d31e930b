//! Shipping address.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Where the order ships to. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Also used as the wallet number.
    pub phone: String,
    /// Street address.
    pub address: String,
    pub city: String,
    pub state: String,
    /// PIN code.
    pub zip_code: String,
}

impl ShippingAddress {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as a single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }

    /// Names of the blank fields, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip code", &self.zip_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.missing_fields().is_empty() {
            Ok(())
        } else {
            Err(CommerceError::ValidationError(
                "Please fill in all required fields".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShippingAddress {
        ShippingAddress {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            zip_code: "560001".to_string(),
        }
    }

    #[test]
    fn test_complete_address_validates() {
        let address = complete();
        assert!(address.validate().is_ok());
        assert_eq!(address.full_name(), "Asha Rao");
        assert_eq!(address.one_line(), "12 MG Road, Bengaluru, Karnataka 560001");
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut address = complete();
        address.city = "   ".to_string();
        address.zip_code.clear();
        assert_eq!(address.missing_fields(), vec!["city", "zip code"]);

        let err = address.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields");
        assert!(ShippingAddress::default().validate().is_err());
    }
}
