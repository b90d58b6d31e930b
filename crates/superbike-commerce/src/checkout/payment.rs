//! Payment methods and the payment gateway seam.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::Money;

/// How long the simulated gateway takes to approve a payment.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2_000);

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    NetBanking,
    Wallet,
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "netbanking",
            PaymentMethod::Wallet => "wallet",
            PaymentMethod::CashOnDelivery => "cod",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Wallet => "Mobile Wallet",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Check if the order carries the cash-on-delivery fee.
    pub fn is_cash_on_delivery(&self) -> bool {
        matches!(self, PaymentMethod::CashOnDelivery)
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            "netbanking" | "net-banking" => Ok(PaymentMethod::NetBanking),
            "wallet" => Ok(PaymentMethod::Wallet),
            "cod" | "cash-on-delivery" => Ok(PaymentMethod::CashOnDelivery),
            other => Err(CommerceError::ValidationError(format!(
                "Unknown payment method: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the shopper entered for the chosen method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum PaymentDetails {
    Card {
        card_name: String,
        card_number: String,
        expiry_date: String,
        cvv: String,
    },
    Upi {
        upi_id: String,
    },
    NetBanking {
        bank_name: String,
    },
    Wallet {
        phone: String,
    },
    CashOnDelivery,
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Card { .. } => PaymentMethod::Card,
            PaymentDetails::Upi { .. } => PaymentMethod::Upi,
            PaymentDetails::NetBanking { .. } => PaymentMethod::NetBanking,
            PaymentDetails::Wallet { .. } => PaymentMethod::Wallet,
            PaymentDetails::CashOnDelivery => PaymentMethod::CashOnDelivery,
        }
    }

    /// Check the fields the chosen method needs.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let message = match self {
            PaymentDetails::Card {
                card_name,
                card_number,
                expiry_date,
                cvv,
            } if [card_name, card_number, expiry_date, cvv]
                .iter()
                .any(|f| is_blank(f)) =>
            {
                "Please fill in all payment details"
            }
            PaymentDetails::Upi { upi_id } if is_blank(upi_id) => "Please enter a valid UPI ID",
            PaymentDetails::NetBanking { bank_name } if is_blank(bank_name) => {
                "Please select a bank"
            }
            PaymentDetails::Wallet { phone } if is_blank(phone) => {
                "Please enter a valid mobile number"
            }
            _ => return Ok(()),
        };
        Err(CommerceError::ValidationError(message.to_string()))
    }

    /// Card number with all but the last four digits hidden.
    pub fn masked(&self) -> Option<String> {
        match self {
            PaymentDetails::Card { card_number, .. } => {
                let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
                let tail: String = digits.iter().skip(digits.len().saturating_sub(4)).collect();
                Some(format!("**** **** **** {}", tail))
            }
            _ => None,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Proof that a payment went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Gateway-side reference.
    pub reference: String,
    pub method: PaymentMethod,
    pub amount: Money,
}

/// A payment processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge `amount` using `details`.
    async fn authorize(
        &self,
        amount: Money,
        details: &PaymentDetails,
    ) -> Result<PaymentReceipt, CommerceError>;
}

/// Stands in for a real processor: waits, then approves everything.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn authorize(
        &self,
        amount: Money,
        details: &PaymentDetails,
    ) -> Result<PaymentReceipt, CommerceError> {
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, method = %details.method(), "processing payment");
        tokio::time::sleep(self.delay).await;
        Ok(PaymentReceipt {
            reference: format!("SIM-{}", chrono::Utc::now().timestamp_millis()),
            method: details.method(),
            amount,
        })
    }
}
