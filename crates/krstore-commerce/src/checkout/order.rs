//! Order types handed to the checkout collaborator.

use crate::cart::LineItem;
use crate::checkout::PaymentLink;
use crate::ids::OrderId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The person placing the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Scan a QR code pointing at an externally created payment.
    #[default]
    QrCode,
    /// Pay the courier.
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::QrCode => "qr_code",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "qr" | "qr_code" | "qrcode" => Some(PaymentMethod::QrCode),
            "cash" | "cod" | "cash_on_delivery" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }

    /// Whether a payment link must be created before the order is placed.
    pub fn needs_payment_link(&self) -> bool {
        matches!(self, PaymentMethod::QrCode)
    }
}

/// Final `{items, total, customer, paymentMethod}` for an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Order reference.
    pub id: OrderId,
    /// Line items at the time of checkout.
    pub items: Vec<LineItem>,
    /// Amount due.
    pub total: Money,
    /// Customer.
    pub customer: Customer,
    /// Payment method.
    pub payment_method: PaymentMethod,
}

impl OrderRequest {
    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

/// Confirmation returned once an order is placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    /// The submitted order.
    pub request: OrderRequest,
    /// Where to pay, for QR payments.
    pub payment_link: Option<PaymentLink>,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// User-facing confirmation.
    pub message: String,
}

impl OrderReceipt {
    /// Build the confirmation message for an order.
    pub fn confirmation_message(request: &OrderRequest) -> String {
        format!(
            "Order placed! Total: {} | Customer: {}",
            request.total.display(),
            request.customer.name
        )
    }
}
