//! Payment collaborator.
//!
//! Settlement happens elsewhere. The storefront only needs a URL to encode
//! into a QR code for the customer to scan.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A payment the customer can complete out of band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentLink {
    /// URL to render as a QR code.
    pub url: String,
}

/// Creates payments for a given amount.
pub trait PaymentGateway {
    /// Create a payment and return where to pay it.
    fn create_payment(&self, amount: &Money) -> Result<PaymentLink, CommerceError>;
}

/// Gateway that derives the payment URL from a configured endpoint.
#[derive(Debug, Clone)]
pub struct UrlPaymentGateway {
    endpoint: String,
}

impl UrlPaymentGateway {
    /// Create a gateway for `endpoint` (an http or https URL).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl PaymentGateway for UrlPaymentGateway {
    fn create_payment(&self, amount: &Money) -> Result<PaymentLink, CommerceError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(CommerceError::PaymentFailed(format!(
                "invalid payment endpoint: {:?}",
                endpoint
            )));
        }
        if amount.is_negative() || amount.is_zero() {
            return Err(CommerceError::PaymentFailed(format!(
                "invalid amount {}",
                amount.display()
            )));
        }

        let separator = if endpoint.contains('?') { '&' } else { '?' };
        Ok(PaymentLink {
            url: format!(
                "{}{}amount={}&currency={}",
                endpoint,
                separator,
                amount.display_amount(),
                amount.currency.code()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_url_gateway() {
        let gateway = UrlPaymentGateway::new("http://localhost:8000/api/payment");
        let link = gateway.create_payment(&Money::new(100000, Currency::USD)).unwrap();
        assert_eq!(
            link.url,
            "http://localhost:8000/api/payment?amount=1000.00&currency=USD"
        );
    }

    #[test]
    fn test_url_gateway_existing_query() {
        let gateway = UrlPaymentGateway::new("https://pay.example.com/new?shop=kr");
        let link = gateway.create_payment(&Money::new(50, Currency::USD)).unwrap();
        assert!(link.url.starts_with("https://pay.example.com/new?shop=kr&amount=0.50"));
    }

    #[test]
    fn test_url_gateway_rejects_bad_input() {
        let bad = UrlPaymentGateway::new("ftp://nope");
        assert!(bad.create_payment(&Money::new(100, Currency::USD)).is_err());

        let good = UrlPaymentGateway::new("https://pay.example.com");
        assert!(good.create_payment(&Money::zero(Currency::USD)).is_err());
    }
}
