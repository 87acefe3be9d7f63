//! Checkout module.
//!
//! Turns the cart into an order request, asks the payment collaborator for
//! a QR payment link when needed, and clears the cart once the order is in.

mod flow;
mod order;
mod payment;

pub use flow::place_order;
pub use order::{Customer, OrderReceipt, OrderRequest, PaymentMethod};
pub use payment::{PaymentGateway, PaymentLink, UrlPaymentGateway};
