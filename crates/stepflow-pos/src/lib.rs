//! POS flows for a shoe and garment cleaning shop
//!
//! This crate puts the stepflow engine to work: three counter flows
//! (order intake, product sale, return handling), the pricing rules
//! behind them (integer currency, floored VAT, point redemption), a
//! split-payment ledger, and repository traits for the shop's data.
//!
//! All money amounts are whole tögrög as `i64`; there is no
//! fractional currency anywhere in the crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod customer;
pub mod drafts;
pub mod flows;
pub mod payment;
pub mod pricing;
pub mod repository;

pub use catalog::{Order, OrderId, OrderStatus, Product, ProductId, ServiceId, ServiceItem};
pub use customer::{CustomerBinding, CustomerId, CustomerRecord};
pub use drafts::{OrderDraft, Resolution, ReturnDraft, SellDraft};
pub use flows::{finalize_order, order_flow, return_flow, sell_flow};
pub use payment::{PaymentLedger, PaymentMethod, PaymentRegistration};
pub use pricing::{LineItem, Totals, VAT_RATE_PERCENT};
pub use repository::{CustomerRepository, OrderRepository, ProductRepository, ServiceRepository};
