//! Catalog and order records
//!
//! These are the entities the flows read from and hand to their
//! repositories. Order totals are recomputed from the line items on
//! every read rather than stored.

use crate::customer::CustomerBinding;
use crate::pricing::{LineItem, Totals};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value object: Product ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// A retail product (polish, laces, insoles)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Price per unit
    pub unit_price: i64,

    /// Units on hand
    pub stock: u32,
}

impl Product {
    /// A line item for a quantity of this product
    pub fn line(&self, quantity: u32) -> LineItem {
        LineItem::new(&self.name, self.unit_price, quantity)
    }
}

/// Value object: Service ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub String);

/// A cleaning service offered by the shop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceItem {
    /// Unique identifier
    pub id: ServiceId,

    /// Display name
    pub name: String,

    /// Price per garment or pair
    pub unit_price: i64,
}

impl ServiceItem {
    /// A line item for a quantity of this service
    pub fn line(&self, quantity: u32) -> LineItem {
        LineItem::new(&self.name, self.unit_price, quantity)
    }
}

/// Value object: Order ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

/// Where an order is in the shop's pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Taken in, not yet worked on
    Registered,

    /// Being cleaned
    InProgress,

    /// Ready for pickup
    Ready,

    /// Handed back to the customer
    PickedUp,

    /// Came back through the return flow
    Returned,
}

/// A finalized cleaning order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,

    /// Who the order belongs to
    pub customer: CustomerBinding,

    /// The services on the order
    pub lines: Vec<LineItem>,

    /// Discount granted at intake
    pub discount: i64,

    /// Points the customer asked to redeem
    pub requested_points: i64,

    /// Whether VAT was waived
    pub no_vat: bool,

    /// Pipeline status
    pub status: OrderStatus,

    /// When the order was taken in
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Register a new order from intake data
    pub fn new(
        customer: CustomerBinding,
        lines: Vec<LineItem>,
        discount: i64,
        requested_points: i64,
        no_vat: bool,
    ) -> Self {
        Self {
            id: OrderId(Uuid::new_v4().to_string()),
            customer,
            lines,
            discount,
            requested_points,
            no_vat,
            status: OrderStatus::Registered,
            created_at: Utc::now(),
        }
    }

    /// Recompute the order's totals from its line items
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.lines, self.discount, self.requested_points, self.no_vat)
    }

    /// The final amount owed on this order
    #[inline]
    pub fn payable(&self) -> i64 {
        self.totals().payable
    }
}
