//! Pricing rules shared by every flow
//!
//! Totals are computed, never stored: every consumer recomputes them
//! from the authoritative line-item list on read, so a cached total
//! can never go stale. The canonical order of application is
//! subtotal, then VAT, then discount, then point redemption.

use serde::{Deserialize, Serialize};

/// VAT rate applied to the pre-tax subtotal, in percent
pub const VAT_RATE_PERCENT: i64 = 10;

/// One priced line of an order or sale
///
/// Amounts are integer currency units (the shop trades in whole
/// tögrög; there are no sub-units to represent).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// What is being sold or cleaned
    pub name: String,

    /// Price per unit
    pub unit_price: i64,

    /// Number of units
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item
    pub fn new(name: &str, unit_price: i64, quantity: u32) -> Self {
        Self {
            name: name.to_string(),
            unit_price,
            quantity,
        }
    }

    /// Line total: unit price times quantity
    #[inline]
    pub fn total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Sum of line totals
pub fn subtotal(items: &[LineItem]) -> i64 {
    items.iter().map(LineItem::total).sum()
}

/// Redeemable points are capped at the pre-tax subtotal
///
/// A customer may never redeem more points than the subtotal; negative
/// requests count as zero.
#[inline]
pub fn clamp_points(requested: i64, subtotal: i64) -> i64 {
    requested.clamp(0, subtotal.max(0))
}

/// Derived totals for a set of line items
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Totals {
    /// Sum of line totals before tax
    pub subtotal: i64,

    /// VAT on the subtotal (zero when the no-VAT flag is set)
    pub vat: i64,

    /// Discount applied after VAT
    pub discount: i64,

    /// Points actually redeemed, after clamping to the subtotal
    pub points_applied: i64,

    /// Final amount owed, floored at zero
    pub payable: i64,
}

impl Totals {
    /// Compute totals from the authoritative line items
    ///
    /// `payable = max(0, subtotal + vat - discount - points_applied)`.
    pub fn compute(items: &[LineItem], discount: i64, requested_points: i64, no_vat: bool) -> Self {
        let subtotal = subtotal(items);
        let vat = if no_vat {
            0
        } else {
            subtotal * VAT_RATE_PERCENT / 100
        };
        let points_applied = clamp_points(requested_points, subtotal);
        let payable = (subtotal + vat - discount - points_applied).max(0);

        Self {
            subtotal,
            vat,
            discount,
            points_applied,
            payable,
        }
    }
}
