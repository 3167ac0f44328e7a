//! Customer lookup state for the order flow
//!
//! "Member found, fields become read-only" is modeled as a tagged
//! variant rather than a cluster of boolean flags with parallel
//! nullable fields.

use serde::{Deserialize, Serialize};

/// Value object: Customer ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

/// A registered member of the shop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerRecord {
    /// Unique identifier
    pub id: CustomerId,

    /// Contact phone number
    pub phone: String,

    /// Customer name
    pub name: String,

    /// Loyalty points available for redemption
    pub points_balance: i64,
}

/// Whether the flow is working with a looked-up member or free-form
/// contact fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CustomerBinding {
    /// No member matched; contact fields are entered by hand
    Unbound {
        /// Phone number as typed so far
        phone: Option<String>,

        /// Name as typed so far
        name: Option<String>,
    },

    /// A member was found; their record drives the read-only fields
    Bound(CustomerRecord),
}

impl Default for CustomerBinding {
    fn default() -> Self {
        Self::Unbound {
            phone: None,
            name: None,
        }
    }
}

impl CustomerBinding {
    /// Whether a member record is bound
    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    /// The phone number, from either source
    pub fn phone(&self) -> Option<&str> {
        match self {
            Self::Unbound { phone, .. } => phone.as_deref(),
            Self::Bound(record) => Some(record.phone.as_str()),
        }
    }

    /// The name, from either source
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unbound { name, .. } => name.as_deref(),
            Self::Bound(record) => Some(record.name.as_str()),
        }
    }

    /// Points available for redemption (zero when unbound)
    pub fn points_balance(&self) -> i64 {
        match self {
            Self::Unbound { .. } => 0,
            Self::Bound(record) => record.points_balance,
        }
    }

    /// Whether both contact fields are filled in
    pub fn has_contact(&self) -> bool {
        self.phone().map(|p| !p.is_empty()).unwrap_or(false)
            && self.name().map(|n| !n.is_empty()).unwrap_or(false)
    }

    /// Bind a looked-up member record
    pub fn bind(&mut self, record: CustomerRecord) {
        *self = Self::Bound(record);
    }
}
