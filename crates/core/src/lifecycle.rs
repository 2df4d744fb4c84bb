//! Lifecycle stages of a relocation shipment.

use serde::{Deserialize, Serialize};
use crate::error::CoreError;

/// Stage a shipment can be in, listed in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// First contact with the client
    Inquiry,
    /// On-site inspection of the goods
    Survey,
    /// Quotation sent to the client
    Quotation,
    /// Client accepted the quotation
    Approved,
    /// Carrier space booked
    Booking,
    /// Goods packed at origin
    Packing,
    /// Goods collected from origin
    Pickup,
    /// Goods moving between origin and destination
    InTransit,
    /// Customs clearance
    Customs,
    /// Goods delivered to destination
    Delivery,
    /// Goods unpacked at destination
    Unpacking,
    /// Move closed out
    Closed,
}

impl LifecycleState {
    /// All stages in canonical order.
    pub const ALL: [LifecycleState; 12] = [
        LifecycleState::Inquiry,
        LifecycleState::Survey,
        LifecycleState::Quotation,
        LifecycleState::Approved,
        LifecycleState::Booking,
        LifecycleState::Packing,
        LifecycleState::Pickup,
        LifecycleState::InTransit,
        LifecycleState::Customs,
        LifecycleState::Delivery,
        LifecycleState::Unpacking,
        LifecycleState::Closed,
    ];

    /// Wire name of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Inquiry => "inquiry",
            LifecycleState::Survey => "survey",
            LifecycleState::Quotation => "quotation",
            LifecycleState::Approved => "approved",
            LifecycleState::Booking => "booking",
            LifecycleState::Packing => "packing",
            LifecycleState::Pickup => "pickup",
            LifecycleState::InTransit => "in_transit",
            LifecycleState::Customs => "customs",
            LifecycleState::Delivery => "delivery",
            LifecycleState::Unpacking => "unpacking",
            LifecycleState::Closed => "closed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleState::Inquiry => "Inquiry",
            LifecycleState::Survey => "Survey",
            LifecycleState::Quotation => "Quotation",
            LifecycleState::Approved => "Approved",
            LifecycleState::Booking => "Booking",
            LifecycleState::Packing => "Packing",
            LifecycleState::Pickup => "Pickup",
            LifecycleState::InTransit => "In transit",
            LifecycleState::Customs => "Customs",
            LifecycleState::Delivery => "Delivery",
            LifecycleState::Unpacking => "Unpacking",
            LifecycleState::Closed => "Closed",
        }
    }

    /// Days allotted to this stage when a shipment is initialized.
    pub fn default_sla_days(&self) -> u32 {
        match self {
            LifecycleState::Inquiry => 1,
            LifecycleState::Survey => 3,
            LifecycleState::Quotation => 2,
            LifecycleState::Approved => 5,
            LifecycleState::Booking => 3,
            LifecycleState::Packing => 2,
            LifecycleState::Pickup => 1,
            LifecycleState::InTransit => 30,
            LifecycleState::Customs => 7,
            LifecycleState::Delivery => 2,
            LifecycleState::Unpacking => 1,
            LifecycleState::Closed => 1,
        }
    }

    /// The stage that follows this one, if any.
    pub fn next(&self) -> Option<LifecycleState> {
        let idx = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LifecycleState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownState(s.to_string()))
    }
}
