//! A single pickup-then-dropoff task.

use df_core::{AgentId, GridCoord, OrderId};

/// Lifecycle state of an [`Order`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStatus {
    Waiting,
    Picked,
    Delivered,
}

impl OrderStatus {
    /// The only legal next state, if any.
    #[inline]
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Waiting   => Some(OrderStatus::Picked),
            OrderStatus::Picked    => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Waiting   => "waiting",
            OrderStatus::Picked    => "picked",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active order.  `pickup != dropoff` always holds.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:      OrderId,
    pub pickup:  GridCoord,
    pub dropoff: GridCoord,
    pub status:  OrderStatus,
    /// The agent that picked the order up.  `None` while `Waiting`.
    pub carrier: Option<AgentId>,
}

impl Order {
    /// A fresh `Waiting` order.
    pub fn new(id: OrderId, pickup: GridCoord, dropoff: GridCoord) -> Self {
        debug_assert_ne!(pickup, dropoff, "order pickup and dropoff must differ");
        Self { id, pickup, dropoff, status: OrderStatus::Waiting, carrier: None }
    }

    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.status == OrderStatus::Waiting
    }

    #[inline]
    pub fn is_in_transit(&self) -> bool {
        self.status == OrderStatus::Picked
    }
}
