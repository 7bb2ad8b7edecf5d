//! The canonical world state, owned exclusively by [`Sim`][crate::Sim].

use std::collections::HashMap;

use df_agent::AgentStore;
use df_core::{AgentId, GridCoord, GridGeometry, OrderId, Tick};
use df_orders::{OrderRegistry, OrderStatus};
use thiserror::Error;

/// A broken world invariant.  Never expected; seeing one means the tick
/// algorithm has a defect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{first} and {second} both occupy {cell}")]
    SharedCell { cell: GridCoord, first: AgentId, second: AgentId },

    #[error("{agent} is outside the grid at {cell}")]
    OutOfBounds { agent: AgentId, cell: GridCoord },

    #[error("{id} is out of order or not below the id counter")]
    OrderIdSequence { id: OrderId },

    #[error("{active} active orders exceed the cap of {max}")]
    OrderCapacity { active: usize, max: usize },

    #[error("{0} has identical pickup and dropoff")]
    DegenerateOrder(OrderId),

    #[error("{0} was delivered but is still active")]
    LingeringDelivery(OrderId),

    #[error("{agent} and {order} disagree about who carries what")]
    CargoMismatch { agent: AgentId, order: OrderId },
}

/// Grid, clock, agents, and active orders.
#[derive(Clone, Debug)]
pub struct World {
    pub grid:   GridGeometry,
    pub tick:   Tick,
    pub agents: AgentStore,
    pub orders: OrderRegistry,
}

impl World {
    pub fn new(grid: GridGeometry, agent_count: usize) -> Self {
        Self {
            grid,
            tick: Tick::ZERO,
            agents: AgentStore::new(agent_count),
            orders: OrderRegistry::new(),
        }
    }

    /// Agent standing on `cell`, if any.
    pub fn agent_at(&self, cell: GridCoord) -> Option<AgentId> {
        self.agents.agent_ids().find(|&a| self.agents.position(a) == cell)
    }

    /// Check every between-tick invariant.
    pub fn check_invariants(&self, max_orders: usize) -> Result<(), InvariantViolation> {
        // Unique, in-bounds occupancy.
        let mut occupied: HashMap<GridCoord, AgentId> = HashMap::with_capacity(self.agents.count);
        for agent in self.agents.agent_ids() {
            let cell = self.agents.position(agent);
            if !self.grid.contains(cell) {
                return Err(InvariantViolation::OutOfBounds { agent, cell });
            }
            if let Some(&first) = occupied.get(&cell) {
                return Err(InvariantViolation::SharedCell { cell, first, second: agent });
            }
            occupied.insert(cell, agent);
        }

        // Id sequence, distinct endpoints, no delivered leftovers, capacity.
        let active = self.orders.len();
        if active > max_orders {
            return Err(InvariantViolation::OrderCapacity { active, max: max_orders });
        }
        let mut previous: Option<OrderId> = None;
        for order in self.orders.iter() {
            let in_sequence = previous.is_none_or(|p| p < order.id);
            if !in_sequence || order.id >= self.orders.next_id() {
                return Err(InvariantViolation::OrderIdSequence { id: order.id });
            }
            previous = Some(order.id);
            if order.pickup == order.dropoff {
                return Err(InvariantViolation::DegenerateOrder(order.id));
            }
            if order.status == OrderStatus::Delivered {
                return Err(InvariantViolation::LingeringDelivery(order.id));
            }
        }

        // Carrying pointers and carrier back-references agree.
        for agent in self.agents.agent_ids() {
            if let Some(id) = self.agents.carried(agent) {
                let consistent = self
                    .orders
                    .get(id)
                    .is_some_and(|o| o.status == OrderStatus::Picked && o.carrier == Some(agent));
                if !consistent {
                    return Err(InvariantViolation::CargoMismatch { agent, order: id });
                }
            }
        }
        for order in self.orders.iter().filter(|o| o.status == OrderStatus::Picked) {
            let carrier_holds_it = order
                .carrier
                .filter(|&a| self.agents.contains(a))
                .is_some_and(|a| self.agents.carried(a) == Some(order.id));
            if !carrier_holds_it {
                let agent = order.carrier.unwrap_or(AgentId(u32::MAX));
                return Err(InvariantViolation::CargoMismatch { agent, order: order.id });
            }
        }

        Ok(())
    }
}
