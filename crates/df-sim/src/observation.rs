//! Observation encoders.
//!
//! The encoding is picked once when the engine is built; both strategies sit
//! behind [`ObservationEncoder`] so the tick loop never branches on it.

use std::collections::BTreeMap;

use df_core::{AgentId, ObservationMode};
use df_orders::Order;

use crate::World;

/// Value used for order-derived fields when no order is active.  Never a
/// valid coordinate.
pub const NO_ORDER: f32 = -1.0;

/// A flat numeric observation.  Its shape is given by the encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub values: Vec<f32>,
}

impl Observation {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

pub type ObservationMap = BTreeMap<AgentId, Observation>;

/// Projects world state into per-agent observations.
pub trait ObservationEncoder: Send {
    /// Logical shape of every observation this encoder produces.
    fn shape(&self, grid_size: u32) -> Vec<usize>;

    /// Observation for one agent.
    fn encode(&self, agent: AgentId, world: &World) -> Observation;

    /// Observations for every agent, ascending id.
    fn encode_all(&self, world: &World) -> ObservationMap {
        world
            .agents
            .agent_ids()
            .map(|a| (a, self.encode(a, world)))
            .collect()
    }
}

/// Build the encoder selected by `mode`.
pub fn encoder_for(mode: ObservationMode) -> Box<dyn ObservationEncoder> {
    match mode {
        ObservationMode::NearestOrder  => Box::new(NearestOrderEncoder),
        ObservationMode::OccupancyGrid => Box::new(OccupancyGridEncoder),
    }
}

// ── NearestOrderEncoder ───────────────────────────────────────────────────────

/// `[x, y, pickup_x, pickup_y, dropoff_x, dropoff_y]`.
///
/// A carrying agent sees its own order.  Otherwise the order fields describe
/// the waiting order nearest to the agent (Manhattan distance to its pickup,
/// ties to the lower id); [`NO_ORDER`] when nothing is waiting.  Orders
/// carried by other agents are never visible.
pub struct NearestOrderEncoder;

impl NearestOrderEncoder {
    fn target(agent: AgentId, world: &World) -> Option<&Order> {
        if let Some(carried) = world.agents.carried(agent) {
            return world.orders.get(carried);
        }
        let pos = world.agents.position(agent);
        world
            .orders
            .iter()
            .filter(|o| o.is_waiting())
            .min_by_key(|o| o.pickup.manhattan(pos))
    }
}

impl ObservationEncoder for NearestOrderEncoder {
    fn shape(&self, _grid_size: u32) -> Vec<usize> {
        vec![6]
    }

    fn encode(&self, agent: AgentId, world: &World) -> Observation {
        let pos = world.agents.position(agent);
        let mut values = vec![pos.x as f32, pos.y as f32, NO_ORDER, NO_ORDER, NO_ORDER, NO_ORDER];
        if let Some(order) = Self::target(agent, world) {
            values[2] = order.pickup.x as f32;
            values[3] = order.pickup.y as f32;
            values[4] = order.dropoff.x as f32;
            values[5] = order.dropoff.y as f32;
        }
        Observation { values }
    }
}

// ── OccupancyGridEncoder ──────────────────────────────────────────────────────

/// Three `N × N` row-major channels of 0/1: agents, waiting pickups, and
/// dropoffs of orders in transit.  Every agent receives the same grid.
pub struct OccupancyGridEncoder;

pub const CHANNEL_AGENTS: usize = 0;
pub const CHANNEL_PICKUPS: usize = 1;
pub const CHANNEL_DROPOFFS: usize = 2;

impl OccupancyGridEncoder {
    fn grid(world: &World) -> Observation {
        let plane = world.grid.cell_count();
        let mut values = vec![0.0; 3 * plane];
        for agent in world.agents.agent_ids() {
            let cell = world.grid.cell_index(world.agents.position(agent));
            values[CHANNEL_AGENTS * plane + cell] = 1.0;
        }
        for order in world.orders.iter() {
            if order.is_waiting() {
                values[CHANNEL_PICKUPS * plane + world.grid.cell_index(order.pickup)] = 1.0;
            } else if order.is_in_transit() {
                values[CHANNEL_DROPOFFS * plane + world.grid.cell_index(order.dropoff)] = 1.0;
            }
        }
        Observation { values }
    }
}

impl ObservationEncoder for OccupancyGridEncoder {
    fn shape(&self, grid_size: u32) -> Vec<usize> {
        vec![3, grid_size as usize, grid_size as usize]
    }

    fn encode(&self, _agent: AgentId, world: &World) -> Observation {
        Self::grid(world)
    }

    fn encode_all(&self, world: &World) -> ObservationMap {
        let grid = Self::grid(world);
        world.agents.agent_ids().map(|a| (a, grid.clone())).collect()
    }
}
