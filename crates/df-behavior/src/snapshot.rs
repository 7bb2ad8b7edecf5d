//! Read-only world state for decision-makers and renderers.

use std::fmt;

use df_agent::AgentStore;
use df_core::{AgentId, GridCoord, OrderId, Tick};
use df_orders::{Order, OrderRegistry};

/// One agent as seen from outside the engine.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:       AgentId,
    pub position: GridCoord,
    pub carrying: Option<OrderId>,
}

/// An owned copy of the world at the end of a tick (or right after reset).
///
/// This is the single stable shape external code reads: agent positions and
/// cargo, and every active order with its status.  Taking one never affects
/// the simulation.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub tick:           Tick,
    pub grid_size:      u32,
    /// Whether `Pickup`/`Dropoff` do anything in this world.
    pub pickup_dropoff: bool,
    /// Ascending `AgentId`.
    pub agents:         Vec<AgentView>,
    /// Active orders, ascending `OrderId`.
    pub orders:         Vec<Order>,
}

impl WorldSnapshot {
    /// Copy the current state out of the engine's stores.
    pub fn capture(
        tick:           Tick,
        grid_size:      u32,
        pickup_dropoff: bool,
        agents:         &AgentStore,
        orders:         &OrderRegistry,
    ) -> Self {
        let agents = agents
            .agent_ids()
            .map(|id| AgentView {
                id,
                position: agents.position(id),
                carrying: agents.carried(id),
            })
            .collect();
        Self {
            tick,
            grid_size,
            pickup_dropoff,
            agents,
            orders: orders.as_slice().to_vec(),
        }
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentView> {
        self.agents.get(id.index()).filter(|a| a.id == id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Orders still waiting for pickup.
    pub fn waiting_orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter().filter(|o| o.is_waiting())
    }

    /// The order `agent` is carrying, if any.
    pub fn carried_order(&self, agent: AgentId) -> Option<&Order> {
        self.agent(agent)?.carrying.and_then(|id| self.order(id))
    }
}

/// Text projection: `.` empty, agent index digit, `P` waiting pickup,
/// `D` in-transit dropoff.  Agents are drawn over orders.
impl fmt::Display for WorldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.grid_size as usize;
        let mut cells = vec!['.'; n * n];
        for o in &self.orders {
            if o.is_in_transit() {
                cells[o.dropoff.y as usize * n + o.dropoff.x as usize] = 'D';
            }
        }
        for o in self.waiting_orders() {
            cells[o.pickup.y as usize * n + o.pickup.x as usize] = 'P';
        }
        for a in &self.agents {
            let digit = char::from_digit(a.id.0 % 10, 10).unwrap_or('A');
            cells[a.position.y as usize * n + a.position.x as usize] = digit;
        }
        for row in cells.chunks(n) {
            let line: Vec<String> = row.iter().map(char::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
