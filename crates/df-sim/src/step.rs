//! Values returned by `reset` and `step`.

use std::collections::BTreeMap;

use df_core::{AgentId, GridCoord, OrderId, Tick};

use crate::ObservationMap;

/// Per-agent diagnostics for one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AgentInfo {
    /// Final cell after collision resolution.
    pub position:  GridCoord,
    pub carrying:  Option<OrderId>,
    /// Sent back by the collision resolver this tick.
    pub collided:  bool,
    pub picked_up: Option<OrderId>,
    pub delivered: Option<OrderId>,
}

/// World-level diagnostics for one tick.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TickEvents {
    pub tick:          Tick,
    pub spawned:       Option<OrderId>,
    /// Agents sent back by the collision resolver.
    pub reverted:      usize,
    pub pickups:       Vec<(AgentId, OrderId)>,
    pub deliveries:    Vec<(AgentId, OrderId)>,
    /// Active orders after pruning.
    pub active_orders: usize,
}

/// Output of [`Sim::reset`][crate::Sim::reset].
#[derive(Clone, Debug)]
pub struct ResetResult {
    pub observations: ObservationMap,
    pub infos:        BTreeMap<AgentId, AgentInfo>,
}

/// Output of [`Sim::step`][crate::Sim::step].  Every map has one entry per
/// agent.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub observations: ObservationMap,
    pub rewards:      BTreeMap<AgentId, f32>,
    pub terminated:   BTreeMap<AgentId, bool>,
    pub truncated:    BTreeMap<AgentId, bool>,
    pub infos:        BTreeMap<AgentId, AgentInfo>,
    pub events:       TickEvents,
}

impl StepResult {
    /// `true` once any agent is terminated or truncated (all agents share
    /// one episode clock, so in practice all or none).
    pub fn is_done(&self) -> bool {
        self.terminated.values().chain(self.truncated.values()).any(|&d| d)
    }

    pub fn total_reward(&self) -> f32 {
        self.rewards.values().sum()
    }
}
