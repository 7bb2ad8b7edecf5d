//! Per-agent reward for one tick.

use df_core::{OrderId, RewardConfig};

/// Everything that happened to one agent during a tick that rewards care
/// about.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct AgentOutcome {
    /// Sent back by the collision resolver.
    pub collided:  bool,
    pub picked_up: Option<OrderId>,
    pub delivered: Option<OrderId>,
}

/// Sums the four additive reward components from [`RewardConfig`].
#[derive(Copy, Clone, Debug)]
pub struct RewardModel {
    config: RewardConfig,
}

impl RewardModel {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    pub fn score(&self, outcome: &AgentOutcome) -> f32 {
        let mut reward = self.config.step_cost;
        if outcome.collided {
            reward += self.config.collision_penalty;
        }
        if outcome.picked_up.is_some() {
            reward += self.config.pickup_bonus;
        }
        if outcome.delivered.is_some() {
            reward += self.config.delivery_bonus;
        }
        reward
    }
}
