//! Simulation configuration.
//!
//! One explicit [`FleetConfig`] value is passed to the engine at
//! construction; there is no process-wide state.  With the `serde` feature
//! every field is optional in the serialized form and falls back to
//! [`FleetConfig::default`].

use crate::{CoreError, CoreResult};

// ── RewardConfig ──────────────────────────────────────────────────────────────

/// Per-tick reward constants.  All four components are summed per agent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    /// Applied to every agent every tick.  Negative.
    pub step_cost: f32,
    /// Applied to agents the collision resolver sent back.  Negative.
    pub collision_penalty: f32,
    /// Applied when a pickup succeeds.
    pub pickup_bonus: f32,
    /// Applied when a delivery succeeds.
    pub delivery_bonus: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            step_cost:         -0.01,
            collision_penalty: -1.0,
            pickup_bonus:      5.0,
            delivery_bonus:    20.0,
        }
    }
}

impl RewardConfig {
    /// Require `delivery > pickup > |collision| > |step|`.
    pub fn validate(&self) -> CoreResult<()> {
        let ordered = self.delivery_bonus > self.pickup_bonus
            && self.pickup_bonus > self.collision_penalty.abs()
            && self.collision_penalty.abs() > self.step_cost.abs();
        if !ordered {
            return Err(CoreError::Config(format!(
                "reward constants must satisfy delivery > pickup > |collision| > |step| \
                 (got delivery={}, pickup={}, collision={}, step={})",
                self.delivery_bonus, self.pickup_bonus, self.collision_penalty, self.step_cost,
            )));
        }
        Ok(())
    }
}

// ── ObservationMode ───────────────────────────────────────────────────────────

/// Which observation encoding the engine is built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObservationMode {
    /// Own position plus pickup/dropoff of the nearest active order.
    #[default]
    NearestOrder,
    /// Three occupancy channels: agents, waiting pickups, in-transit dropoffs.
    OccupancyGrid,
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Side length of the square grid.
    pub grid_size: u32,

    /// Number of agents.  Fixed for the lifetime of the engine.
    pub agent_count: u32,

    /// Upper bound on simultaneously active orders.  0 disables spawning.
    pub max_orders: usize,

    /// An order may spawn on every tick that is a multiple of this.
    pub order_spawn_interval: u64,

    pub rewards: RewardConfig,

    pub observation: ObservationMode,

    /// Enables the `Pickup`/`Dropoff` actions.  When off they behave as `Stay`.
    pub pickup_dropoff: bool,

    /// Truncate the episode once the tick counter reaches this value.
    pub max_episode_ticks: Option<u64>,

    /// Master RNG seed.  `None` draws one from entropy at construction.
    pub seed: Option<u64>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            grid_size:            8,
            agent_count:          3,
            max_orders:           6,
            order_spawn_interval: 3,
            rewards:              RewardConfig::default(),
            observation:          ObservationMode::default(),
            pickup_dropoff:       true,
            max_episode_ticks:    None,
            seed:                 None,
        }
    }
}

impl FleetConfig {
    /// Check every construction-time constraint.
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid_size == 0 {
            return Err(CoreError::Config("grid_size must be positive".into()));
        }
        if self.agent_count == 0 {
            return Err(CoreError::Config("agent_count must be positive".into()));
        }
        let cells = self.cell_count();
        if self.agent_count as u64 > cells {
            return Err(CoreError::Config(format!(
                "agent_count {} exceeds grid capacity {} ({}x{})",
                self.agent_count, cells, self.grid_size, self.grid_size,
            )));
        }
        if self.order_spawn_interval == 0 {
            return Err(CoreError::Config("order_spawn_interval must be positive".into()));
        }
        if self.max_orders > 0 && cells < 2 {
            return Err(CoreError::Config(
                "orders need distinct pickup and dropoff cells; grid is 1x1".into(),
            ));
        }
        self.rewards.validate()
    }

    /// Total number of grid cells, widened so `grid_size²` cannot overflow.
    #[inline]
    pub fn cell_count(&self) -> u64 {
        self.grid_size as u64 * self.grid_size as u64
    }
}
