//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;

use df_core::{CoreError, FleetConfig, GridCoord, GridGeometry, SimRng};
use tracing::info;

use crate::observation::encoder_for;
use crate::sim::EnginePhase;
use crate::{
    ActionInterpreter, CollisionResolver, ObservationEncoder, RewardModel, Sim, SimError,
    SimResult, World,
};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.seed(s)`               | `config.seed`, else drawn from entropy    |
/// | `.encoder(e)`            | chosen by `config.observation`            |
/// | `.initial_positions(v)`  | random distinct cells on every reset      |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(FleetConfig { grid_size: 5, agent_count: 2, ..FleetConfig::default() })
///     .seed(42)
///     .initial_positions(vec![GridCoord::new(0, 0), GridCoord::new(1, 0)])
///     .build()?;
/// let start = sim.reset();
/// ```
pub struct SimBuilder {
    config:    FleetConfig,
    seed:      Option<u64>,
    encoder:   Option<Box<dyn ObservationEncoder>>,
    positions: Option<Vec<GridCoord>>,
}

impl SimBuilder {
    pub fn new(config: FleetConfig) -> Self {
        Self { config, seed: None, encoder: None, positions: None }
    }

    /// Seed the engine RNG, overriding `config.seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a custom observation encoder instead of the one named by
    /// `config.observation`.
    pub fn encoder(mut self, encoder: Box<dyn ObservationEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Fixed start cells, one per agent, used by every `reset` instead of
    /// random placement.  Must be distinct and inside the grid.
    pub fn initial_positions(mut self, positions: Vec<GridCoord>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate the configuration and return an engine awaiting `reset`.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let agent_count = self.config.agent_count as usize;
        let grid = GridGeometry::new(self.config.grid_size);

        if let Some(positions) = &self.positions {
            if positions.len() != agent_count {
                return Err(SimError::AgentCountMismatch {
                    expected: agent_count,
                    got:      positions.len(),
                    what:     "initial positions",
                });
            }
            if let Some(bad) = positions.iter().find(|&&p| !grid.contains(p)) {
                return Err(CoreError::Config(format!("initial position {bad} is outside the grid")).into());
            }
            let distinct: HashSet<_> = positions.iter().collect();
            if distinct.len() != positions.len() {
                return Err(CoreError::Config("initial positions must be distinct".into()).into());
            }
        }

        let seed = self
            .seed
            .or(self.config.seed)
            .unwrap_or_else(SimRng::entropy_seed);
        info!(
            seed,
            grid_size = self.config.grid_size,
            agents = agent_count,
            max_orders = self.config.max_orders,
            observation = ?self.config.observation,
            "sim_built"
        );

        Ok(Sim {
            interpreter:       ActionInterpreter::new(grid, self.config.pickup_dropoff),
            resolver:          CollisionResolver::new(),
            rewards:           RewardModel::new(self.config.rewards),
            encoder:           self.encoder.unwrap_or_else(|| encoder_for(self.config.observation)),
            world:             World::new(grid, agent_count),
            rng:               SimRng::new(seed),
            seed,
            initial_positions: self.positions,
            phase:             EnginePhase::AwaitingReset,
            delivered_total:   0,
            config:            self.config,
        })
    }
}
