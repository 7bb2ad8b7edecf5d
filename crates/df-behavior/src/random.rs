//! Uniformly random decision-maker.

use df_core::{Action, AgentId, SimRng};

use crate::{DecisionMaker, WorldSnapshot};

/// Samples uniformly from the actions the world has enabled: all seven when
/// pickup/dropoff is on, the five moves otherwise.
pub struct RandomPolicy;

impl DecisionMaker for RandomPolicy {
    fn decide(&mut self, _agent: AgentId, world: &WorldSnapshot, rng: &mut SimRng) -> Action {
        let choices: &[Action] = if world.pickup_dropoff { &Action::ALL } else { &Action::MOVES };
        rng.choose(choices).copied().unwrap_or_default()
    }
}
