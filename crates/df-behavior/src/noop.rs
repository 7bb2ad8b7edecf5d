//! A decision-maker that never moves.

use df_core::{Action, AgentId, SimRng};

use crate::{DecisionMaker, WorldSnapshot};

/// Every agent issues [`Action::Stay`] every tick.
pub struct StayPolicy;

impl DecisionMaker for StayPolicy {
    fn decide(&mut self, _agent: AgentId, _world: &WorldSnapshot, _rng: &mut SimRng) -> Action {
        Action::Stay
    }
}
