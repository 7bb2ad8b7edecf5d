//! The `DecisionMaker` trait: the extension point for policies.

use std::collections::BTreeMap;

use df_core::{Action, AgentId, SimRng};

use crate::WorldSnapshot;

/// One action per agent for a single tick, in ascending `AgentId` order.
pub type ActionMap = BTreeMap<AgentId, Action>;

/// Anything that turns a [`WorldSnapshot`] into actions: a learned policy
/// behind an FFI boundary, or a scripted heuristic.
///
/// Decision-makers may keep their own state between ticks (`&mut self`) but
/// only ever read the world through the snapshot.  Randomness comes from a
/// caller-supplied [`SimRng`] that is separate from the engine's stream.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysRight;
///
/// impl DecisionMaker for AlwaysRight {
///     fn decide(&mut self, _agent: AgentId, _world: &WorldSnapshot, _rng: &mut SimRng) -> Action {
///         Action::Right
///     }
/// }
/// ```
pub trait DecisionMaker {
    /// Choose `agent`'s action for the coming tick.
    fn decide(&mut self, agent: AgentId, world: &WorldSnapshot, rng: &mut SimRng) -> Action;

    /// Choose actions for every agent in the snapshot.
    fn decide_all(&mut self, world: &WorldSnapshot, rng: &mut SimRng) -> ActionMap {
        world
            .agents
            .iter()
            .map(|a| (a.id, self.decide(a.id, world, rng)))
            .collect()
    }
}
