//! `df-sim`: the tick engine of the delivery fleet simulator.
//!
//! # Tick algorithm
//!
//! ```text
//! step(actions):
//!   ① Tick     : advance the tick counter.
//!   ② Spawn    : maybe spawn one order (interval boundary, below capacity).
//!   ③ Interpret: action → requested cell, or pickup/dropoff intent.
//!   ④ Resolve  : cells requested more than once send every requester back;
//!                commit final positions.
//!   ⑤ Pickup   : agents with a pickup intent and empty hands, ascending id.
//!   ⑥ Dropoff  : agents with a dropoff intent and cargo, ascending id.
//!   ⑦ Reward   : step cost + collision penalty + pickup/delivery bonuses.
//!   ⑧ Prune    : delivered orders leave the active set.
//!   ⑨ Observe  : encode one observation per agent.
//!   ⑩ Return   : observations, rewards, terminated/truncated, diagnostics.
//! ```
//!
//! The engine is single-threaded and a tick always runs to completion.
//! Run one [`Sim`] per concurrent rollout.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash for the collision resolver's destination counts. |
//! | `serde`   | Serde derives on config, snapshot, and value types.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use df_behavior::GreedyPolicy;
//! use df_core::{FleetConfig, SimRng};
//! use df_sim::{NoopObserver, SimBuilder};
//!
//! let config = FleetConfig { seed: Some(42), max_episode_ticks: Some(200), ..FleetConfig::default() };
//! let mut sim = SimBuilder::new(config).build()?;
//! let mut policy_rng = SimRng::new(7);
//! let summary = sim.run_episode(&mut GreedyPolicy, &mut policy_rng, 200, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod collision;
pub mod error;
pub mod interpret;
pub mod observation;
pub mod observer;
pub mod reward;
pub mod sim;
pub mod step;
pub mod world;


pub use builder::SimBuilder;
pub use collision::{CollisionResolver, Resolution};
pub use error::{SimError, SimResult};
pub use interpret::{ActionInterpreter, Intent, Interpretation};
pub use observation::{
    NearestOrderEncoder, Observation, ObservationEncoder, ObservationMap, OccupancyGridEncoder,
};
pub use observer::{EpisodeSummary, FleetObserver, NoopObserver, Transition};
pub use reward::{AgentOutcome, RewardModel};
pub use sim::{EnginePhase, Sim};
pub use step::{AgentInfo, ResetResult, StepResult, TickEvents};
pub use world::{InvariantViolation, World};
