//! `df-behavior`: the boundary between the engine and its decision-makers.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`snapshot`] | `WorldSnapshot`: the one read-only state query decision-makers use |
//! | [`model`]    | `DecisionMaker` trait, `ActionMap`                              |
//! | [`noop`]     | `StayPolicy`: every agent stays put                            |
//! | [`random`]   | `RandomPolicy`: uniform over the enabled actions               |
//! | [`greedy`]   | `GreedyPolicy`, `CoordinatedGreedy`                             |
//!
//! # Design notes
//!
//! Decision-makers never touch engine-owned state.  Each tick the caller
//! takes a [`WorldSnapshot`] from the engine, asks a [`DecisionMaker`] for an
//! [`ActionMap`], and hands that map back to the engine's `step`.

pub mod greedy;
pub mod model;
pub mod noop;
pub mod random;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use greedy::{CoordinatedGreedy, GreedyPolicy};
pub use model::{ActionMap, DecisionMaker};
pub use noop::StayPolicy;
pub use random::RandomPolicy;
pub use snapshot::{AgentView, WorldSnapshot};
