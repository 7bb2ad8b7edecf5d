//! `df-core`: foundational types for the delivery fleet simulator.
//!
//! This crate is a dependency of every other `df-*` crate.  It has no `df-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `OrderId`                                  |
//! | [`grid`]        | `GridCoord`, `GridGeometry` (bounds and clamping)     |
//! | [`action`]      | `Action` enum and its integer codes                   |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (engine-owned, seedable)                     |
//! | [`config`]      | `FleetConfig`, `RewardConfig`, `ObservationMode`      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod action;
pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::Action;
pub use config::{FleetConfig, ObservationMode, RewardConfig};
pub use error::{CoreError, CoreResult};
pub use grid::{GridCoord, GridGeometry};
pub use ids::{AgentId, OrderId};
pub use rng::SimRng;
pub use time::Tick;
