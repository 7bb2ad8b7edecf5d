//! `df-output`: transition logging for the delivery fleet simulator.
//!
//! | Type             | Role                                                      |
//! |------------------|-----------------------------------------------------------|
//! | [`ReplayBuffer`] | In-memory, bounded per-agent `(obs, action, reward, next_obs, done)` store |
//! | [`CsvWriter`]    | `transitions.csv`, `episode_summaries.csv`                |
//! | [`ReplayObserver`] | Streams transitions and episode totals to any [`OutputWriter`] |
//!
//! Both [`ReplayBuffer`] and [`ReplayObserver`] implement
//! `df_sim::FleetObserver`, so either can be handed to `Sim::run_episode`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use df_output::{CsvWriter, ReplayObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReplayObserver::new(writer);
//! sim.run_episode(&mut policy, &mut policy_rng, 100, &mut obs)?;
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod buffer;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use buffer::{AgentStats, ReplayBuffer, ReplayRecord};
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReplayObserver;
pub use row::{EpisodeSummaryRow, TransitionRow};
pub use writer::OutputWriter;
