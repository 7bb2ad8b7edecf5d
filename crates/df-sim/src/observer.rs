//! Observer hooks for transition logging and progress reporting.

use df_core::{Action, AgentId, Tick};

use crate::{Observation, ObservationMap, TickEvents};

/// One agent's `(obs, action, reward, next_obs, done)` record for a tick.
#[derive(Clone, Copy, Debug)]
pub struct Transition<'a> {
    pub tick:             Tick,
    pub agent:            AgentId,
    pub observation:      &'a Observation,
    pub action:           Action,
    pub reward:           f32,
    pub next_observation: &'a Observation,
    pub terminated:       bool,
    pub truncated:        bool,
}

/// Totals for one episode driven by [`Sim::run_episode`][crate::Sim::run_episode].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EpisodeSummary {
    pub ticks:        u64,
    pub total_reward: f32,
    pub spawned:      u64,
    pub delivered:    u64,
}

impl EpisodeSummary {
    /// Delivered / spawned, or 0 when nothing spawned.
    pub fn delivery_rate(&self) -> f64 {
        if self.spawned == 0 {
            0.0
        } else {
            self.delivered as f64 / self.spawned as f64
        }
    }
}

/// Callbacks invoked by [`Sim::run_episode`][crate::Sim::run_episode].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers see the episode but can
/// never change it.
pub trait FleetObserver {
    /// Called after `reset` with the initial observations.
    fn on_reset(&mut self, _observations: &ObservationMap) {}

    /// Called once per agent per tick, ascending `AgentId`.
    fn on_transition(&mut self, _transition: &Transition<'_>) {}

    /// Called after every agent's transition for the tick was reported.
    fn on_tick_end(&mut self, _events: &TickEvents) {}

    /// Called once when the episode stops.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) {}
}

/// A [`FleetObserver`] that does nothing.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}
