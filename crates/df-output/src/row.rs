//! Plain data row types written by output backends.

use df_sim::{EpisodeSummary, Transition};

use crate::ReplayRecord;

/// One agent's transition for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRow {
    pub episode:          u64,
    pub tick:             u64,
    pub agent_id:         u32,
    /// Observation values joined by single spaces.
    pub observation:      String,
    /// Integer action code.
    pub action:           i64,
    pub reward:           f32,
    pub next_observation: String,
    pub terminated:       bool,
    pub truncated:        bool,
}

impl TransitionRow {
    pub fn from_transition(episode: u64, t: &Transition<'_>) -> Self {
        Self {
            episode,
            tick:             t.tick.0,
            agent_id:         t.agent.0,
            observation:      join_values(t.observation.as_slice()),
            action:           t.action.code(),
            reward:           t.reward,
            next_observation: join_values(t.next_observation.as_slice()),
            terminated:       t.terminated,
            truncated:        t.truncated,
        }
    }

    pub fn from_record(r: &ReplayRecord) -> Self {
        Self {
            episode:          r.episode,
            tick:             r.tick.0,
            agent_id:         r.agent.0,
            observation:      join_values(&r.observation),
            action:           r.action.code(),
            reward:           r.reward,
            next_observation: join_values(&r.next_observation),
            terminated:       r.terminated,
            truncated:        r.truncated,
        }
    }
}

/// Totals for one episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummaryRow {
    pub episode:       u64,
    pub ticks:         u64,
    pub total_reward:  f32,
    pub spawned:       u64,
    pub delivered:     u64,
    pub delivery_rate: f64,
}

impl EpisodeSummaryRow {
    pub fn from_summary(episode: u64, s: &EpisodeSummary) -> Self {
        Self {
            episode,
            ticks:         s.ticks,
            total_reward:  s.total_reward,
            spawned:       s.spawned,
            delivered:     s.delivered,
            delivery_rate: s.delivery_rate(),
        }
    }
}

fn join_values(values: &[f32]) -> String {
    values.iter().map(f32::to_string).collect::<Vec<_>>().join(" ")
}
