//! In-memory per-agent replay buffer.

use std::collections::{BTreeMap, VecDeque};

use df_core::{Action, AgentId, Tick};
use df_sim::{EpisodeSummary, FleetObserver, Transition};

use crate::{OutputResult, OutputWriter, TransitionRow};

/// One stored `(obs, action, reward, next_obs, done)` tuple.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayRecord {
    pub episode:          u64,
    pub tick:             Tick,
    pub agent:            AgentId,
    pub observation:      Vec<f32>,
    pub action:           Action,
    pub reward:           f32,
    pub next_observation: Vec<f32>,
    pub terminated:       bool,
    pub truncated:        bool,
}

impl ReplayRecord {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Summary of one agent's stored transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentStats {
    pub transitions:     usize,
    pub reward_mean:     f32,
    /// Population standard deviation.
    pub reward_std:      f32,
    pub reward_min:      f32,
    pub reward_max:      f32,
    /// Count per action, indexed by action code.
    pub action_counts:   [usize; 7],
    /// Summed reward of each stored episode, split at `done` records.  A
    /// trailing run without a `done` record counts as one more episode.
    pub episode_returns: Vec<f32>,
}

/// Bounded per-agent transition store.
///
/// Each agent gets its own ring of `capacity` records; once full, the oldest
/// record is evicted.  Agents appear the first time one of their transitions
/// is recorded.  `clear` empties every ring but keeps the episode counter.
#[derive(Clone, Debug)]
pub struct ReplayBuffer {
    capacity: usize,
    episode:  u64,
    data:     BTreeMap<AgentId, VecDeque<ReplayRecord>>,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, episode: 0, data: BTreeMap::new() }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records stored across all agents.
    pub fn len(&self) -> usize {
        self.data.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.data.keys().copied()
    }

    /// `agent`'s records, oldest first.
    pub fn iter(&self, agent: AgentId) -> impl Iterator<Item = &ReplayRecord> + '_ {
        self.data.get(&agent).into_iter().flatten()
    }

    pub fn push(&mut self, record: ReplayRecord) {
        if self.capacity == 0 {
            return;
        }
        let capacity = self.capacity;
        let ring = self
            .data
            .entry(record.agent)
            .or_insert_with(|| VecDeque::with_capacity(capacity.min(1024)));
        if ring.len() == capacity {
            ring.pop_front();
        }
        ring.push_back(record);
    }

    /// Reward, action, and return statistics for `agent`, or `None` when
    /// nothing is stored for it.
    pub fn agent_stats(&self, agent: AgentId) -> Option<AgentStats> {
        let ring = self.data.get(&agent).filter(|r| !r.is_empty())?;
        let n = ring.len() as f32;

        let mut action_counts = [0; 7];
        let mut episode_returns = Vec::new();
        let (mut sum, mut min, mut max) = (0.0f32, f32::INFINITY, f32::NEG_INFINITY);
        let mut running = 0.0f32;
        let mut open = false;
        for r in ring {
            sum += r.reward;
            min = min.min(r.reward);
            max = max.max(r.reward);
            action_counts[r.action.code() as usize] += 1;
            running += r.reward;
            open = true;
            if r.done() {
                episode_returns.push(running);
                running = 0.0;
                open = false;
            }
        }
        if open {
            episode_returns.push(running);
        }

        let mean = sum / n;
        let variance = ring.iter().map(|r| (r.reward - mean).powi(2)).sum::<f32>() / n;
        Some(AgentStats {
            transitions: ring.len(),
            reward_mean: mean,
            reward_std: variance.sqrt(),
            reward_min: min,
            reward_max: max,
            action_counts,
            episode_returns,
        })
    }

    pub fn clear(&mut self) {
        self.data.values_mut().for_each(VecDeque::clear);
    }

    /// Write every stored record through `writer`, agent by agent, and return
    /// how many rows were written.  Does not call `finish`.
    pub fn write_to<W: OutputWriter + ?Sized>(&self, writer: &mut W) -> OutputResult<usize> {
        let mut written = 0;
        for ring in self.data.values() {
            let rows: Vec<TransitionRow> = ring.iter().map(TransitionRow::from_record).collect();
            writer.write_transitions(&rows)?;
            written += rows.len();
        }
        Ok(written)
    }
}

impl FleetObserver for ReplayBuffer {
    fn on_transition(&mut self, t: &Transition<'_>) {
        self.push(ReplayRecord {
            episode:          self.episode,
            tick:             t.tick,
            agent:            t.agent,
            observation:      t.observation.values.clone(),
            action:           t.action,
            reward:           t.reward,
            next_observation: t.next_observation.values.clone(),
            terminated:       t.terminated,
            truncated:        t.truncated,
        });
    }

    fn on_episode_end(&mut self, _summary: &EpisodeSummary) {
        self.episode += 1;
    }
}
