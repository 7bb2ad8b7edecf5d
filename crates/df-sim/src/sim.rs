//! The `Sim` engine and its tick loop.

use std::collections::BTreeMap;

use df_behavior::{ActionMap, DecisionMaker, WorldSnapshot};
use df_core::{AgentId, FleetConfig, GridCoord, OrderId, SimRng, Tick};
use tracing::{debug, info, trace};

use crate::{
    ActionInterpreter, AgentInfo, AgentOutcome, CollisionResolver, EpisodeSummary, FleetObserver,
    Intent, Interpretation, ObservationEncoder, ResetResult, RewardModel, SimError, SimResult,
    StepResult, TickEvents, Transition, World,
};

/// Where the engine is between calls.  Mid-tick state is never observable.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EnginePhase {
    /// Built but never reset; `step` is a contract error.
    AwaitingReset,
    /// Between ticks.
    Ready,
    /// Truncated by `max_episode_ticks`; only `reset` continues.
    EpisodeOver,
}

/// The simulation engine.  Owns the world exclusively; callers interact only
/// through [`reset`](Self::reset), [`step`](Self::step), and read-only
/// queries.
///
/// Not thread-safe: run one `Sim` per concurrent rollout.  Create
/// via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub(crate) config:            FleetConfig,
    pub(crate) seed:              u64,
    pub(crate) rng:               SimRng,
    pub(crate) world:             World,
    pub(crate) phase:             EnginePhase,
    pub(crate) interpreter:       ActionInterpreter,
    pub(crate) resolver:          CollisionResolver,
    pub(crate) rewards:           RewardModel,
    pub(crate) encoder:           Box<dyn ObservationEncoder>,
    pub(crate) initial_positions: Option<Vec<GridCoord>>,
    pub(crate) delivered_total:   u64,
}

impl Sim {
    // ── Read-only queries ─────────────────────────────────────────────────

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// The seed the engine RNG was last seeded with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn tick(&self) -> Tick {
        self.world.tick
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Orders spawned since the last reset.
    pub fn spawned_total(&self) -> u64 {
        self.world.orders.next_id().0
    }

    /// Orders delivered since the last reset.
    pub fn delivered_total(&self) -> u64 {
        self.delivered_total
    }

    pub fn observation_shape(&self) -> Vec<usize> {
        self.encoder.shape(self.config.grid_size)
    }

    /// Copy of the current world for decision-makers and renderers.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(
            self.world.tick,
            self.config.grid_size,
            self.config.pickup_dropoff,
            &self.world.agents,
            &self.world.orders,
        )
    }

    // ── Episode control ───────────────────────────────────────────────────

    /// Start a new episode: tick 0, no orders, ids from 0, empty hands, and
    /// agents on distinct cells (random unless fixed at build time).
    pub fn reset(&mut self) -> ResetResult {
        let world = &mut self.world;
        world.tick = Tick::ZERO;
        world.orders.clear();
        match &self.initial_positions {
            Some(positions) => {
                world.agents.positions.clone_from(positions);
                world.agents.carrying.fill(None);
            }
            None => world.agents.scatter(world.grid, &mut self.rng),
        }
        self.delivered_total = 0;
        self.phase = EnginePhase::Ready;
        info!(seed = self.seed, agents = self.world.agents.count, "reset");

        let outcomes = vec![AgentOutcome::default(); self.world.agents.count];
        ResetResult {
            observations: self.encoder.encode_all(&self.world),
            infos:        self.agent_infos(&outcomes),
        }
    }

    /// Reseed the engine RNG, then [`reset`](Self::reset).
    pub fn reset_with_seed(&mut self, seed: u64) -> ResetResult {
        self.seed = seed;
        self.rng = SimRng::new(seed);
        self.reset()
    }

    /// Add a waiting order at fixed cells (scripted scenarios).
    ///
    /// Returns `None` without changing anything if either cell is off the
    /// grid, the cells coincide, or the active set is at capacity.
    pub fn place_order(&mut self, pickup: GridCoord, dropoff: GridCoord) -> Option<OrderId> {
        let grid = self.world.grid;
        if !grid.contains(pickup)
            || !grid.contains(dropoff)
            || self.world.orders.len() >= self.config.max_orders
        {
            return None;
        }
        self.world.orders.spawn_at(pickup, dropoff).map(|o| o.id)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Advance one tick.  `actions` needs exactly one entry per agent.
    pub fn step(&mut self, actions: &ActionMap) -> SimResult<StepResult> {
        match self.phase {
            EnginePhase::AwaitingReset => return Err(SimError::NotReset),
            EnginePhase::EpisodeOver => {
                return Err(SimError::EpisodeFinished { tick: self.world.tick });
            }
            EnginePhase::Ready => {}
        }
        self.check_actions(actions)?;

        let world = &mut self.world;
        let count = world.agents.count;

        // ── ①: advance the clock ──────────────────────────────────────────
        world.tick = world.tick.next();
        let now = world.tick;

        // ── ②: maybe spawn ────────────────────────────────────────────────
        let spawned = world.orders.maybe_spawn(
            now,
            self.config.order_spawn_interval,
            self.config.max_orders,
            world.grid,
            &mut self.rng,
        );
        if let Some(order) = &spawned {
            debug!(
                tick = now.0,
                order = %order.id,
                pickup = %order.pickup,
                dropoff = %order.dropoff,
                "order_spawned"
            );
        }

        // ── ③: interpret actions ──────────────────────────────────────────
        let requests: Vec<Interpretation> = (0..count)
            .map(|i| {
                let agent = AgentId(i as u32);
                self.interpreter.interpret(actions[&agent], world.agents.positions[i])
            })
            .collect();

        // ── ④: resolve collisions and commit moves ────────────────────────
        let requested: Vec<GridCoord> = requests.iter().map(|r| r.destination).collect();
        let resolution = self.resolver.resolve(&world.agents.positions, &requested);
        let reverted = resolution.reverted_count();
        for (i, _) in resolution.reverted.iter().enumerate().filter(|(_, r)| **r) {
            trace!(tick = now.0, agent = i, requested = %requested[i], "move_reverted");
        }
        world.agents.positions = resolution.positions;

        let mut outcomes: Vec<AgentOutcome> = resolution
            .reverted
            .iter()
            .map(|&collided| AgentOutcome { collided, ..AgentOutcome::default() })
            .collect();
        let mut events = TickEvents {
            tick: now,
            spawned: spawned.map(|o| o.id),
            reverted,
            ..TickEvents::default()
        };

        // ── ⑤: pickups, ascending id ──────────────────────────────────────
        for i in 0..count {
            if requests[i].intent != Some(Intent::Pickup) || world.agents.carrying[i].is_some() {
                continue;
            }
            let agent = AgentId(i as u32);
            if let Some(order) = world.orders.try_pickup(agent, world.agents.positions[i]) {
                world.agents.carrying[i] = Some(order);
                outcomes[i].picked_up = Some(order);
                events.pickups.push((agent, order));
                debug!(tick = now.0, %agent, %order, "order_picked_up");
            }
        }

        // ── ⑥: dropoffs, ascending id ─────────────────────────────────────
        for i in 0..count {
            if requests[i].intent != Some(Intent::Dropoff) {
                continue;
            }
            let Some(order) = world.agents.carrying[i] else {
                continue;
            };
            let agent = AgentId(i as u32);
            if world.orders.try_dropoff(agent, order, world.agents.positions[i]) {
                world.agents.carrying[i] = None;
                outcomes[i].delivered = Some(order);
                events.deliveries.push((agent, order));
                debug!(tick = now.0, %agent, %order, "order_delivered");
            }
        }

        // ── ⑦: rewards ────────────────────────────────────────────────────
        let rewards: BTreeMap<AgentId, f32> = outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| (AgentId(i as u32), self.rewards.score(outcome)))
            .collect();

        // ── ⑧: prune delivered orders ─────────────────────────────────────
        world.orders.prune_delivered();
        events.active_orders = world.orders.len();
        self.delivered_total += events.deliveries.len() as u64;

        if cfg!(debug_assertions) {
            if let Err(violation) = world.check_invariants(self.config.max_orders) {
                panic!("world invariant broken at {now}: {violation}");
            }
        }

        // ── ⑨: observations ───────────────────────────────────────────────
        let observations = self.encoder.encode_all(world);

        // ── ⑩: episode flags ──────────────────────────────────────────────
        let truncated = self.config.max_episode_ticks.is_some_and(|max| now.0 >= max);
        if truncated {
            self.phase = EnginePhase::EpisodeOver;
            info!(tick = now.0, delivered = self.delivered_total, "episode_truncated");
        }
        let flags = |value: bool| -> BTreeMap<AgentId, bool> {
            (0..count as u32).map(|i| (AgentId(i), value)).collect()
        };

        Ok(StepResult {
            observations,
            rewards,
            terminated: flags(false),
            truncated: flags(truncated),
            infos: self.agent_infos(&outcomes),
            events,
        })
    }

    /// Reset, then let `policy` drive the fleet until truncation or
    /// `max_ticks` steps, reporting every transition to `observer`.
    ///
    /// `policy_rng` feeds the decision-maker only; the world's own stream is
    /// untouched by policy randomness.
    pub fn run_episode<P, O>(
        &mut self,
        policy:     &mut P,
        policy_rng: &mut SimRng,
        max_ticks:  u64,
        observer:   &mut O,
    ) -> SimResult<EpisodeSummary>
    where
        P: DecisionMaker + ?Sized,
        O: FleetObserver + ?Sized,
    {
        let mut observations = self.reset().observations;
        observer.on_reset(&observations);

        let mut total_reward = 0.0;
        for _ in 0..max_ticks {
            let actions = policy.decide_all(&self.snapshot(), policy_rng);
            let result = self.step(&actions)?;

            for (&agent, &action) in &actions {
                observer.on_transition(&Transition {
                    tick:             result.events.tick,
                    agent,
                    observation:      &observations[&agent],
                    action,
                    reward:           result.rewards[&agent],
                    next_observation: &result.observations[&agent],
                    terminated:       result.terminated[&agent],
                    truncated:        result.truncated[&agent],
                });
            }
            observer.on_tick_end(&result.events);

            total_reward += result.total_reward();
            let done = result.is_done();
            observations = result.observations;
            if done {
                break;
            }
        }

        let summary = EpisodeSummary {
            ticks: self.world.tick.0,
            total_reward,
            spawned: self.spawned_total(),
            delivered: self.delivered_total,
        };
        observer.on_episode_end(&summary);
        Ok(summary)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Every agent needs an action and every action needs an agent.
    fn check_actions(&self, actions: &ActionMap) -> SimResult<()> {
        if let Some(missing) = self.world.agents.agent_ids().find(|a| !actions.contains_key(a)) {
            return Err(SimError::MissingAction(missing));
        }
        if let Some(&unknown) = actions.keys().find(|a| !self.world.agents.contains(**a)) {
            return Err(SimError::UnknownAgent(unknown));
        }
        Ok(())
    }

    fn agent_infos(&self, outcomes: &[AgentOutcome]) -> BTreeMap<AgentId, AgentInfo> {
        let agents = &self.world.agents;
        agents
            .agent_ids()
            .zip(outcomes)
            .map(|(agent, outcome)| {
                let info = AgentInfo {
                    position:  agents.position(agent),
                    carrying:  agents.carried(agent),
                    collided:  outcome.collided,
                    picked_up: outcome.picked_up,
                    delivered: outcome.delivered,
                };
                (agent, info)
            })
            .collect()
    }
}
