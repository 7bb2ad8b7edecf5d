//! Tests for df-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SUMMARY_HEADERS, TRANSITION_HEADERS};
    use crate::row::{EpisodeSummaryRow, TransitionRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn transition_row(agent_id: u32, tick: u64) -> TransitionRow {
        TransitionRow {
            episode:          0,
            tick,
            agent_id,
            observation:      "1 2 -1 -1 -1 -1".into(),
            action:           4,
            reward:           -0.01,
            next_observation: "2 2 -1 -1 -1 -1".into(),
            terminated:       false,
            truncated:        tick == 9,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let out = dir.path().join("nested");
        let _w = CsvWriter::new(&out).unwrap();
        assert!(out.join("transitions.csv").exists());
        assert!(out.join("episode_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("transitions.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, TRANSITION_HEADERS);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("episode_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADERS);
    }

    #[test]
    fn csv_transition_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_transitions(&[transition_row(0, 9), transition_row(1, 9)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("transitions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][2], "1");                // agent_id
        assert_eq!(&rows[0][3], "1 2 -1 -1 -1 -1");  // observation
        assert_eq!(&rows[0][4], "4");                // action
        assert_eq!(&rows[0][7], "0");                // terminated
        assert_eq!(&rows[0][8], "1");                // truncated
    }

    #[test]
    fn csv_episode_summary() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_episode_summary(&EpisodeSummaryRow {
            episode:       2,
            ticks:         100,
            total_reward:  12.5,
            spawned:       8,
            delivered:     2,
            delivery_rate: 0.25,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("episode_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "2");
        assert_eq!(&rows[0][2], "12.5");
        assert_eq!(&rows[0][5], "0.2500");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_transitions(&[]).unwrap();
    }
}

#[cfg(test)]
mod buffer_tests {
    use df_core::{Action, AgentId, Tick};

    use crate::{ReplayBuffer, ReplayRecord};

    fn record(agent: u32, tick: u64) -> ReplayRecord {
        ReplayRecord {
            episode:          0,
            tick:             Tick(tick),
            agent:            AgentId(agent),
            observation:      vec![0.0; 6],
            action:           Action::Stay,
            reward:           -0.01,
            next_observation: vec![0.0; 6],
            terminated:       false,
            truncated:        false,
        }
    }

    #[test]
    fn rings_are_per_agent() {
        let mut buf = ReplayBuffer::new(10);
        buf.push(record(0, 1));
        buf.push(record(1, 1));
        buf.push(record(0, 2));
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.agents().collect::<Vec<_>>(), vec![AgentId(0), AgentId(1)]);
        assert_eq!(buf.iter(AgentId(0)).count(), 2);
        assert_eq!(buf.iter(AgentId(7)).count(), 0);
    }

    #[test]
    fn oldest_record_evicted_at_capacity() {
        let mut buf = ReplayBuffer::new(3);
        for tick in 1..=5 {
            buf.push(record(0, tick));
        }
        let ticks: Vec<u64> = buf.iter(AgentId(0)).map(|r| r.tick.0).collect();
        assert_eq!(ticks, vec![3, 4, 5]);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut buf = ReplayBuffer::new(0);
        buf.push(record(0, 1));
        assert!(buf.is_empty());
    }

    #[test]
    fn clear_empties_all_rings() {
        let mut buf = ReplayBuffer::new(4);
        buf.push(record(0, 1));
        buf.push(record(2, 1));
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn agent_stats_summarise_rewards_actions_and_returns() {
        let mut buf = ReplayBuffer::new(10);
        let steps = [(Action::Up, 1.0, false), (Action::Up, 3.0, true), (Action::Pickup, -2.0, false)];
        for (tick, &(action, reward, truncated)) in steps.iter().enumerate() {
            buf.push(ReplayRecord { action, reward, truncated, ..record(1, tick as u64 + 1) });
        }

        let stats = buf.agent_stats(AgentId(1)).unwrap();
        assert_eq!(stats.transitions, 3);
        assert!((stats.reward_mean - 2.0 / 3.0).abs() < 1e-5);
        assert!((stats.reward_std - (38.0f32 / 9.0).sqrt()).abs() < 1e-5);
        assert_eq!(stats.reward_min, -2.0);
        assert_eq!(stats.reward_max, 3.0);
        assert_eq!(stats.action_counts, [0, 2, 0, 0, 0, 1, 0]);
        assert_eq!(stats.episode_returns, vec![4.0, -2.0]);

        assert!(buf.agent_stats(AgentId(0)).is_none());
    }

    #[test]
    fn done_covers_both_flags() {
        let mut r = record(0, 1);
        assert!(!r.done());
        r.truncated = true;
        assert!(r.done());
    }
}

#[cfg(test)]
mod observer_tests {
    use df_behavior::RandomPolicy;
    use df_core::{FleetConfig, SimRng};
    use df_sim::SimBuilder;
    use tempfile::TempDir;

    use crate::{
        CsvWriter, EpisodeSummaryRow, OutputError, OutputResult, OutputWriter, ReplayBuffer,
        ReplayObserver, TransitionRow,
    };

    fn config() -> FleetConfig {
        FleetConfig {
            grid_size:   5,
            agent_count: 2,
            seed:        Some(4),
            ..FleetConfig::default()
        }
    }

    /// Counts rows; fails every transition write after the first.
    #[derive(Default)]
    struct Flaky {
        transitions: usize,
        summaries:   usize,
        finishes:    usize,
    }

    impl OutputWriter for Flaky {
        fn write_transitions(&mut self, rows: &[TransitionRow]) -> OutputResult<()> {
            self.transitions += rows.len();
            if self.transitions > rows.len() {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            Ok(())
        }

        fn write_episode_summary(&mut self, _row: &EpisodeSummaryRow) -> OutputResult<()> {
            self.summaries += 1;
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn streams_transitions_and_summaries_to_csv() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut sim = SimBuilder::new(config()).build().unwrap();
        let mut obs = ReplayObserver::new(CsvWriter::new(dir.path()).unwrap());
        let mut policy_rng = SimRng::new(1);

        for _ in 0..2 {
            sim.run_episode(&mut RandomPolicy, &mut policy_rng, 10, &mut obs).unwrap();
        }
        obs.finish();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(obs.episode(), 2);

        // 2 episodes × 10 ticks × 2 agents
        let mut rdr = csv::Reader::from_path(dir.path().join("transitions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 40);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[39][0], "1");
        assert_eq!(&rows[39][1], "10");

        let mut rdr = csv::Reader::from_path(dir.path().join("episode_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 2);
    }

    #[test]
    fn keeps_first_error_and_keeps_going() {
        let mut sim = SimBuilder::new(config()).build().unwrap();
        let mut obs = ReplayObserver::new(Flaky::default());
        sim.run_episode(&mut RandomPolicy, &mut SimRng::new(1), 5, &mut obs).unwrap();
        obs.finish();

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
        let writer = obs.into_writer();
        assert_eq!(writer.transitions, 10);
        assert_eq!(writer.summaries, 1);
        assert_eq!(writer.finishes, 1);
    }

    #[test]
    fn buffer_records_every_transition() {
        let mut sim = SimBuilder::new(config()).build().unwrap();
        let mut buf = ReplayBuffer::new(1_000);
        let mut policy_rng = SimRng::new(3);
        sim.run_episode(&mut RandomPolicy, &mut policy_rng, 12, &mut buf).unwrap();
        sim.run_episode(&mut RandomPolicy, &mut policy_rng, 12, &mut buf).unwrap();

        assert_eq!(buf.len(), 48);
        let last = buf.iter(df_core::AgentId(1)).last().unwrap();
        assert_eq!(last.episode, 1);
        assert_eq!(last.tick.0, 12);
        assert_eq!(last.observation.len(), 6);

        let mut sink = Flaky::default();
        // Flaky fails after its first batch; one batch per agent.
        assert!(buf.write_to(&mut sink).is_err());
        assert_eq!(sink.transitions, 48);
    }

    #[test]
    fn buffer_exports_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = SimBuilder::new(config()).build().unwrap();
        let mut buf = ReplayBuffer::new(4);
        sim.run_episode(&mut RandomPolicy, &mut SimRng::new(9), 10, &mut buf).unwrap();

        let mut w = CsvWriter::new(dir.path()).unwrap();
        assert_eq!(buf.write_to(&mut w).unwrap(), 8);
        w.finish().unwrap();
        let mut rdr = csv::Reader::from_path(dir.path().join("transitions.csv")).unwrap();
        let ticks: Vec<String> = rdr.records().map(|r| r.unwrap()[1].to_owned()).collect();
        assert_eq!(ticks, ["7", "8", "9", "10", "7", "8", "9", "10"]);
    }
}
