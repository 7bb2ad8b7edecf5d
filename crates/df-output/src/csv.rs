//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `transitions.csv`
//! - `episode_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EpisodeSummaryRow, OutputResult, TransitionRow};

pub const TRANSITION_HEADERS: [&str; 9] = [
    "episode",
    "tick",
    "agent_id",
    "observation",
    "action",
    "reward",
    "next_observation",
    "terminated",
    "truncated",
];

pub const SUMMARY_HEADERS: [&str; 6] =
    ["episode", "ticks", "total_reward", "spawned", "delivered", "delivery_rate"];

/// Writes transitions and episode totals to two CSV files.
pub struct CsvWriter {
    transitions: Writer<File>,
    summaries:   Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (creating `dir` if needed) and write
    /// the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut transitions = Writer::from_path(dir.join("transitions.csv"))?;
        transitions.write_record(TRANSITION_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("episode_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self {
            transitions,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_transitions(&mut self, rows: &[TransitionRow]) -> OutputResult<()> {
        for row in rows {
            self.transitions.write_record(&[
                row.episode.to_string(),
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.observation.clone(),
                row.action.to_string(),
                row.reward.to_string(),
                row.next_observation.clone(),
                (row.terminated as u8).to_string(),
                (row.truncated as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_episode_summary(&mut self, row: &EpisodeSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.episode.to_string(),
            row.ticks.to_string(),
            row.total_reward.to_string(),
            row.spawned.to_string(),
            row.delivered.to_string(),
            format!("{:.4}", row.delivery_rate),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.transitions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
