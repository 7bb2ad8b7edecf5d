//! The `OutputWriter` trait implemented by backend writers.

use crate::{EpisodeSummaryRow, OutputResult, TransitionRow};

/// A sink for transition rows and episode totals.
///
/// Errors are surfaced to [`ReplayObserver`][crate::ReplayObserver], which
/// stores the first one for [`take_error`][crate::ReplayObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of transitions (one tick's worth, usually).
    fn write_transitions(&mut self, rows: &[TransitionRow]) -> OutputResult<()>;

    /// Write one episode summary row.
    fn write_episode_summary(&mut self, row: &EpisodeSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
