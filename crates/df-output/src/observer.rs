//! `ReplayObserver<W>`: bridges `FleetObserver` to an `OutputWriter`.

use df_sim::{EpisodeSummary, FleetObserver, ObservationMap, TickEvents, Transition};
use tracing::{debug, warn};

use crate::row::{EpisodeSummaryRow, TransitionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`FleetObserver`] that streams every transition and each episode's
/// totals to an [`OutputWriter`] backend.
///
/// Transitions are batched per tick.  Errors from the writer are stored
/// because observer methods have no return value; check them with
/// [`take_error`][Self::take_error] once the run is over.  Episodes are
/// numbered from 0 in the order they end.
pub struct ReplayObserver<W: OutputWriter> {
    writer:     W,
    episode:    u64,
    pending:    Vec<TransitionRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ReplayObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            episode:    0,
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Number of the episode currently being recorded.
    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Flush and close the writer.  Call once after the last episode.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, episode = self.episode, "output_write_failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> FleetObserver for ReplayObserver<W> {
    fn on_reset(&mut self, _observations: &ObservationMap) {
        self.pending.clear();
    }

    fn on_transition(&mut self, transition: &Transition<'_>) {
        self.pending.push(TransitionRow::from_transition(self.episode, transition));
    }

    fn on_tick_end(&mut self, _events: &TickEvents) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_transitions(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) {
        let row = EpisodeSummaryRow::from_summary(self.episode, summary);
        let result = self.writer.write_episode_summary(&row);
        self.store_err(result);
        debug!(episode = self.episode, ticks = summary.ticks, "episode_recorded");
        self.episode += 1;
    }
}
