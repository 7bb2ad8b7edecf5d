use df_core::{AgentId, CoreError, Tick};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("step called before reset")]
    NotReset,

    #[error("action map has no entry for {0}")]
    MissingAction(AgentId),

    #[error("action map names {0}, which is not part of this fleet")]
    UnknownAgent(AgentId),

    #[error("episode was truncated at {tick}; call reset before stepping again")]
    EpisodeFinished { tick: Tick },
}

pub type SimResult<T> = Result<T, SimError>;
