//! Core error type.
//!
//! Only configuration problems are errors at this level; everything that can
//! go wrong inside a tick is either normalised (unknown action codes, wasted
//! intents) or an internal defect.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `df-core`.
pub type CoreResult<T> = Result<T, CoreError>;
