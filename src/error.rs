//! Error types for the clock.

use thiserror::Error;

/// Everything that can stop the clock before the user quits.
#[derive(Error, Debug)]
pub enum Error {
    /// The terminal could not be set up, queried or written to.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The termination signal handler could not be installed.
    #[error("signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
