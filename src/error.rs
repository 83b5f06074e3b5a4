use std::io;

use thiserror::Error;

/// Failures that can escape the application. Interaction-level oddities
/// (dragging a note that is being edited, formatting without a selection,
/// posting an empty note) are absorbed as no-ops and never reach this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
