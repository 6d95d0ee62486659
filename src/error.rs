use thiserror::Error;

/// All errors that the crate can generate.
///
/// Layout mutation (appending, justification, recycling) never fails; only
/// delegated drawing can, so every variant originates in a
/// [Surface](crate::Surface) implementation.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred while drawing to the surface
    Io(#[from] std::io::Error),

    #[error("surface rejected draw command: {0}")]
    /// The surface refused a draw command
    Surface(String),
}
