/// Error types for the tetrad engine
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced to callers that configure or script a board.
///
/// Rejected moves, rotations and holds are not errors; they are silent no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// An action name in a script could not be parsed
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Configuration rejected by validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A board was linked to its own garbage inbox
    #[error("A board cannot be its own opponent")]
    SelfLink,
}
