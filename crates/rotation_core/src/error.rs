use thiserror::Error;

/// Boundary errors: unknown formation lookups, malformed squads handed to
/// kickoff or restore, and JSON (de)serialization at the API edge.
///
/// Expected misuse of a calculator operation is never an error; those paths
/// return a rejected transition and leave the aggregate untouched.
#[derive(Error, Debug)]
pub enum RotationError {
    #[error("unknown formation: squad of {squad_size}, shape {shape}, {scheme} scheme")]
    UnknownFormation { squad_size: u8, shape: String, scheme: String },

    #[error("invalid squad: {0}")]
    InvalidSquad(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RotationError>;
