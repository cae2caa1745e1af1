/// Error types for the stalled sites map
use thiserror::Error;

/// Main error type for data loading, geocoding and map operations
#[derive(Error, Debug)]
pub enum MapError {
    /// Transport failure or non-success HTTP status
    #[error("Network request failed: {0}")]
    Network(String),

    /// Response body could not be decoded into the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Geocoding returned an empty result set
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// The rendering engine rejected an operation
    #[error("Map engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Failures reported by the rendering engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Layer or marker operation issued before the engine signalled readiness
    #[error("map engine is not ready")]
    NotReady,

    /// The engine handle has already been released
    #[error("map engine has been disposed")]
    Disposed,

    /// The engine refused the operation
    #[error("{0}")]
    Rejected(String),
}

impl MapError {
    /// Short text shown to the user in the non-fatal notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            MapError::AddressNotFound(_) => "Address not found.",
            MapError::Network(_) | MapError::Parse(_) => "Failed to load map data.",
            MapError::Engine(_) => "The map could not be updated.",
        }
    }
}

impl From<reqwest::Error> for MapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MapError::Parse(err.to_string())
        } else {
            MapError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::Parse(err.to_string())
    }
}

/// Type alias for Results using MapError
pub type Result<T> = std::result::Result<T, MapError>;
