//! Engine call errors.

/// Error returned by a [`StyleEngine`](super::StyleEngine) call.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine reported a failure.
    #[error("engine call failed: {0}")]
    Call(String),
    /// The engine does not provide this operation.
    #[error("engine does not support {0}")]
    Unsupported(&'static str),
    /// The request could not be encoded for the engine.
    #[error("could not encode engine request: {0}")]
    Payload(#[from] serde_json::Error),
}

impl EngineError {
    /// Creates a [`EngineError::Call`] from any message.
    pub fn call(message: impl Into<String>) -> Self {
        EngineError::Call(message.into())
    }
}
