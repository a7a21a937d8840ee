use thiserror::Error;

/// Failure classes of the remote sheet API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed, or the response body could not be
    /// decoded. Both surface as `reqwest::Error`.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A payload could not be serialized for dispatch.
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The server answered `success: false` with a message, or answered
    /// `success: true` without the promised data.
    #[error("{0}")]
    Server(String),
}

impl ApiError {
    /// Whether this failure happened below the API's own result envelope.
    /// Only these classes raise an error notification; a server-reported
    /// failure is left for the caller to handle (by leaving the view
    /// unchanged), matching the read contract.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Payload(_))
    }
}
