use thiserror::Error;

/// Errors produced by the page assistant
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Chrome could not be launched
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Could not attach to a running browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation or history operation failed
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Tab creation, lookup or closing failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// A script evaluated in the page failed or returned nothing
    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The layout snapshot could not be read or decoded
    #[error("Failed to snapshot page: {0}")]
    SnapshotFailed(String),

    /// A selection is already active on this widget
    #[error("A selection is already in progress")]
    SelectionInProgress,

    /// No valid (at least 20x20 px) rectangle has been drawn yet
    #[error("Please select an area first.")]
    EmptySelection,

    /// The rectangle is valid but nothing extractable was inside it
    #[error("No content found in the selected area")]
    EmptyExtraction,

    /// The health probe failed or answered with a non-2xx status
    #[error(
        "Backend server is not accessible at {base}. Please make sure the AI Scanner backend is running on localhost:8054"
    )]
    BackendUnreachable { base: String },

    /// A real backend call answered with a non-2xx status
    #[error("HTTP error! status: {status} - {body}")]
    Http { status: u16, body: String },

    /// Transport-level failure while talking to the backend
    #[error("Request failed: {0}")]
    Request(String),

    /// The backend answered 2xx with a body that could not be decoded
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AssistantError::InvalidResponse(err.to_string())
        } else {
            AssistantError::Request(err.to_string())
        }
    }
}

impl AssistantError {
    /// Whether the error came from the backend rather than the page or the user
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            AssistantError::BackendUnreachable { .. }
                | AssistantError::Http { .. }
                | AssistantError::Request(_)
                | AssistantError::InvalidResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
