/// Errors the SDK might return.
#[derive(Debug, Clone, PartialEq, uniffi::Error, thiserror::Error)]
pub enum SdkError {
    #[error("Could not reach the carrier: {reason}")]
    Transport { reason: String },
    #[error("Request to the carrier timed out")]
    Timeout,
    #[error("Login error: {reason}")]
    Authentication { reason: String },
    #[error("TIPSA API Error: {reason}")]
    VendorFault { reason: String },
    #[error("Could not parse carrier response: {reason}")]
    ResponseParse { reason: String },
    #[error("Unrecognized response from {operation}")]
    UnrecognizedResponse { operation: String },
    #[error("Carrier response is missing {field}")]
    MissingField { field: String },
    #[error("Could not decode {field}: {reason}")]
    InvalidContent { field: String, reason: String },
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error("Could not create runtime")]
    CouldNotCreateRuntime,
    #[error("Could not serialize result")]
    CouldNotSerialize,
}

impl SdkError {
    /// Whether repeating the same request could succeed. Only failures of the HTTP exchange itself
    /// qualify, anything the carrier answered is final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SdkError::Transport { .. } | SdkError::Timeout)
    }

    pub(crate) fn response_parse(reason: impl ToString) -> Self {
        SdkError::ResponseParse {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        SdkError::MissingField {
            field: field.to_string(),
        }
    }
}
