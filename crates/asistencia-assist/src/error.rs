use thiserror::Error;

/// Errors from the assistance model client.
///
/// These never escape [`crate::AssistClient::suggest`]; they are only visible
/// through [`crate::AssistClient::try_suggest`].
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no API key configured")]
    MissingApiKey,

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("response carried no suggestion text")]
    EmptyResponse,

    #[error("JSON deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}
