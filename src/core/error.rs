/// Failures of a single request/response round trip with the media server.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server answered {code} {text}")]
    Status { code: u16, text: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Text shown in a failure banner when the caller has no specific message.
    pub fn banner_text(&self) -> String {
        match self {
            RemoteError::Status { text, .. } if !text.is_empty() => text.clone(),
            RemoteError::Status { code, .. } => format!("HTTP {}", code),
            RemoteError::Transport(msg) => msg.clone(),
            RemoteError::Malformed(_) => "Invalid response data".to_string(),
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Malformed(err.to_string())
    }
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;
