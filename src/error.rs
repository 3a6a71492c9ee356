use serde::Deserialize;

/// Every way a call to the quiz service (or the form guarding it) can fail.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Network(String),
    #[error("server error ({status})")]
    Server { status: u16, detail: Option<String> },
    #[error("not found")]
    NotFound { detail: Option<String> },
    #[error("{0}")]
    Generation(String),
    #[error("unexpected response from server: {0}")]
    Malformed(String),
}

impl ClientError {
    /// The single line a view shows for this error. A server-supplied
    /// `detail` always wins over the generic text.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg)
            | ClientError::Network(msg)
            | ClientError::Generation(msg) => msg.clone(),
            ClientError::Server {
                detail: Some(detail),
                ..
            }
            | ClientError::NotFound {
                detail: Some(detail),
            } => detail.clone(),
            ClientError::Server { status, .. } => status_message(*status),
            ClientError::NotFound { .. } => "This quiz no longer exists.".into(),
            ClientError::Malformed(_) => self.to_string(),
        }
    }
}

pub(crate) fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Pulls a string `detail` out of an error body. Structured details (such as
/// a list of field errors) are not shown verbatim.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}
