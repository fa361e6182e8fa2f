/// Errors raised while assembling a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A builder method ran before `add_config`.
    NotConfigured,

    /// An entry of an operation's `errors` list failed the status/description check.
    InvalidErrorResponse {
        route: String,
        method: String,
        index: usize,
    },

    /// The finished document could not be serialized.
    Serialize(String),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::NotConfigured => {
                write!(f, "Document builder not configured: call add_config first")
            }
            DocumentError::InvalidErrorResponse {
                route,
                method,
                index,
            } => write!(
                f,
                "Error in swagger must contain status and description ({} {route}, errors[{index}])",
                method.to_uppercase()
            ),
            DocumentError::Serialize(msg) => write!(f, "Document serialization error: {msg}"),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Serialize(err.to_string())
    }
}
