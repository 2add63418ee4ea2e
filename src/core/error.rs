use thiserror::Error;

/// Hard faults of a classification round trip. A soft miss is not an error;
/// see [`crate::domain::Classification::Miss`].
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("upstream status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("upstream body could not be decoded: {0}")]
    UpstreamBody(String),

    #[error("completion contained no choices")]
    EmptyCompletion,

    #[error("arguments for {tool} are not valid JSON: {source}")]
    ArgumentDecode {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("arguments for {tool} failed validation: {field}: {reason}")]
    Validation {
        tool: String,
        field: String,
        reason: String,
    },
}

impl ClassifyError {
    /// True for failures caused by the provider rather than by the payload it returned.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ClassifyError::Upstream(_)
                | ClassifyError::UpstreamStatus { .. }
                | ClassifyError::UpstreamBody(_)
                | ClassifyError::EmptyCompletion
        )
    }
}

impl From<reqwest::Error> for ClassifyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClassifyError::UpstreamBody(e.to_string())
        } else {
            ClassifyError::Upstream(e.to_string())
        }
    }
}
