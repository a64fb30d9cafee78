use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Chapter '{chapter_id}' has no members for this period")]
    EmptyRoster { chapter_id: String },

    #[error("Member '{key}' not found in roster")]
    MemberNotFound { key: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnalyticsError {
    /// True when the error means "nothing uploaded yet" rather than a fault.
    pub fn is_no_data(&self) -> bool {
        matches!(self, AnalyticsError::EmptyRoster { .. })
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
