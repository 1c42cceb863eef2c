use thiserror::Error;

/// Errors produced while preparing chart data or rounding path strings.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimelineError {
    /// Bad input shape or dates.
    #[error("invalid resume data: {0}")]
    Validation(String),

    /// Malformed path-command string.
    #[error("malformed path at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// An item whose outline cannot be built, e.g. a negative span.
    #[error("degenerate geometry: {0}")]
    Geometry(String),
}

impl TimelineError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }
}

pub type Result<T, E = TimelineError> = std::result::Result<T, E>;
