use std::fmt;

/// Result alias used across the crate.
pub type MergeResult<T> = Result<T, MergeError>;

/// Which caller-supplied input failed to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// The visualization specification.
    Spec,
    /// The runtime data payload.
    Data,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec => f.write_str("spec"),
            Self::Data => f.write_str("data"),
        }
    }
}

/// Every failure an invocation can end with.
#[derive(thiserror::Error, Debug)]
pub enum MergeError {
    /// Specification or payload text could not be parsed into structured form.
    #[error("malformed {input} input: {message}")]
    MalformedInput { input: InputKind, message: String },

    /// The rendering engine rejected the merged specification or failed while drawing.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid configuration or surface dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MergeError {
    pub fn malformed_spec(msg: impl fmt::Display) -> Self {
        Self::MalformedInput {
            input: InputKind::Spec,
            message: msg.to_string(),
        }
    }

    pub fn malformed_data(msg: impl fmt::Display) -> Self {
        Self::MalformedInput {
            input: InputKind::Data,
            message: msg.to_string(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for parse failures of either input.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
