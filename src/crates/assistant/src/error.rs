//! Error types for the assistant
//!
//! Device actions never fail through this type: their failures are turned
//! into result text for the model. What is left is configuration, the remote
//! model, session bookkeeping, and the tool loop cap.

use std::fmt;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Main error type for assistant operations
#[derive(Debug)]
pub enum AssistantError {
    /// Configuration error
    Config(String),

    /// Remote model error
    Llm(llm::LlmError),

    /// Session invariant violated
    Session(String),

    /// The model kept requesting tools past the per-turn cap
    ToolLoopExceeded { rounds: usize },

    /// IO error
    Io(std::io::Error),
}

impl AssistantError {
    /// Whether the credential is missing or was rejected by the remote model
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Llm(err) if err.is_auth_error())
    }
}

impl fmt::Display for AssistantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Llm(err) => write!(f, "LLM error: {}", err),
            Self::Session(msg) => write!(f, "Session error: {}", msg),
            Self::ToolLoopExceeded { rounds } => write!(
                f,
                "Tool loop exceeded: no answer after {} tool rounds",
                rounds
            ),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for AssistantError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Llm(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

// Conversions from common error types
impl From<llm::LlmError> for AssistantError {
    fn from(err: llm::LlmError) -> Self {
        Self::Llm(err)
    }
}

impl From<std::io::Error> for AssistantError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<tooling::ToolingError> for AssistantError {
    fn from(err: tooling::ToolingError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_loop_exceeded_display() {
        let err = AssistantError::ToolLoopExceeded { rounds: 10 };
        assert_eq!(
            err.to_string(),
            "Tool loop exceeded: no answer after 10 tool rounds"
        );
    }

    #[test]
    fn test_llm_error_conversion_keeps_auth_flag() {
        let err: AssistantError = llm::LlmError::AuthenticationError("bad key".into()).into();
        assert!(err.is_auth_error());
        assert!(err.to_string().starts_with("LLM error:"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;
        let err: AssistantError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_tooling_error_becomes_config() {
        let err: AssistantError = tooling::ToolingError::General("bad rounds".into()).into();
        assert!(matches!(err, AssistantError::Config(_)));
    }
}
