//! Error types for invite generation and delivery.

use thiserror::Error;

/// Errors that can occur while generating, saving or sending an invite.
#[derive(Error, Debug)]
pub enum InviteError {
    #[error("Invalid date-time '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Invalid invite: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid email address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Could not build email: {0}")]
    Message(String),

    #[error("Mail relay error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse failure category, for callers that only care about where things broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Parse,
    Validation,
    Io,
    Transport,
    Config,
}

impl InviteError {
    pub fn kind(&self) -> FailureKind {
        match self {
            InviteError::Parse { .. } | InviteError::Address { .. } => FailureKind::Parse,
            InviteError::Validation(_) | InviteError::Message(_) => FailureKind::Validation,
            InviteError::Io(_) => FailureKind::Io,
            InviteError::Transport(_) => FailureKind::Transport,
            InviteError::Config(_) => FailureKind::Config,
        }
    }
}

/// Result type alias for invite operations.
pub type InviteResult<T> = Result<T, InviteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_address_errors_with_parse_errors() {
        let err = InviteError::Address {
            address: "nope".to_string(),
            reason: "missing domain".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Parse);
    }

    #[test]
    fn test_io_errors_convert_with_question_mark() {
        fn open_missing() -> InviteResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.ics")?)
        }

        let err = open_missing().unwrap_err();
        assert_eq!(err.kind(), FailureKind::Io);
        assert!(err.to_string().starts_with("IO error:"));
    }
}
