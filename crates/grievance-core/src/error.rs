use grievance_types::ComplaintStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrievanceError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: ComplaintStatus,
        to: ComplaintStatus,
    },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("remote failure{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    RemoteFailure {
        status: Option<u16>,
        message: String,
    },

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Coarse classification used by callers that only need to branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PermissionDenied,
    InvalidTransition,
    InvalidState,
    Validation,
    RemoteFailure,
    Internal,
}

impl GrievanceError {
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RemoteFailure {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::Validation(_) => ErrorKind::Validation,
            Self::RemoteFailure { .. } => ErrorKind::RemoteFailure,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for failures detected before anything reached the network.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::RemoteFailure { .. } | Self::Internal(_))
    }

    /// Message shown to the person who triggered the mutation.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied(_) => {
                "You do not have permission to change this complaint.".to_string()
            }
            Self::InvalidTransition { from, to } => format!(
                "A complaint in status {} cannot move to {}.",
                crate::transitions::status_display(from.as_str()),
                crate::transitions::status_display(to.as_str())
            ),
            Self::InvalidState(raw) => format!("Unrecognised complaint status '{raw}'."),
            Self::Validation(msg) => msg.clone(),
            Self::RemoteFailure { message, .. } => message.clone(),
            Self::Internal(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}
