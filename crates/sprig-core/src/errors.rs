use crate::service::ServiceError;

/// Typed error hierarchy for tool dispatch.
/// Classifies errors as expected control-flow conditions or unhandled failures.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ToolError {
    // Expected: raised before any I/O or state lookup
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    // Expected: session state
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("no child selected: call select_child before using child-scoped tools")]
    NoChildSelected,

    // Expected: dispatch
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    // Translated at the handler boundary with a remediation hint
    #[error("access denied: {0}")]
    PermissionDenied(String),

    // Propagated unchanged from the data service
    #[error("data service error: {0}")]
    Service(#[from] ServiceError),

    // Unhandled: logged with full context and re-thrown
    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    /// Expected conditions are routine control flow; everything else is
    /// logged as a failure.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidArguments(_)
                | Self::SessionNotFound(_)
                | Self::NoChildSelected
                | Self::ToolNotFound(_)
        )
    }

    /// Short classification string for logging/metrics.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::SessionNotFound(_) => "session_not_found",
            Self::NoChildSelected => "no_child_selected",
            Self::ToolNotFound(_) => "tool_not_found",
            Self::PermissionDenied(_) => "permission_denied",
            Self::Service(_) => "service_error",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_classification() {
        assert!(ToolError::InvalidArguments("missing query".into()).is_expected());
        assert!(ToolError::SessionNotFound("sess_x".into()).is_expected());
        assert!(ToolError::NoChildSelected.is_expected());
        assert!(ToolError::ToolNotFound("bogus".into()).is_expected());
    }

    #[test]
    fn unhandled_classification() {
        assert!(!ToolError::PermissionDenied("ask the owner".into()).is_expected());
        assert!(!ToolError::Internal("boom".into()).is_expected());
        assert!(!ToolError::Service(ServiceError::Network("tcp reset".into())).is_expected());
    }

    #[test]
    fn error_kind_strings() {
        assert_eq!(ToolError::NoChildSelected.error_kind(), "no_child_selected");
        assert_eq!(
            ToolError::ToolNotFound("x".into()).error_kind(),
            "tool_not_found"
        );
        assert_eq!(
            ToolError::Service(ServiceError::Decode("bad json".into())).error_kind(),
            "service_error"
        );
    }

    #[test]
    fn tool_not_found_display() {
        let err = ToolError::ToolNotFound("get_weather".into());
        assert_eq!(err.to_string(), "tool not found: get_weather");
    }

    #[test]
    fn service_error_converts() {
        let err: ToolError = ServiceError::Forbidden("403".into()).into();
        assert!(matches!(err, ToolError::Service(ServiceError::Forbidden(_))));
    }
}
