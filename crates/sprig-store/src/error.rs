use sprig_core::errors::ToolError;

#[derive(Clone, Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("no child selected")]
    NoChildSelected,
}

impl From<StoreError> for ToolError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => ToolError::SessionNotFound(what),
            StoreError::NoChildSelected => ToolError::NoChildSelected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_session_not_found() {
        let err: ToolError = StoreError::NotFound("session sess_x".into()).into();
        assert!(matches!(err, ToolError::SessionNotFound(_)));
    }

    #[test]
    fn no_child_selected_maps_through() {
        let err: ToolError = StoreError::NoChildSelected.into();
        assert!(matches!(err, ToolError::NoChildSelected));
    }
}
