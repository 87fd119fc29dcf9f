#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("view creation failed: {0}")]
    Creation(String),

    #[error("engine backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serde(String),

    #[error("no data directory available")]
    NoDataDir,
}

#[derive(Debug, thiserror::Error)]
pub enum NimbusError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_display() {
        let err = EngineError::Creation("no window handle".into());
        assert_eq!(err.to_string(), "view creation failed: no window handle");

        let err = EngineError::Backend("webview gone".into());
        assert_eq!(err.to_string(), "engine backend error: webview gone");
    }

    #[test]
    fn nimbus_error_from_engine() {
        let err: NimbusError = EngineError::Backend("detached".into()).into();
        assert!(matches!(err, NimbusError::Engine(_)));
        assert!(err.to_string().contains("detached"));
    }

    #[test]
    fn nimbus_error_from_store() {
        let err: NimbusError = StoreError::NoDataDir.into();
        assert!(matches!(err, NimbusError::Store(_)));
    }

    #[test]
    fn store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StoreError = io.into();
        assert!(err.to_string().contains("missing"));
    }
}
