use thiserror::Error;

/// Error type handlers return. Boxed so each subscriber keeps its own error enum.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by event dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A registered handler failed. The commit that preceded the dispatch
    /// is not rolled back.
    #[error("Handler '{handler}' failed on {event_kind}: {source}")]
    HandlerFailed {
        handler: &'static str,
        event_kind: &'static str,
        #[source]
        source: HandlerError,
    },
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
