use thiserror::Error;

/// Errors raised by the pure engine functions.
///
/// Collaborator code (provider, config, CLI) works in `anyhow::Result` and lets
/// these propagate through `?` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A required field or block is missing from a provider payload, or the
    /// payload does not have the expected shape at all.
    #[error("Malformed provider payload: {0}")]
    MalformedPayload(String),

    /// The daylight interval cannot produce a curve (sunrise not before sunset,
    /// or a non-positive local span).
    #[error("Invalid daylight interval: {0}")]
    InvalidInterval(String),
}

impl CoreError {
    pub(crate) fn missing(what: &str) -> Self {
        CoreError::MalformedPayload(format!("missing `{what}`"))
    }
}
