use thiserror::Error as ThisError;

///
/// Error
///
/// Request-construction error taxonomy. Structural misuse fails at the
/// offending call; missing-required-field validation is deferred to
/// serialization time so builders can be mutated incrementally before
/// being finalized. Every failure aborts the whole request build; there
/// is no retry or partial-success path.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    /// A boolean clause name outside `must`, `must_not`, `should`, `filter`.
    #[error("the bool clause '{clause}' is not supported")]
    UnsupportedClause { clause: String },

    /// Duplicate key in a registry that forbids overwrites.
    #[error("builder with key '{key}' has already been added to the {endpoint} endpoint")]
    DuplicateKey { endpoint: &'static str, key: String },

    /// Second entry added to the single-valued highlight endpoint.
    #[error("only one highlight can be set")]
    HighlightOverflow,

    /// Bool-clause addition on an endpoint without a boolean container.
    #[error("the {endpoint} endpoint does not support bool clauses")]
    BoolUnsupported { endpoint: &'static str },

    /// URI parameter name outside the fixed allow-list.
    #[error("the uri parameter '{name}' is not supported")]
    UnsupportedParameter { name: String },

    /// A named filter added to an anonymous filters aggregation, or an
    /// anonymous filter added to a named one.
    #[error("filters aggregation '{name}': {message}")]
    FilterNameMismatch { name: String, message: &'static str },

    /// Missing-required-field failure, raised while serializing.
    #[error("{subject}: {message}")]
    Validation { subject: String, message: String },
}

impl Error {
    /// Construct a serialization-time validation failure.
    pub(crate) fn validation(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            subject: subject.into(),
            message: message.into(),
        }
    }
}
