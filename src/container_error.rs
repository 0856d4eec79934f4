use thiserror::Error;

/// Errors returned by the typed accessors of [`Container`](crate::Container).
///
/// Registration and plain [`get`](crate::Container::get) never fail; only the
/// accessors that promise a concrete type can.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("service not found in container: {key}")]
    NotFound { key: String },

    #[error("service {key} is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}
