use thiserror::Error;

/// Faults raised while parsing, resolving or evaluating expression paths.
///
/// All of them are local and synchronous: they abort the single triggering
/// write or construction and leave already-applied state as it is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactiveError {
    #[error("invalid expression `{expr}`: {reason}")]
    InvalidPath { expr: String, reason: &'static str },

    #[error("cannot resolve `{path}`: key `{segment}` is missing")]
    MissingPath { path: String, segment: String },

    #[error("cannot resolve `{path}`: `{parent}` is {found}, not an object")]
    NotAnObject {
        path: String,
        parent: String,
        found: &'static str,
    },

    #[error("binding on `{requested}` started while `{active}` is still evaluating")]
    Reentrant { active: String, requested: String },
}

pub type Result<T, E = ReactiveError> = std::result::Result<T, E>;
