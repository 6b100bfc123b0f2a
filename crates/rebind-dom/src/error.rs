use rebind_core::ReactiveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("mount target `{target}` is not an element")]
    InvalidMount { target: String },

    #[error(transparent)]
    Reactive(#[from] ReactiveError),
}

pub type Result<T, E = DomError> = std::result::Result<T, E>;
