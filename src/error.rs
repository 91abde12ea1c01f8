//! Error type shared by the whole modeling layer.

use thiserror::Error;

/// Errors raised while building, flattening or solving a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Unknown label, offset out of range, or `prev()` on the first element.
    #[error("invalid index: {0}")]
    InvalidIndex(String),
    /// A product or quotient that cannot be written as a linear form.
    #[error("nonlinear expression: {0}")]
    NonlinearExpression(String),
    /// An algebraic combination that has no meaning as a linear constraint or expression.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    /// Mutation attempted after `seal_data()`.
    #[error("model is sealed: {0}")]
    Sealed(String),
    /// Operation needs the flat variable layout, which only exists after `seal_data()`.
    #[error("model is not sealed: {0}")]
    NotSealed(String),
    /// Data needed to size a dimension has not been provided.
    #[error("incomplete data: {0}")]
    IncompleteData(String),
    /// Stored data no longer matches the size of its index sets.
    #[error("shape mismatch for `{name}`: storage has {expected} elements, index sets give {actual}")]
    ShapeMismatch { name : String, expected : usize, actual : usize },
    /// Parameter value outside its declared domain.
    #[error("domain violation: {0}")]
    DomainViolation(String),
    #[error("i/o error: {0}")]
    Io(String),
    /// Error reported by a solver backend.
    #[error("solver error: {0}")]
    Solver(String),
}

impl From<std::io::Error> for ModelError {
    fn from(e : std::io::Error) -> ModelError { ModelError::Io(e.to_string()) }
}

pub type Result<T> = std::result::Result<T,ModelError>;
