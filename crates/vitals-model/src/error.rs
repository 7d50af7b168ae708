use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown coercion rule: {0}")]
    UnknownRule(String),
    #[error("unknown rule tag: {0}")]
    UnknownTag(String),
    #[error("row width {actual} does not match {expected} columns")]
    RowWidth { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
