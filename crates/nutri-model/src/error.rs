use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown slot '{0}' (expected left or right)")]
    UnknownSlot(String),
    #[error("unknown report section '{0}'")]
    UnknownSection(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
