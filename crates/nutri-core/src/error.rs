use nutri_model::Slot;
use thiserror::Error;

/// Errors raised while resolving a selection into a comparison.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A picked name has no row in the table. The render is aborted and the
    /// displayed comparison is left as it was.
    #[error("food '{food}' picked on the {slot} side was not found in the table")]
    FoodLookupFailed { slot: Slot, food: String },
}

pub type Result<T> = std::result::Result<T, SelectionError>;
