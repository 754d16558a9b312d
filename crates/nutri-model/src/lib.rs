pub mod error;
pub mod nutrients;
pub mod row;
pub mod section;
pub mod slot;
pub mod table;

pub use error::{ModelError, Result};
pub use nutrients::{Nutrient, NutrientCategory, unit_for};
pub use row::NutrientRow;
pub use section::{SectionId, SectionKind};
pub use slot::{PerSlot, Slot};
pub use table::FoodTable;
