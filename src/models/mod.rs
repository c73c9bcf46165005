pub mod catalog;
pub mod suggestion;
pub mod transaction;

pub use catalog::{Category, CategoryRule, Subcategory};
pub use suggestion::{CatalogOutline, CategoryOutline, CategorySuggestion, SuggestionBatchItem};
pub use transaction::{CategorizedTransaction, StatementExtraction, Transaction};
