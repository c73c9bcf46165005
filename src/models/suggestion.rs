use serde::{Deserialize, Serialize};

/// One entry of the batch submitted to the suggestion service.
/// `index` is the position within this batch, not the statement.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionBatchItem {
    pub index: usize,
    pub description: String,
    pub amount: f64,
}

/// Catalog summary sent alongside the batch: expense categories with their
/// subcategory names, so the model can only pick from what exists.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogOutline {
    pub categories: Vec<CategoryOutline>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryOutline {
    pub name: String,
    pub subcategories: Vec<String>,
}

/// Per-transaction answer from the suggestion service, tagged with the batch
/// index it refers to. Names are advisory until validated against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub index: usize,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
}
