use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Category template row (expense_category_template)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String, // "expense" | "income"
}

/// Subcategory template row (expense_subcategory_template)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: Uuid,
    pub name: String,
    pub category_template_id: Uuid, // owning category
}

/// User rule row (transaction_category_rules)
///
/// `normalized_pattern` is stored already lowercased/collapsed and is matched
/// as a substring of the normalized transaction description. Either template
/// id may be null, and either may reference a row that no longer exists.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CategoryRule {
    pub normalized_pattern: String,
    pub category_template_id: Option<Uuid>,
    pub subcategory_template_id: Option<Uuid>,
    pub confirmed_count: i64,
    pub usage_count: i64,
}
