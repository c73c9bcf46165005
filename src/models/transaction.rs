use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_currency() -> String {
    "BRL".to_string()
}

/// One transaction as extracted from the statement text by the LLM.
/// Positive amounts are purchases, negative amounts are payments/refunds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Full structured result of the statement extraction call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementExtraction {
    pub bank_name: Option<String>,
    pub due_date: Option<String>,
    pub statement_total: Option<f64>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// A transaction enriched with its resolved category/subcategory.
/// All four catalog fields may be null when nothing resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub subcategory_id: Option<Uuid>,
    pub subcategory_name: Option<String>,
}
