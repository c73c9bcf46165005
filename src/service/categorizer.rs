use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::queries;
use crate::error::ExtractError;
use crate::models::{CategorizedTransaction, CategoryRule, CategorySuggestion, Transaction};
use crate::service::catalog_index::CatalogIndex;
use crate::service::rule_matcher::find_best_rule;
use crate::service::suggestions::{partition, request_suggestions, SuggestionService};

/// Turns extracted transactions into categorized ones using the user's rules,
/// the category catalog and a best-effort model suggestion pass.
pub struct CategorizerService {
    pool: PgPool,
    suggestions: Arc<dyn SuggestionService>,
}

impl CategorizerService {
    pub fn new(pool: PgPool, suggestions: Arc<dyn SuggestionService>) -> Self {
        Self { pool, suggestions }
    }

    /// One categorization pass over one statement's transactions.
    ///
    /// Catalog-store failures abort the pass; a suggestion-service failure
    /// only degrades the affected transactions to the default category.
    pub async fn categorize(
        &self,
        transactions: &[Transaction],
        user_id: Uuid,
    ) -> Result<Vec<CategorizedTransaction>, ExtractError> {
        let rules = queries::get_user_rules(&self.pool, user_id).await?;
        let categories = queries::list_categories(&self.pool).await?;
        let subcategories = queries::list_subcategories(&self.pool).await?;
        let index = CatalogIndex::build(categories, subcategories);

        let split = partition(transactions, &rules);
        tracing::info!(
            total = transactions.len(),
            rule_matched = split.with_rule.len(),
            needs_suggestion = split.without_rule.len(),
            "categorizing statement"
        );

        let suggested =
            request_suggestions(self.suggestions.as_ref(), &split.without_rule, &index).await;

        Ok(transactions
            .iter()
            .enumerate()
            .map(|(i, transaction)| resolve_transaction(transaction, &rules, &index, suggested.get(&i)))
            .collect())
    }
}

/// Per-transaction priority chain: rule, then suggestion, then default.
///
/// A matching rule is terminal: ids it references are looked up once and a
/// dangling reference leaves that field null, with no fallthrough to the
/// suggestion or the default. Suggested names are validated against the
/// catalog case-insensitively, and a suggested subcategory is only applied
/// when it belongs to the suggested category. The same ownership check gates
/// the default subcategory, so "sem categoria" never ends up under a
/// category other than its own.
pub fn resolve_transaction(
    transaction: &Transaction,
    rules: &[CategoryRule],
    index: &CatalogIndex,
    suggestion: Option<&CategorySuggestion>,
) -> CategorizedTransaction {
    let mut category = None;
    let mut subcategory = None;

    if let Some(rule) = find_best_rule(&transaction.description, rules) {
        category = rule.category_template_id.and_then(|id| index.category(id));
        subcategory = rule.subcategory_template_id.and_then(|id| index.subcategory(id));
    } else {
        if let Some(suggestion) = suggestion {
            if let Some(found) =
                suggestion.category_name.as_deref().and_then(|name| index.category_by_name(name))
            {
                category = Some(found);
                subcategory = suggestion
                    .subcategory_name
                    .as_deref()
                    .and_then(|name| index.subcategory_by_name(name))
                    .filter(|sub| sub.category_template_id == found.id);
            }
        }

        if category.is_none() {
            category = index.default_category();
        }
        if subcategory.is_none() {
            subcategory = index
                .default_subcategory()
                .filter(|sub| category.map(|c| c.id) == Some(sub.category_template_id));
        }
    }

    CategorizedTransaction {
        date: transaction.date.clone(),
        description: transaction.description.clone(),
        amount: transaction.amount,
        category_id: category.map(|c| c.id),
        category_name: category.map(|c| c.name.clone()),
        subcategory_id: subcategory.map(|s| s.id),
        subcategory_name: subcategory.map(|s| s.name.clone()),
    }
}
