use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::LlmError;
use crate::models::{CatalogOutline, CategoryRule, CategorySuggestion, SuggestionBatchItem, Transaction};
use crate::service::catalog_index::CatalogIndex;
use crate::service::rule_matcher::has_match;

/// Model-assisted batch classifier. One call per categorization pass at most;
/// implementations must not be retried by callers.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn suggest(
        &self,
        batch: &[SuggestionBatchItem],
        catalog: &CatalogOutline,
    ) -> Result<Vec<CategorySuggestion>, LlmError>;
}

/// Transactions split by whether any user rule matches, each entry keeping
/// its index in the original statement order.
#[derive(Debug)]
pub struct Partition<'a> {
    pub with_rule: Vec<(usize, &'a Transaction)>,
    pub without_rule: Vec<(usize, &'a Transaction)>,
}

pub fn partition<'a>(transactions: &'a [Transaction], rules: &[CategoryRule]) -> Partition<'a> {
    let mut with_rule = Vec::new();
    let mut without_rule = Vec::new();
    for (index, transaction) in transactions.iter().enumerate() {
        if has_match(&transaction.description, rules) {
            with_rule.push((index, transaction));
        } else {
            without_rule.push((index, transaction));
        }
    }
    Partition { with_rule, without_rule }
}

/// Ask the suggestion service about every transaction no rule covered, and
/// key the answers by original statement index.
///
/// The batch carries local positions 0..n; the remap goes through the
/// partition's recorded original indices, so a suggestion can only land on
/// the transaction it was produced for. Out-of-range indices from the model
/// are dropped.
///
/// Fail-soft: any service error yields an empty mapping so rule-matched and
/// default-resolved transactions still come out of the pass.
pub async fn request_suggestions(
    service: &dyn SuggestionService,
    without_rule: &[(usize, &Transaction)],
    index: &CatalogIndex,
) -> IndexMap<usize, CategorySuggestion> {
    if without_rule.is_empty() {
        // never pay for an empty batch
        return IndexMap::new();
    }

    let batch: Vec<SuggestionBatchItem> = without_rule
        .iter()
        .enumerate()
        .map(|(local, (_, transaction))| SuggestionBatchItem {
            index: local,
            description: transaction.description.clone(),
            amount: transaction.amount,
        })
        .collect();
    let outline = index.expense_outline();

    match service.suggest(&batch, &outline).await {
        Ok(suggestions) => {
            let mut by_original = IndexMap::with_capacity(suggestions.len());
            for suggestion in suggestions {
                let Some(&(original, _)) = without_rule.get(suggestion.index) else {
                    tracing::warn!(
                        local_index = suggestion.index,
                        "suggestion refers to an index outside the batch, dropping"
                    );
                    continue;
                };
                by_original.insert(original, suggestion);
            }
            by_original
        }
        Err(e) => {
            tracing::warn!("suggestion service failed, falling back to defaults: {e}");
            IndexMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn txn(description: &str) -> Transaction {
        Transaction {
            date: "2024-03-10".to_string(),
            description: description.to_string(),
            amount: 10.0,
            currency: "BRL".to_string(),
        }
    }

    fn rule(pattern: &str) -> CategoryRule {
        CategoryRule {
            normalized_pattern: pattern.to_string(),
            category_template_id: None,
            subcategory_template_id: None,
            confirmed_count: 0,
            usage_count: 0,
        }
    }

    fn empty_index() -> CatalogIndex {
        CatalogIndex::build(vec![], vec![])
    }

    /// Echoes every batch item back with a name derived from its local index,
    /// counting calls.
    struct EchoService {
        calls: AtomicUsize,
    }

    impl EchoService {
        fn new() -> Self {
            Self { calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl SuggestionService for EchoService {
        async fn suggest(
            &self,
            batch: &[SuggestionBatchItem],
            _catalog: &CatalogOutline,
        ) -> Result<Vec<CategorySuggestion>, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(batch
                .iter()
                .map(|item| CategorySuggestion {
                    index: item.index,
                    category_name: Some(format!("cat-{}", item.index)),
                    subcategory_name: None,
                })
                .collect())
        }
    }

    struct FailingService;

    #[async_trait]
    impl SuggestionService for FailingService {
        async fn suggest(
            &self,
            _batch: &[SuggestionBatchItem],
            _catalog: &CatalogOutline,
        ) -> Result<Vec<CategorySuggestion>, LlmError> {
            Err(LlmError::EmptyCompletion)
        }
    }

    struct RogueService;

    #[async_trait]
    impl SuggestionService for RogueService {
        async fn suggest(
            &self,
            batch: &[SuggestionBatchItem],
            _catalog: &CatalogOutline,
        ) -> Result<Vec<CategorySuggestion>, LlmError> {
            // answers for positions that were never submitted
            Ok(vec![CategorySuggestion {
                index: batch.len() + 5,
                category_name: Some("Lazer".to_string()),
                subcategory_name: None,
            }])
        }
    }

    #[test]
    fn partition_preserves_order_and_original_indices() {
        let transactions = vec![txn("UBER TRIP"), txn("PADARIA DO ZE"), txn("UBER EATS"), txn("FARMACIA")];
        let rules = vec![rule("uber")];

        let split = partition(&transactions, &rules);
        let with: Vec<usize> = split.with_rule.iter().map(|(i, _)| *i).collect();
        let without: Vec<usize> = split.without_rule.iter().map(|(i, _)| *i).collect();
        assert_eq!(with, vec![0, 2]);
        assert_eq!(without, vec![1, 3]);
        assert_eq!(split.without_rule[0].1.description, "PADARIA DO ZE");
    }

    #[tokio::test]
    async fn empty_batch_never_calls_the_service() {
        let service = EchoService::new();
        let map = request_suggestions(&service, &[], &empty_index()).await;
        assert!(map.is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn suggestions_map_back_to_original_indices() {
        let transactions = vec![txn("UBER TRIP"), txn("PADARIA DO ZE"), txn("UBER EATS"), txn("FARMACIA")];
        let rules = vec![rule("uber")];
        let split = partition(&transactions, &rules);

        let service = EchoService::new();
        let map = request_suggestions(&service, &split.without_rule, &empty_index()).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(map.len(), 2);
        // local 0 was original 1, local 1 was original 3
        assert_eq!(map.get(&1).and_then(|s| s.category_name.as_deref()), Some("cat-0"));
        assert_eq!(map.get(&3).and_then(|s| s.category_name.as_deref()), Some("cat-1"));
        assert!(!map.contains_key(&0));
        assert!(!map.contains_key(&2));
    }

    #[tokio::test]
    async fn service_failure_degrades_to_empty_mapping() {
        let transactions = vec![txn("PADARIA DO ZE")];
        let split = partition(&transactions, &[]);
        let map = request_suggestions(&FailingService, &split.without_rule, &empty_index()).await;
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_indices_are_dropped() {
        let transactions = vec![txn("PADARIA DO ZE")];
        let split = partition(&transactions, &[]);
        let map = request_suggestions(&RogueService, &split.without_rule, &empty_index()).await;
        assert!(map.is_empty());
    }
}
