use crate::models::CategoryRule;
use crate::service::normalize::normalize;

/// Find the best rule for a transaction description, or None when no rule
/// pattern occurs in the normalized description.
///
/// Priority among matches: confirmed_count desc, usage_count desc, pattern
/// length desc (more specific wins). The sort is stable, so rules that tie on
/// all three keep their original snapshot order.
pub fn find_best_rule<'a>(description: &str, rules: &'a [CategoryRule]) -> Option<&'a CategoryRule> {
    let normalized = normalize(description);
    let mut matching: Vec<&CategoryRule> = rules
        .iter()
        .filter(|rule| matches_pattern(&normalized, rule))
        .collect();
    if matching.is_empty() {
        return None;
    }

    matching.sort_by(|a, b| {
        b.confirmed_count
            .cmp(&a.confirmed_count)
            .then_with(|| b.usage_count.cmp(&a.usage_count))
            .then_with(|| b.normalized_pattern.len().cmp(&a.normalized_pattern.len()))
    });
    matching.into_iter().next()
}

/// True iff at least one rule matches. Used for partitioning without paying
/// the sort in find_best_rule.
pub fn has_match(description: &str, rules: &[CategoryRule]) -> bool {
    let normalized = normalize(description);
    rules.iter().any(|rule| matches_pattern(&normalized, rule))
}

fn matches_pattern(normalized_description: &str, rule: &CategoryRule) -> bool {
    !rule.normalized_pattern.is_empty()
        && normalized_description.contains(&rule.normalized_pattern)
}
