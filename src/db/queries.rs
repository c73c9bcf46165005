use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Category, CategoryRule, Subcategory};

/// Rules the user has created, one snapshot per categorization pass.
pub async fn get_user_rules(pool: &PgPool, user_id: Uuid) -> Result<Vec<CategoryRule>, sqlx::Error> {
    sqlx::query_as::<_, CategoryRule>(
        r#"
        SELECT normalized_pattern,
               category_template_id,
               subcategory_template_id,
               coalesce(confirmed_count, 0) as confirmed_count,
               coalesce(usage_count, 0) as usage_count
        FROM transaction_category_rules
        WHERE created_by = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Full category catalog (both expense and income templates).
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, type
        FROM expense_category_template
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Full subcategory catalog.
pub async fn list_subcategories(pool: &PgPool) -> Result<Vec<Subcategory>, sqlx::Error> {
    sqlx::query_as::<_, Subcategory>(
        r#"
        SELECT id, name, category_template_id
        FROM expense_subcategory_template
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
}
