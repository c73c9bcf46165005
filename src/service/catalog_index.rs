use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{CatalogOutline, Category, CategoryOutline, Subcategory};

/// Fallback category name/type, and its fallback subcategory name.
pub const DEFAULT_CATEGORY_NAME: &str = "Outros";
pub const DEFAULT_CATEGORY_KIND: &str = "expense";
pub const DEFAULT_SUBCATEGORY_NAME: &str = "sem categoria";

/// Lookup structures over one catalog snapshot.
///
/// Built once per categorization pass; all lookups are O(1) afterwards.
/// The catalog is assumed externally deduplicated; on duplicate ids or
/// duplicate lowercased names the last row wins.
#[derive(Debug)]
pub struct CatalogIndex {
    category_by_id: HashMap<Uuid, Category>,
    subcategory_by_id: HashMap<Uuid, Subcategory>,
    category_id_by_name: HashMap<String, Uuid>,
    subcategory_id_by_name: HashMap<String, Uuid>,
    subcategories_by_category: HashMap<Uuid, Vec<Uuid>>,
    default_category_id: Option<Uuid>,
    default_subcategory_id: Option<Uuid>,
    // preserves catalog order for the outline sent to the suggestion service
    category_order: Vec<Uuid>,
}

impl CatalogIndex {
    pub fn build(categories: Vec<Category>, subcategories: Vec<Subcategory>) -> Self {
        let default_category_id = categories
            .iter()
            .find(|c| c.name == DEFAULT_CATEGORY_NAME && c.kind == DEFAULT_CATEGORY_KIND)
            .map(|c| c.id);
        let default_subcategory_id = default_category_id.and_then(|cat_id| {
            subcategories
                .iter()
                .find(|s| s.name == DEFAULT_SUBCATEGORY_NAME && s.category_template_id == cat_id)
                .map(|s| s.id)
        });

        let category_order: Vec<Uuid> = categories.iter().map(|c| c.id).collect();

        let mut category_by_id = HashMap::with_capacity(categories.len());
        let mut category_id_by_name = HashMap::with_capacity(categories.len());
        for category in categories {
            category_id_by_name.insert(category.name.to_lowercase(), category.id);
            category_by_id.insert(category.id, category);
        }

        let mut subcategory_by_id = HashMap::with_capacity(subcategories.len());
        let mut subcategory_id_by_name = HashMap::with_capacity(subcategories.len());
        let mut subcategories_by_category: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for subcategory in subcategories {
            subcategory_id_by_name.insert(subcategory.name.to_lowercase(), subcategory.id);
            subcategories_by_category
                .entry(subcategory.category_template_id)
                .or_default()
                .push(subcategory.id);
            subcategory_by_id.insert(subcategory.id, subcategory);
        }

        Self {
            category_by_id,
            subcategory_by_id,
            category_id_by_name,
            subcategory_id_by_name,
            subcategories_by_category,
            default_category_id,
            default_subcategory_id,
            category_order,
        }
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.category_by_id.get(&id)
    }

    pub fn subcategory(&self, id: Uuid) -> Option<&Subcategory> {
        self.subcategory_by_id.get(&id)
    }

    /// Case-insensitive category lookup by name.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.category_id_by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.category_by_id.get(id))
    }

    /// Case-insensitive subcategory lookup by name. Callers still have to
    /// check which category the returned row belongs to.
    pub fn subcategory_by_name(&self, name: &str) -> Option<&Subcategory> {
        self.subcategory_id_by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.subcategory_by_id.get(id))
    }

    pub fn default_category(&self) -> Option<&Category> {
        self.default_category_id.and_then(|id| self.category_by_id.get(&id))
    }

    pub fn default_subcategory(&self) -> Option<&Subcategory> {
        self.default_subcategory_id
            .and_then(|id| self.subcategory_by_id.get(&id))
    }

    pub fn subcategories_of(&self, category_id: Uuid) -> Vec<&Subcategory> {
        self.subcategories_by_category
            .get(&category_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.subcategory_by_id.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Expense-type categories with their subcategory names, in catalog
    /// order. This is the catalog view the suggestion service receives.
    pub fn expense_outline(&self) -> CatalogOutline {
        let categories = self
            .category_order
            .iter()
            .filter_map(|id| self.category_by_id.get(id))
            .filter(|c| c.kind == DEFAULT_CATEGORY_KIND)
            .map(|c| CategoryOutline {
                name: c.name.clone(),
                subcategories: self
                    .subcategories_of(c.id)
                    .iter()
                    .map(|s| s.name.clone())
                    .collect(),
            })
            .collect();
        CatalogOutline { categories }
    }
}
