pub mod catalog_index;
pub mod categorizer;
pub mod normalize;
pub mod rule_matcher;
pub mod suggestions;

pub use catalog_index::CatalogIndex;
pub use categorizer::CategorizerService;
pub use suggestions::SuggestionService;
