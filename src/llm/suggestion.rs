use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::LlmError;
use crate::llm::client::OpenAiClient;
use crate::models::{CatalogOutline, CategorySuggestion, SuggestionBatchItem};
use crate::service::SuggestionService;

const SYSTEM_PROMPT: &str = r#"Você é um classificador de gastos. Receberá um catálogo de categorias de despesa (com suas subcategorias) e um lote de transações de cartão de crédito.
Para cada transação, escolha a categoria e, se possível, a subcategoria mais adequadas, usando exatamente os nomes do catálogo. Se nenhuma servir, use null.

Responda somente com um objeto JSON neste formato:
{
  "suggestions": [
    {"index": 0, "category_name": "nome da categoria ou null", "subcategory_name": "nome da subcategoria ou null"}
  ]
}
Inclua uma entrada para cada transação, com o mesmo "index" recebido."#;

#[derive(Deserialize)]
struct SuggestionEnvelope {
    #[serde(default)]
    suggestions: Vec<CategorySuggestion>,
}

#[async_trait]
impl SuggestionService for OpenAiClient {
    async fn suggest(
        &self,
        batch: &[SuggestionBatchItem],
        catalog: &CatalogOutline,
    ) -> Result<Vec<CategorySuggestion>, LlmError> {
        let user = serde_json::to_string_pretty(&json!({
            "catalog": catalog,
            "transactions": batch,
        }))?;
        let completion = self.chat_json(SYSTEM_PROMPT, &user).await?;
        let envelope: SuggestionEnvelope = serde_json::from_str(&completion)?;
        Ok(envelope.suggestions)
    }
}
