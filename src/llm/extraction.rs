use crate::error::LlmError;
use crate::llm::client::OpenAiClient;
use crate::models::StatementExtraction;

/// Prompt carried over from the original extractor, plus the JSON contract
/// the json_object response mode needs spelled out.
const SYSTEM_PROMPT: &str = r#"Você é um especialista financeiro. Sua tarefa é analisar o texto cru de uma fatura de cartão de crédito.
1. Extraia todas as transações de compra, pagamentos e estornos.
2. Ignore cabeçalhos repetitivos, juros de parcelamento futuro (apenas a parcela atual conta) e textos promocionais.
3. Normalize datas para YYYY-MM-DD.
4. Converta valores para número (ex: 1.250,00 vira 1250.00). Use positivo para gastos e negativo para pagamentos/estornos.

Responda somente com um objeto JSON neste formato:
{
  "bank_name": "nome do banco emissor ou null",
  "due_date": "YYYY-MM-DD ou null",
  "statement_total": 0.0,
  "transactions": [
    {"date": "YYYY-MM-DD", "description": "estabelecimento", "amount": 0.0, "currency": "BRL"}
  ]
}"#;

/// Statement text in, structured statement out. Failure here is fatal for
/// the request: without transactions there is nothing to categorize.
pub async fn extract_statement(
    client: &OpenAiClient,
    statement_text: &str,
) -> Result<StatementExtraction, LlmError> {
    let user = format!("Analise esta fatura:\n\n{statement_text}");
    let completion = client.chat_json(SYSTEM_PROMPT, &user).await?;
    let extraction: StatementExtraction = serde_json::from_str(&completion)?;
    Ok(extraction)
}
