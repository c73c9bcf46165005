use axum::{
    extract::{Json, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ExtractError;
use crate::llm::{extraction, OpenAiClient};
use crate::models::CategorizedTransaction;
use crate::pdf;
use crate::service::CategorizerService;

/// Shared state: the extraction client and the categorization service.
pub struct AppState {
    pub llm: OpenAiClient,
    pub categorizer: CategorizerService,
}

/// Error body in the `{"detail": ...}` shape external integrations expect.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }

    fn unprocessable(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, detail: detail.into() }
    }

    fn internal(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, detail: detail.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnreadableDocument => ApiError::unprocessable(
                "Não foi possível ler texto do PDF. Ele pode ser uma imagem (scaneada).",
            ),
            other => {
                tracing::error!("extraction pipeline failed: {other}");
                ApiError::internal(format!("Erro no processamento: {other}"))
            }
        }
    }
}

/// Health check
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

/// Multipart upload: `file` (the PDF) and `user_uuid` (text field).
pub async fn extract(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Vec<CategorizedTransaction>>, ApiError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut user_uuid: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("multipart inválido: {e}")))?
    {
        match field.name() {
            Some("file") => {
                if field.content_type() != Some("application/pdf") {
                    return Err(ApiError::bad_request("O arquivo deve ser um PDF."));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("falha ao ler o arquivo: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            Some("user_uuid") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("user_uuid inválido: {e}")))?;
                user_uuid = Some(text);
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::bad_request("Campo 'file' ausente."))?;
    let user_id = parse_user_uuid(user_uuid.as_deref())?;
    run_pipeline(&state, &bytes, user_id).await
}

#[derive(Debug, Deserialize)]
pub struct ExtractBase64Request {
    pub user_uuid: String,
    pub pdf_base64: String,
}

/// JSON alternative for integrations that cannot send multipart. Accepts the
/// raw base64 or a full data URL.
pub async fn extract_base64(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractBase64Request>,
) -> Result<Json<Vec<CategorizedTransaction>>, ApiError> {
    let encoded = strip_data_url(req.pdf_base64.trim());
    let bytes = BASE64
        .decode(encoded)
        .map_err(|_| ApiError::bad_request("pdf_base64 inválido."))?;

    if !pdf::is_pdf(&bytes) {
        return Err(ApiError::bad_request(
            "O conteúdo enviado não parece ser um PDF válido.",
        ));
    }

    let user_id = parse_user_uuid(Some(&req.user_uuid))?;
    run_pipeline(&state, &bytes, user_id).await
}

/// Shared pipeline: text extraction, LLM structuring, categorization.
async fn run_pipeline(
    state: &AppState,
    bytes: &[u8],
    user_id: Uuid,
) -> Result<Json<Vec<CategorizedTransaction>>, ApiError> {
    let text = pdf::extract_text(bytes)?;
    let statement = extraction::extract_statement(&state.llm, &text)
        .await
        .map_err(ExtractError::from)?;
    tracing::info!(
        bank = statement.bank_name.as_deref().unwrap_or("?"),
        transactions = statement.transactions.len(),
        "statement extracted"
    );

    let categorized = state.categorizer.categorize(&statement.transactions, user_id).await?;
    Ok(Json(categorized))
}

fn parse_user_uuid(raw: Option<&str>) -> Result<Uuid, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::bad_request("Campo 'user_uuid' ausente."))?;
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::bad_request("user_uuid inválido."))
}

/// `data:application/pdf;base64,<payload>` -> `<payload>`.
fn strip_data_url(encoded: &str) -> &str {
    let has_scheme = encoded
        .as_bytes()
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"data:"));
    if has_scheme {
        if let Some((_, payload)) = encoded.split_once(',') {
            return payload.trim();
        }
    }
    encoded
}
