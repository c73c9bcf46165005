use thiserror::Error;

/// Failure of an outbound LLM call. Recoverable or not depending on which
/// call it was: extraction failures abort the request, suggestion failures
/// are caught by the coordinator and degrade to defaults.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("llm api returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("llm completion was not valid json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("llm returned an empty completion")]
    EmptyCompletion,
}

/// Request-fatal failures of the extraction pipeline.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read pdf: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    /// The document yielded too little text to process (likely a scan).
    #[error("document text is unreadable")]
    UnreadableDocument,

    #[error("statement extraction failed: {0}")]
    Extraction(#[from] LlmError),

    #[error("catalog store query failed: {0}")]
    Catalog(#[from] sqlx::Error),
}
