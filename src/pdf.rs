use crate::error::ExtractError;

/// Below this many characters of text the document is treated as unreadable
/// (most likely a scanned image).
pub const MIN_TEXT_LEN: usize = 50;

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

/// PDF bytes to one text string. Errors on unreadable text short of
/// MIN_TEXT_LEN so callers can answer "this looks like a scan".
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(bytes)?;
    if text.len() < MIN_TEXT_LEN {
        return Err(ExtractError::UnreadableDocument);
    }
    Ok(text)
}
