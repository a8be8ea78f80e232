use anyhow::{anyhow, Result};
use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;

/// Decodes a JSON request body. Rejections come back as errors so handlers
/// can answer with the usual `{"error", "kind"}` body instead of axum's
/// plain-text extractor responses.
pub fn parse_json<T: DeserializeOwned>(headers: &HeaderMap, body: &[u8]) -> Result<T> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        let content_type = content_type.to_str().unwrap_or("");
        if !content_type.trim().to_lowercase().starts_with("application/json") {
            return Err(anyhow!("unsupported content type '{}'", content_type));
        }
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(anyhow!("request body is empty"));
    }
    Ok(serde_json::from_slice(body)?)
}
