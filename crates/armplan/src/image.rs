//! Normalization of caller-supplied image payloads.

use crate::error::{PlanError, PlanResult};

const DEFAULT_MIME: &str = "image/png";

/// A base64-encoded image ready to inline into a planner request.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    /// Declared MIME type, forwarded to the planner as-is.
    pub mime_type: String,
    /// Raw base64 payload, without any data-URL prefix.
    pub data: String,
}

impl EncodedImage {
    /// Normalize a caller-supplied payload.
    ///
    /// If the payload carries a `data:<mime>;base64,` prefix it is stripped
    /// and the declared MIME type kept; a bare payload is assumed to be PNG.
    /// Stripping the prefix is the only transformation performed — the
    /// base64 body itself is never decoded or re-encoded here.
    pub fn from_payload(payload: &str) -> PlanResult<Self> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(PlanError::Input("image payload is empty".to_string()));
        }

        if let Some(rest) = payload.strip_prefix("data:") {
            let (header, data) = rest.split_once(',').ok_or_else(|| {
                PlanError::Input("malformed data URL: missing ',' separator".to_string())
            })?;
            let mime_type = header.strip_suffix(";base64").unwrap_or(header);
            let mime_type = if mime_type.is_empty() {
                DEFAULT_MIME
            } else {
                mime_type
            };
            if data.is_empty() {
                return Err(PlanError::Input("data URL carries no payload".to_string()));
            }
            return Ok(Self {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            });
        }

        Ok(Self {
            mime_type: DEFAULT_MIME.to_string(),
            data: payload.to_string(),
        })
    }
}
