//! Inline image payloads.
//!
//! Receipts and payment proof travel inside the expense document as
//! `data:<mime>;base64,<payload>` strings rather than as separate uploads.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::error::ExpenseError;

/// Encoded image embedded in an expense record. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Wraps an already encoded payload.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Validation` if the payload is blank.
    pub fn new(encoded: impl Into<String>) -> Result<Self, ExpenseError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(ExpenseError::validation("image payload is empty"));
        }
        Ok(Self(encoded))
    }

    /// Encodes raw image bytes as a data URI.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Validation` if `bytes` is empty or `mime_type`
    /// is not an image type.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Result<Self, ExpenseError> {
        if bytes.is_empty() {
            return Err(ExpenseError::validation("image file is empty"));
        }
        if !mime_type.starts_with("image/") {
            return Err(ExpenseError::validation(format!(
                "'{mime_type}' is not an image type"
            )));
        }
        Ok(Self(format!(
            "data:{mime_type};base64,{}",
            STANDARD.encode(bytes)
        )))
    }

    /// Guesses the MIME type from a file extension, defaulting to JPEG.
    #[must_use]
    pub fn mime_type_for_extension(extension: Option<&str>) -> &'static str {
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("heic") => "image/heic",
            _ => "image/jpeg",
        }
    }

    /// MIME type declared by a data URI payload, if any.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let (mime, _) = rest.split_once(';')?;
        Some(mime)
    }

    /// Decodes a base64 data URI back into raw bytes.
    ///
    /// Returns `None` for payloads that are not base64 data URIs.
    #[must_use]
    pub fn decode(&self) -> Option<Vec<u8>> {
        let (_, data) = self.0.split_once(";base64,")?;
        STANDARD.decode(data).ok()
    }

    /// Encoded length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True only for an empty payload, which construction rules out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The encoded payload.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImagePayload {
    type Error = ExpenseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImagePayload> for String {
    fn from(payload: ImagePayload) -> Self {
        payload.0
    }
}
