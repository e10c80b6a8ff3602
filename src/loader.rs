//! Turns uploaded bytes into text.
//!
//! Plain text is read as UTF-8 first and as ISO-8859-1 when that fails.
//! Bytes that are neither valid UTF-8 nor control-free ISO-8859-1 are binary.
//! PDF files are recognised but not extracted.

use serde::{Deserialize, Serialize};

use crate::{
    document::Document,
    error::{MatchError, Result},
};

const PDF_MAGIC: &[u8] = b"%PDF-";
const UTF8_BOM: &str = "\u{feff}";

/// Bytes of a file that has not been decoded yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    pub bytes: Vec<u8>,
    /// MIME type reported by the uploader, if any.
    pub media_type: Option<String>,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { id: id.into(), bytes: bytes.into(), media_type: None }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type.as_deref().is_some_and(|m| m.eq_ignore_ascii_case("application/pdf"))
            || self.id.to_ascii_lowercase().ends_with(".pdf")
            || self.bytes.starts_with(PDF_MAGIC)
    }

    pub fn decode(&self) -> Result<Document> {
        if self.is_pdf() {
            return Err(MatchError::decode_failure(&self.id, "PDF text extraction is not supported"));
        }
        let text = decode_plain(&self.bytes).map_err(|reason| MatchError::decode_failure(&self.id, reason))?;
        Ok(Document::new(self.id.clone(), text))
    }
}

/// Decode `raw_bytes`; `filename_or_mime` decides whether it is a PDF and
/// names the document in errors.
pub fn decode_text(raw_bytes: &[u8], filename_or_mime: &str) -> Result<String> {
    let raw = RawDocument {
        id: filename_or_mime.to_string(),
        bytes: raw_bytes.to_vec(),
        media_type: filename_or_mime.contains('/').then(|| filename_or_mime.to_string()),
    };
    raw.decode().map(|doc| doc.text().to_string())
}

fn decode_plain(bytes: &[u8]) -> std::result::Result<String, &'static str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string());
    }
    // every byte is a valid ISO-8859-1 code point, so only control bytes tell binary apart
    let text: String = bytes.iter().map(|&b| b as char).collect();
    if text.chars().any(is_binary_char) {
        return Err("binary content");
    }
    Ok(text)
}

/// C0 controls other than tab, line feed, form feed and carriage return, plus DEL.
#[inline]
fn is_binary_char(c: char) -> bool {
    (c < ' ' && !matches!(c, '\t' | '\n' | '\x0c' | '\r')) || c == '\x7f'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_is_read_as_is() {
        assert_eq!(decode_text("Ceci est un texte.".as_bytes(), "cv.txt").unwrap(), "Ceci est un texte.");
        assert_eq!(decode_text("\u{feff}Données".as_bytes(), "cv.txt").unwrap(), "Données");
    }

    #[test]
    fn utf8_control_characters_are_kept() {
        let text = decode_text("Ingénieur Rust\u{0b}expérience\u{1b}Kafka".as_bytes(), "cv.txt").unwrap();
        assert_eq!(text, "Ingénieur Rust\u{0b}expérience\u{1b}Kafka");
    }

    #[test]
    fn latin1_fallback() {
        let text = decode_text(b"Texte encod\xe9.", "text/plain").unwrap();
        assert_eq!(text, "Texte encodé.");
    }

    #[test]
    fn binary_bytes_are_rejected() {
        let err = decode_text(b"\x00\x01\x02garbage\xff", "blob.txt").unwrap_err();
        assert_eq!(err, MatchError::decode_failure("blob.txt", "binary content"));
    }

    #[test]
    fn pdf_detected_by_name_type_or_magic() {
        assert!(RawDocument::new("cv.PDF", b"x".to_vec()).is_pdf());
        assert!(RawDocument::new("cv", b"x".to_vec()).with_media_type("application/pdf").is_pdf());
        assert!(RawDocument::new("cv", b"%PDF-1.4 ...".to_vec()).is_pdf());
        assert!(!RawDocument::new("cv.txt", b"plain".to_vec()).is_pdf());

        let err = RawDocument::new("cv.pdf", b"%PDF-1.4".to_vec()).decode().unwrap_err();
        assert!(matches!(err, MatchError::DecodeFailure { ref id, .. } if id == "cv.pdf"));
    }

    #[test]
    fn decode_keeps_identifier() {
        let doc = RawDocument::new("a.txt", "hello world").decode().unwrap();
        assert_eq!(doc.id(), "a.txt");
        assert_eq!(doc.text(), "hello world");
    }
}
