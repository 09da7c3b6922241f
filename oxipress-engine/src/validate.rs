//! Integrity validation of decoded data.

use oxipress_core::container::ContainerHeader;
use oxipress_core::error::OxiPressError;
use serde::Serialize;

/// Outcome of an integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntegrityCheck {
    /// Size and checksum agree.
    Passed,
    /// Decoding failed or the data does not match.
    Failed,
}

impl IntegrityCheck {
    /// `"Passed"` or `"Failed"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }
}

/// Validation section of a decompression report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// Whether the output can be trusted.
    pub success: bool,
    /// Summary of the check.
    pub integrity_check: IntegrityCheck,
    /// What went wrong, on failure.
    pub error_message: Option<String>,
}

impl Validation {
    /// A passing result.
    pub fn passed() -> Self {
        Self {
            success: true,
            integrity_check: IntegrityCheck::Passed,
            error_message: None,
        }
    }

    /// A failing result with an explanation.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            integrity_check: IntegrityCheck::Failed,
            error_message: Some(message.into()),
        }
    }

    /// A failing result describing `err`.
    pub fn from_error(err: &OxiPressError) -> Self {
        Self::failed(err.to_string())
    }
}

/// Check decoded bytes against the size and CRC-32 recorded in `header`.
pub fn validate(header: &ContainerHeader, decoded: &[u8]) -> Validation {
    match header.verify(decoded) {
        Ok(()) => Validation::passed(),
        Err(e) => Validation::from_error(&e),
    }
}

/// Compare decoded bytes with the original, byte for byte.
pub fn verify_roundtrip(original: &[u8], decoded: &[u8]) -> Validation {
    if original.len() != decoded.len() {
        return Validation::failed(format!(
            "length mismatch: original {} bytes, decoded {} bytes",
            original.len(),
            decoded.len()
        ));
    }
    match original.iter().zip(decoded).position(|(a, b)| a != b) {
        Some(offset) => Validation::failed(format!("bytes differ at offset {}", offset)),
        None => Validation::passed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_header() {
        let data = b"integrity";
        let header = ContainerHeader::describe(*b"OXR1", data);
        assert_eq!(validate(&header, data), Validation::passed());

        let short = validate(&header, b"integrit");
        assert!(!short.success);
        assert!(short.error_message.unwrap().contains("Size mismatch"));

        let flipped = validate(&header, b"integritY");
        assert_eq!(flipped.integrity_check, IntegrityCheck::Failed);
        assert!(flipped.error_message.unwrap().contains("Checksum mismatch"));
    }

    #[test]
    fn test_verify_roundtrip() {
        assert!(verify_roundtrip(b"abc", b"abc").success);
        assert!(verify_roundtrip(b"", b"").success);
        assert_eq!(
            verify_roundtrip(b"abc", b"abd").error_message.as_deref(),
            Some("bytes differ at offset 2")
        );
        assert!(!verify_roundtrip(b"abc", b"ab").success);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Validation::passed()).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["integrity_check"], "Passed");
        assert!(json["error_message"].is_null());
    }
}
