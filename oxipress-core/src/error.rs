//! Error types for OxiPress operations.
//!
//! One error enum covers every codec. Decoders report malformed payloads as
//! [`OxiPressError::CorruptedStream`] with the byte offset where decoding gave
//! up, while container-level problems (bad magic, truncated header) surface
//! as [`OxiPressError::InvalidInput`].

use std::io;
use thiserror::Error;

/// The main error type for OxiPress operations.
#[derive(Debug, Error)]
pub enum OxiPressError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input could not be interpreted as a compressed container.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    /// Algorithm tag not recognised.
    #[error("Unsupported algorithm: {tag}")]
    UnsupportedAlgorithm {
        /// The tag that was supplied.
        tag: String,
    },

    /// Payload is malformed.
    #[error("Corrupted stream at offset {offset}: {message}")]
    CorruptedStream {
        /// Byte offset (within the payload) where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Decoded length differs from the length recorded in the container.
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Length recorded at compression time.
        expected: u64,
        /// Length actually produced.
        actual: u64,
    },

    /// CRC-32 of the decoded bytes differs from the stored checksum.
    #[error("Checksum mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// Checksum stored in the container.
        expected: u32,
        /// Checksum of the decoded data.
        computed: u32,
    },

    /// Codec parameters out of range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the offending parameter.
        message: String,
    },
}

/// Result type alias for OxiPress operations.
pub type Result<T> = std::result::Result<T, OxiPressError>;

impl OxiPressError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an unsupported algorithm error.
    pub fn unsupported_algorithm(tag: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm { tag: tag.into() }
    }

    /// Create a corrupted stream error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedStream {
            offset,
            message: message.into(),
        }
    }

    /// Create a size mismatch error.
    pub fn size_mismatch(expected: u64, actual: u64) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Create a checksum mismatch error.
    pub fn checksum_mismatch(expected: u32, computed: u32) -> Self {
        Self::ChecksumMismatch { expected, computed }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether the error describes damaged compressed data rather than a
    /// caller mistake.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::CorruptedStream { .. } | Self::SizeMismatch { .. } | Self::ChecksumMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiPressError::corrupted(12, "code walks off the tree");
        assert_eq!(
            err.to_string(),
            "Corrupted stream at offset 12: code walks off the tree"
        );

        let err = OxiPressError::checksum_mismatch(0x12345678, 0xDEADBEEF);
        assert!(err.to_string().contains("0x12345678"));

        let err = OxiPressError::unsupported_algorithm("brotli");
        assert!(err.to_string().contains("brotli"));

        let err = OxiPressError::size_mismatch(10, 9);
        assert!(err.to_string().contains("expected 10"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: OxiPressError = io_err.into();
        assert!(matches!(err, OxiPressError::Io(_)));
        assert!(!err.is_corruption());
    }

    #[test]
    fn test_is_corruption() {
        assert!(OxiPressError::corrupted(0, "x").is_corruption());
        assert!(OxiPressError::size_mismatch(1, 2).is_corruption());
        assert!(!OxiPressError::invalid_config("window").is_corruption());
    }
}
