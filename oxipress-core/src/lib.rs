//! # OxiPress Core
//!
//! Shared building blocks for the OxiPress codecs:
//!
//! - [`bitstream`]: MSB-first bit writer/reader with padding tracking
//! - [`container`]: the fixed container header, varints and a checked byte cursor
//! - [`crc`]: CRC-32 integrity checksum
//! - [`frequency`]: byte frequency tables and entropy
//! - [`traits`]: the [`Codec`] trait every algorithm implements
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Engine: algorithm dispatch, analysis, reports, CLI      │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codecs: Huffman, RLE, LZ77                              │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate): bits, container, CRC, frequencies    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipress_core::bitstream::{BitReader, BitWriter};
//! use oxipress_core::crc::Crc32;
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3);
//! let buffer = writer.finish();
//! assert_eq!(buffer.padding_bits, 5);
//!
//! let mut reader = BitReader::with_padding(&buffer.bytes, buffer.padding_bits).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//!
//! assert_eq!(Crc32::compute(b"Hello, World!"), 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod container;
pub mod crc;
pub mod error;
pub mod frequency;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitBuffer, BitReader, BitWriter};
pub use container::{ByteReader, ContainerHeader, HEADER_SIZE};
pub use crc::Crc32;
pub use error::{OxiPressError, Result};
pub use frequency::FrequencyTable;
pub use traits::{Codec, Decoded, Encoded};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitBuffer, BitReader, BitWriter};
    pub use crate::container::{ByteReader, ContainerHeader};
    pub use crate::error::{OxiPressError, Result};
    pub use crate::frequency::FrequencyTable;
    pub use crate::traits::{Codec, Decoded, Encoded};
}
