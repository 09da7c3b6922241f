//! The codec abstraction implemented by every compression algorithm.

use crate::container::{ContainerHeader, HEADER_SIZE};
use crate::error::Result;

/// Output of a successful encode.
#[derive(Debug, Clone)]
pub struct Encoded<S> {
    /// Complete container: header, codec parameters and payload.
    pub container: Vec<u8>,
    /// Size of the encoded payload alone (no header, no parameters).
    pub payload_len: usize,
    /// Codec-specific statistics.
    pub stats: S,
}

impl<S> Encoded<S> {
    /// Size of the whole container in bytes.
    pub fn container_len(&self) -> usize {
        self.container.len()
    }

    /// Bytes spent on the header and codec parameters.
    pub fn overhead(&self) -> usize {
        self.container.len() - self.payload_len
    }
}

/// Output of a successful decode.
#[derive(Debug, Clone)]
pub struct Decoded<S> {
    /// Reconstructed bytes.
    pub data: Vec<u8>,
    /// Header read from the container.
    pub header: ContainerHeader,
    /// Codec-specific statistics.
    pub stats: S,
}

/// A lossless whole-buffer codec with its own container magic.
///
/// Implementations must satisfy `decode(encode(x).container).data == x` for
/// every input, including the empty one.
pub trait Codec {
    /// Statistics gathered while encoding.
    type EncodeStats;
    /// Statistics gathered while decoding.
    type DecodeStats;

    /// Container magic identifying this codec.
    const MAGIC: [u8; 4];

    /// Short human-readable name.
    fn name(&self) -> &'static str;

    /// Compress `data` into a container.
    fn encode(&self, data: &[u8]) -> Result<Encoded<Self::EncodeStats>>;

    /// Decompress a container produced by [`Codec::encode`].
    fn decode(&self, container: &[u8]) -> Result<Decoded<Self::DecodeStats>>;

    /// Read and check the header of `container`, returning it with the
    /// remaining bytes.
    fn split_header<'a>(&self, container: &'a [u8]) -> Result<(ContainerHeader, &'a [u8])> {
        let header = ContainerHeader::parse_expecting(container, Self::MAGIC)?;
        Ok((header, &container[HEADER_SIZE..]))
    }

    /// Encode then decode `data`, reporting whether the bytes survived.
    fn roundtrip(&self, data: &[u8]) -> Result<bool> {
        let encoded = self.encode(data)?;
        let decoded = self.decode(&encoded.container)?;
        Ok(decoded.data == data)
    }
}
