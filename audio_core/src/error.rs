use thiserror::Error;

/// Failures while turning a base64 payload into normalized samples.
///
/// Decoding either fully succeeds or returns one of these; no partial
/// buffer is ever handed back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("audio payload is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("PCM stream of {byte_len} bytes does not divide into {frame_size}-byte frames")]
    TruncatedFrame { byte_len: usize, frame_size: usize },
}
