use base64::{engine::general_purpose, Engine as _};

use crate::error::DecodeError;

/// Decoded, normalized audio: one `f32` sequence per channel at a fixed
/// sample rate, every value in [-1.0, 1.0] and every channel the same
/// length.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl SampleBuffer {
    /// Build a buffer from per-channel sample data.
    ///
    /// Preconditions (asserted): `sample_rate > 0`, at least one channel,
    /// all channels the same length.
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        assert!(sample_rate > 0, "sample rate must be positive");
        assert!(!channels.is_empty(), "buffer needs at least one channel");
        let frames = channels[0].len();
        assert!(
            channels.iter().all(|c| c.len() == frames),
            "all channels must hold the same number of samples"
        );
        Self { sample_rate, channels }
    }

    /// Mono convenience constructor.
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self::from_channels(sample_rate, vec![samples])
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn duration_ms(&self) -> u64 {
        (self.frames() as f64 / self.sample_rate as f64 * 1000.0) as u64
    }
}

/// Decode a base64 payload into raw bytes (STANDARD alphabet, padded).
pub fn decode_base64(input: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(general_purpose::STANDARD.decode(input)?)
}

/// Interpret raw bytes as interleaved signed 16-bit little-endian PCM and
/// normalize into per-channel floats.
///
/// Negative samples divide by 32768, non-negative by 32767. The asymmetry
/// matches the encoder's quantization exactly, so decode(encode(x))
/// reproduces x to within one quantization step. Do not unify the divisors.
///
/// `channel_count` must be positive (asserted); `sample_rate` is recorded
/// as given.
pub fn decode_pcm(
    bytes: &[u8],
    sample_rate: u32,
    channel_count: usize,
) -> Result<SampleBuffer, DecodeError> {
    assert!(channel_count > 0, "channel count must be positive");

    let frame_size = 2 * channel_count;
    if bytes.len() % frame_size != 0 {
        return Err(DecodeError::TruncatedFrame {
            byte_len: bytes.len(),
            frame_size,
        });
    }

    let frames = bytes.len() / frame_size;
    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for (i, pair) in bytes.chunks_exact(2).enumerate() {
        let s = i16::from_le_bytes([pair[0], pair[1]]);
        let v = if s < 0 {
            s as f32 / 32768.0
        } else {
            s as f32 / 32767.0
        };
        channels[i % channel_count].push(v);
    }

    Ok(SampleBuffer::from_channels(sample_rate, channels))
}

/// Decode a base64 string straight into a normalized sample buffer.
pub fn decode_base64_pcm(
    input: &str,
    sample_rate: u32,
    channel_count: usize,
) -> Result<SampleBuffer, DecodeError> {
    let bytes = decode_base64(input)?;
    decode_pcm(&bytes, sample_rate, channel_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_mono_samples() {
        // int16 LE values 0 and 32767
        let bytes = [0x00, 0x00, 0xFF, 0x7F];
        let buf = decode_pcm(&bytes, 24_000, 1).unwrap();
        assert_eq!(buf.sample_rate(), 24_000);
        assert_eq!(buf.channel_count(), 1);
        assert_eq!(buf.channel(0), &[0.0, 1.0]);
    }

    #[test]
    fn decodes_negative_full_scale() {
        // int16 LE -32768
        let bytes = [0x00, 0x80];
        let buf = decode_pcm(&bytes, 24_000, 1).unwrap();
        assert_eq!(buf.channel(0), &[-1.0]);
    }

    #[test]
    fn deinterleaves_stereo() {
        // frames: (1, -1), (16384, -16384)
        let mut bytes = Vec::new();
        for s in [1i16, -1, 16384, -16384] {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        let buf = decode_pcm(&bytes, 48_000, 2).unwrap();
        assert_eq!(buf.channel_count(), 2);
        assert_eq!(buf.frames(), 2);
        assert_eq!(buf.channel(0), &[1.0 / 32767.0, 16384.0 / 32767.0]);
        assert_eq!(buf.channel(1), &[-1.0 / 32768.0, -0.5]);
    }

    #[test]
    fn rejects_truncated_frames() {
        for n in 0..4usize {
            for channel_count in 1..=3usize {
                let frame_size = 2 * channel_count;
                let bytes = vec![0u8; frame_size * n + 1];
                let err = decode_pcm(&bytes, 24_000, channel_count).unwrap_err();
                assert_eq!(
                    err,
                    DecodeError::TruncatedFrame {
                        byte_len: bytes.len(),
                        frame_size,
                    }
                );
            }
        }
    }

    #[test]
    fn empty_input_decodes_to_empty_buffer() {
        let buf = decode_pcm(&[], 24_000, 1).unwrap();
        assert_eq!(buf.frames(), 0);
        assert_eq!(buf.duration_ms(), 0);
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = decode_base64("not valid base64!!").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding(_)));
    }

    #[test]
    fn base64_roundtrip_to_samples() {
        use base64::{engine::general_purpose, Engine as _};
        let payload = general_purpose::STANDARD.encode([0x00, 0x00, 0xFF, 0x7F]);
        let buf = decode_base64_pcm(&payload, 24_000, 1).unwrap();
        assert_eq!(buf.channel(0), &[0.0, 1.0]);
    }

    #[test]
    fn duration_reflects_sample_rate() {
        let buf = SampleBuffer::mono(24_000, vec![0.0; 24_000]);
        assert_eq!(buf.duration_ms(), 1000);
        let buf = SampleBuffer::mono(24_000, vec![0.0; 12_000]);
        assert_eq!(buf.duration_ms(), 500);
    }

    #[test]
    #[should_panic(expected = "same number of samples")]
    fn uneven_channels_are_rejected() {
        SampleBuffer::from_channels(24_000, vec![vec![0.0, 0.0], vec![0.0]]);
    }
}
