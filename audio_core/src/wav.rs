use base64::{engine::general_purpose, Engine as _};

use crate::pcm::SampleBuffer;

/// Sequential little-endian field writer for the RIFF container.
///
/// Replaces the usual pair of captured-cursor helper closures with an
/// explicit struct advanced by each write.
struct RiffWriter {
    out: Vec<u8>,
}

impl RiffWriter {
    fn with_capacity(len: usize) -> Self {
        Self {
            out: Vec::with_capacity(len),
        }
    }

    fn tag(&mut self, tag: &[u8; 4]) {
        self.out.extend_from_slice(tag);
    }

    fn u16(&mut self, v: u16) {
        self.out.extend_from_slice(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.out.extend_from_slice(&v.to_le_bytes());
    }

    fn i16(&mut self, v: i16) {
        self.out.extend_from_slice(&v.to_le_bytes());
    }
}

/// Clamp to [-1, 1] and quantize to i16.
///
/// Negative values scale by 32768, non-negative by 32767, mirroring the
/// decoder's divisors so a decode/encode round trip is bit-stable.
fn quantize(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    let scaled = if s < 0.0 { s * 32768.0 } else { s * 32767.0 };
    scaled.round() as i16
}

/// Encode a sample buffer as a 16-bit PCM RIFF/WAVE file.
///
/// Output is a 44-byte header followed by interleaved little-endian i16
/// frames. An empty buffer yields a header-only file with a zero-length
/// data chunk, which every standard WAV reader accepts.
pub fn encode_wav(buffer: &SampleBuffer) -> Vec<u8> {
    let channel_count = buffer.channel_count();
    let frames = buffer.frames();
    let data_len = (channel_count * frames * 2) as u32;
    let total_len = 44 + data_len;

    let mut w = RiffWriter::with_capacity(total_len as usize);

    w.tag(b"RIFF");
    w.u32(total_len - 8);
    w.tag(b"WAVE");

    w.tag(b"fmt ");
    w.u32(16); // fmt chunk size
    w.u16(1); // PCM
    w.u16(channel_count as u16);
    w.u32(buffer.sample_rate());
    w.u32(buffer.sample_rate() * 2 * channel_count as u32); // byte rate
    w.u16((channel_count * 2) as u16); // block align
    w.u16(16); // bits per sample

    w.tag(b"data");
    w.u32(data_len);

    for frame in 0..frames {
        for channel in buffer.channels() {
            w.i16(quantize(channel[frame]));
        }
    }

    w.out
}

/// Convenience: WAV container encoded as base64 for JSON responses.
pub fn encode_wav_base64(buffer: &SampleBuffer) -> String {
    general_purpose::STANDARD.encode(encode_wav(buffer))
}
