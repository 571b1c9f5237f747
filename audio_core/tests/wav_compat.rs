//! Output must be readable by standard WAV software, not just our decoder.

use audio_core::{encode_wav, SampleBuffer};

#[test]
fn hound_reads_encoded_mono_file() {
    let buf = SampleBuffer::mono(24_000, vec![0.0, 0.5, -0.5, 1.0, -1.0]);
    let wav = encode_wav(&buf);

    let mut reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 24_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![0, 16_384, -16_384, 32_767, -32_768]);
}

#[test]
fn hound_reads_encoded_stereo_file() {
    let buf = SampleBuffer::from_channels(48_000, vec![vec![0.25, -0.25], vec![1.0, -1.0]]);
    let wav = encode_wav(&buf);

    let mut reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.duration(), 2);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![8_192, 32_767, -8_192, -32_768]);
}

#[test]
fn hound_reads_header_only_file() {
    let buf = SampleBuffer::mono(24_000, Vec::new());
    let wav = encode_wav(&buf);

    let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
    assert_eq!(reader.duration(), 0);
}
