//! WAV encoder with embedded cue-point markers
//!
//! Produces a standard RIFF/WAVE file: 16-bit PCM, mono, little-endian,
//! with an optional `cue ` chunk holding one cue point per marker. The cue
//! layout follows the common-denominator form understood by mainstream
//! audio editors (Audacity, Ocenaudio, etc.).

use crate::domain::recording::{Marker, BITS_PER_SAMPLE, CHANNEL_COUNT};

/// Size of the RIFF + fmt + data headers
const HEADER_SIZE: usize = 44;

/// Size of one cue point record
const CUE_POINT_SIZE: usize = 24;

/// Bytes per encoded sample (16-bit mono)
const BYTES_PER_SAMPLE: usize = 2;

/// Encode normalized samples into a WAV byte stream.
///
/// Samples are clamped to [-1.0, 1.0] and quantized to signed 16-bit:
/// negative values scale by 32768, non-negative by 32767. A `cue ` chunk is
/// appended only when `markers` is non-empty; cue ids are the 1-based input
/// positions and cue positions are `floor(time * sample_rate)` sample
/// frames. Marker times come from the session's tick clock, so positions
/// may drift slightly from the exact captured sample count.
///
/// The output is a pure function of the inputs: identical inputs produce
/// byte-identical files.
pub fn encode(samples: &[f32], sample_rate: u32, markers: &[Marker]) -> Vec<u8> {
    let data_size = samples.len() * BYTES_PER_SAMPLE;
    let cue_chunk_size = if markers.is_empty() {
        0
    } else {
        // chunk id (4) + chunk size (4) + cue count (4) + points
        8 + 4 + CUE_POINT_SIZE * markers.len()
    };

    let mut out = Vec::with_capacity(HEADER_SIZE + data_size + cue_chunk_size);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&((36 + data_size + cue_chunk_size) as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt subchunk: PCM, mono, 16-bit
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&CHANNEL_COUNT.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * BYTES_PER_SAMPLE as u32).to_le_bytes());
    out.extend_from_slice(&(BYTES_PER_SAMPLE as u16).to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data subchunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data_size as u32).to_le_bytes());
    for &sample in samples {
        out.extend_from_slice(&sample_to_i16(sample).to_le_bytes());
    }

    // cue subchunk, only when markers exist; an empty cue chunk would be
    // malformed for some readers
    if !markers.is_empty() {
        out.extend_from_slice(b"cue ");
        out.extend_from_slice(&((4 + CUE_POINT_SIZE * markers.len()) as u32).to_le_bytes());
        out.extend_from_slice(&(markers.len() as u32).to_le_bytes());

        for (index, marker) in markers.iter().enumerate() {
            let frame = marker_frame(marker, sample_rate);
            // cue id: 1-based input position, independent of the marker's
            // own session id
            out.extend_from_slice(&(index as u32 + 1).to_le_bytes());
            out.extend_from_slice(&frame.to_le_bytes());
            out.extend_from_slice(b"data");
            out.extend_from_slice(&0u32.to_le_bytes()); // chunk start
            out.extend_from_slice(&0u32.to_le_bytes()); // block start
            out.extend_from_slice(&frame.to_le_bytes()); // sample offset
        }
    }

    debug_assert_eq!(out.len(), HEADER_SIZE + data_size + cue_chunk_size);
    out
}

/// Quantize one normalized sample to signed 16-bit PCM.
///
/// Out-of-range input clamps instead of overflowing: exactly -1.0 maps to
/// -32768 and exactly 1.0 maps to 32767.
fn sample_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

/// Sample-frame position of a marker at the given rate
fn marker_frame(marker: &Marker, sample_rate: u32) -> u32 {
    (marker.time_secs * sample_rate as f64).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: u32, time_secs: f64) -> Marker {
        Marker {
            id,
            time_secs,
            label: format!("Marker {}", id),
        }
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    fn i16_at(bytes: &[u8], offset: usize) -> i16 {
        i16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn header_layout_without_markers() {
        let samples = vec![0.0f32; 10];
        let bytes = encode(&samples, 44100, &[]);

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 36 + 20);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1); // PCM
        assert_eq!(u16_at(&bytes, 22), 1); // mono
        assert_eq!(u32_at(&bytes, 24), 44100);
        assert_eq!(u32_at(&bytes, 28), 88200); // byte rate
        assert_eq!(u16_at(&bytes, 32), 2); // block align
        assert_eq!(u16_at(&bytes, 34), 16); // bits per sample
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 20);
        assert_eq!(bytes.len(), 44 + 20);
    }

    #[test]
    fn zero_samples_produce_header_only_file() {
        let bytes = encode(&[], 48000, &[]);
        assert_eq!(bytes.len(), 44);
        assert_eq!(u32_at(&bytes, 4), 36);
        assert_eq!(u32_at(&bytes, 40), 0);
    }

    #[test]
    fn no_cue_chunk_without_markers() {
        let bytes = encode(&[0.1, 0.2], 48000, &[]);
        assert_eq!(bytes.len(), 44 + 4);
        assert!(!bytes.windows(4).any(|w| w == b"cue "));
    }

    #[test]
    fn boundary_sample_values() {
        let bytes = encode(&[-1.0, 1.0, 0.0, 1.5, -2.0], 48000, &[]);
        assert_eq!(i16_at(&bytes, 44), -32768);
        assert_eq!(i16_at(&bytes, 46), 32767);
        assert_eq!(i16_at(&bytes, 48), 0);
        // Out-of-range input clamps without overflow
        assert_eq!(i16_at(&bytes, 50), 32767);
        assert_eq!(i16_at(&bytes, 52), -32768);
    }

    #[test]
    fn negative_and_positive_use_asymmetric_scales() {
        let bytes = encode(&[-0.5, 0.5], 48000, &[]);
        assert_eq!(i16_at(&bytes, 44), -16384); // -0.5 * 32768
        assert_eq!(i16_at(&bytes, 46), 16383); // 0.5 * 32767, truncated
    }

    #[test]
    fn cue_chunk_layout() {
        let samples = vec![0.0f32; 4];
        let markers = vec![marker(1, 0.5), marker(2, 1.25)];
        let bytes = encode(&samples, 8000, &markers);

        let cue_start = 44 + 8;
        assert_eq!(&bytes[cue_start..cue_start + 4], b"cue ");
        assert_eq!(u32_at(&bytes, cue_start + 4), 4 + 24 * 2);
        assert_eq!(u32_at(&bytes, cue_start + 8), 2);

        // First cue point
        let p = cue_start + 12;
        assert_eq!(u32_at(&bytes, p), 1); // cue id
        assert_eq!(u32_at(&bytes, p + 4), 4000); // floor(0.5 * 8000)
        assert_eq!(&bytes[p + 8..p + 12], b"data");
        assert_eq!(u32_at(&bytes, p + 12), 0);
        assert_eq!(u32_at(&bytes, p + 16), 0);
        assert_eq!(u32_at(&bytes, p + 20), 4000);

        // Second cue point
        let q = p + 24;
        assert_eq!(u32_at(&bytes, q), 2);
        assert_eq!(u32_at(&bytes, q + 4), 10000); // floor(1.25 * 8000)
        assert_eq!(u32_at(&bytes, q + 20), 10000);

        assert_eq!(bytes.len(), 44 + 8 + 8 + 4 + 48);
    }

    #[test]
    fn riff_size_accounts_for_cue_chunk() {
        let samples = vec![0.0f32; 10];
        let markers = vec![marker(1, 0.1)];
        let bytes = encode(&samples, 44100, &markers);

        let expected_cue = 8 + 4 + 24;
        assert_eq!(u32_at(&bytes, 4), 36 + 20 + expected_cue as u32);
        assert_eq!(bytes.len(), 44 + 20 + expected_cue);
    }

    #[test]
    fn cue_ids_are_sequential_not_marker_ids() {
        // Marker ids start at 7; cue ids must still count from 1
        let markers = vec![marker(7, 0.0), marker(9, 1.0)];
        let bytes = encode(&[], 1000, &markers);

        let cue_start = 44;
        assert_eq!(u32_at(&bytes, cue_start + 12), 1);
        assert_eq!(u32_at(&bytes, cue_start + 12 + 24), 2);
    }

    #[test]
    fn markers_keep_input_order() {
        // Input order is preserved even when times are not sorted
        let markers = vec![marker(1, 2.0), marker(2, 1.0)];
        let bytes = encode(&[], 1000, &markers);

        let cue_start = 44;
        assert_eq!(u32_at(&bytes, cue_start + 12 + 4), 2000);
        assert_eq!(u32_at(&bytes, cue_start + 12 + 24 + 4), 1000);
    }

    #[test]
    fn frame_position_floors() {
        let markers = vec![marker(1, 0.9999)];
        let bytes = encode(&[], 1000, &markers);
        assert_eq!(u32_at(&bytes, 44 + 12 + 4), 999);
    }

    #[test]
    fn encoding_is_deterministic() {
        let samples: Vec<f32> = (0..256).map(|i| ((i as f32) * 0.02).sin()).collect();
        let markers = vec![marker(1, 0.01), marker(2, 0.02)];

        let first = encode(&samples, 44100, &markers);
        let second = encode(&samples, 44100, &markers);
        assert_eq!(first, second);
    }
}
