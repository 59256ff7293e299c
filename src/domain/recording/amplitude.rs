//! Block amplitude reducer for the visual feeds

/// Gain applied to the overview history fed to the saved-recording minimap
pub const OVERVIEW_GAIN: f32 = 5.0;

/// Gain applied to the live meter feed.
///
/// The two feeds historically use different gains to suit their visual
/// ranges; both are overridable through config.
pub const LIVE_GAIN: f32 = 6.0;

/// Reduce a block of normalized samples to one loudness scalar in [0, 1].
///
/// Computes the root-mean-square of the block, amplifies it by `gain`, and
/// clamps to 1.0. Pure function of its inputs; an empty block reads as
/// silence.
pub fn block_level(samples: &[f32], gain: f32) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum: f32 = samples.iter().map(|s| s * s).sum();
    let rms = (sum / samples.len() as f32).sqrt();
    (rms * gain).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_is_zero() {
        let block = vec![0.0f32; 1024];
        assert_eq!(block_level(&block, OVERVIEW_GAIN), 0.0);
    }

    #[test]
    fn empty_block_is_zero() {
        assert_eq!(block_level(&[], LIVE_GAIN), 0.0);
    }

    #[test]
    fn constant_block_has_rms_equal_to_value() {
        // RMS of a constant 0.5 signal is 0.5; unity gain passes it through
        let block = vec![0.5f32; 256];
        let level = block_level(&block, 1.0);
        assert!((level - 0.5).abs() < 1e-6);
    }

    #[test]
    fn gain_amplifies_before_clamp() {
        let block = vec![0.1f32; 256];
        let level = block_level(&block, OVERVIEW_GAIN);
        assert!((level - 0.5).abs() < 1e-6);
    }

    #[test]
    fn loud_block_clamps_to_one() {
        let block = vec![1.0f32; 256];
        assert_eq!(block_level(&block, OVERVIEW_GAIN), 1.0);
        assert_eq!(block_level(&block, LIVE_GAIN), 1.0);
    }

    #[test]
    fn sign_does_not_matter() {
        let positive = vec![0.25f32; 128];
        let negative = vec![-0.25f32; 128];
        assert_eq!(block_level(&positive, 1.0), block_level(&negative, 1.0));
    }

    #[test]
    fn deterministic_for_same_block() {
        let block: Vec<f32> = (0..512).map(|i| ((i as f32) * 0.01).sin()).collect();
        assert_eq!(
            block_level(&block, LIVE_GAIN),
            block_level(&block, LIVE_GAIN)
        );
    }
}
