use log::{debug, info};

use crate::error::{Error, Result};

/// One frame's fundamental-frequency estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameFrequency {
    Voiced(f32),
    Unvoiced,
}

impl FrameFrequency {
    /// Frequency in Hz, if the frame is voiced with a usable value.
    ///
    /// NaN, infinite and non-positive estimates count as unvoiced.
    pub fn hz(self) -> Option<f32> {
        match self {
            FrameFrequency::Voiced(hz) if hz.is_finite() && hz > 0.0 => Some(hz),
            _ => None,
        }
    }

    pub fn is_voiced(self) -> bool {
        self.hz().is_some()
    }
}

impl From<Option<f32>> for FrameFrequency {
    fn from(hz: Option<f32>) -> Self {
        hz.map_or(FrameFrequency::Unvoiced, FrameFrequency::Voiced)
    }
}

/// Produces one frequency estimate per fixed-length analysis frame.
pub trait F0Estimator {
    /// Estimate the f0 of every frame of `samples`.
    fn estimate(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<FrameFrequency>>;

    /// Samples between the starts of consecutive frames.
    fn hop_length(&self) -> usize;
}

/// Run `estimator` over a whole clip.
///
/// # Arguments
///
/// * `samples` - Mono samples in [-1, 1].
/// * `sample_rate` - Sample rate of `samples` in Hz.
/// * `estimator` - The f0 estimator to use.
///
/// # Returns
///
/// * One [`FrameFrequency`] per analysis frame.
pub fn run_inference<E: F0Estimator + ?Sized>(
    samples: &[f32],
    sample_rate: u32,
    estimator: &E,
) -> Result<Vec<FrameFrequency>> {
    if sample_rate == 0 {
        return Err(Error::invalid("sample rate must be positive"));
    }

    let frequencies = estimator.estimate(samples, sample_rate)?;

    let voiced = frequencies.iter().filter(|f| f.is_voiced()).count();
    info!(
        "Estimated f0 for {} frames ({} voiced, hop {} samples)",
        frequencies.len(),
        voiced,
        estimator.hop_length()
    );
    debug!("Frame frequencies: {:?}", frequencies);

    Ok(frequencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<FrameFrequency>);

    impl F0Estimator for Fixed {
        fn estimate(&self, _samples: &[f32], _sample_rate: u32) -> Result<Vec<FrameFrequency>> {
            Ok(self.0.clone())
        }

        fn hop_length(&self) -> usize {
            512
        }
    }

    #[test]
    fn test_malformed_values_are_unvoiced() {
        assert_eq!(FrameFrequency::Voiced(f32::NAN).hz(), None);
        assert_eq!(FrameFrequency::Voiced(f32::INFINITY).hz(), None);
        assert_eq!(FrameFrequency::Voiced(-3.0).hz(), None);
        assert_eq!(FrameFrequency::Voiced(0.0).hz(), None);
        assert_eq!(FrameFrequency::Voiced(440.0).hz(), Some(440.0));
        assert!(!FrameFrequency::Unvoiced.is_voiced());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(FrameFrequency::from(Some(220.0)), FrameFrequency::Voiced(220.0));
        assert_eq!(FrameFrequency::from(None), FrameFrequency::Unvoiced);
    }

    #[test]
    fn test_run_inference_passes_estimates_through() {
        let estimator = Fixed(vec![FrameFrequency::Voiced(440.0), FrameFrequency::Unvoiced]);
        let frequencies = run_inference(&[0.0; 16], 44100, &estimator).unwrap();
        assert_eq!(frequencies, estimator.0);
    }

    #[test]
    fn test_run_inference_rejects_zero_sample_rate() {
        let estimator = Fixed(vec![]);
        assert!(matches!(run_inference(&[0.0; 16], 0, &estimator), Err(Error::InvalidArgument(_))));
    }
}
