use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{Error, Result};
use crate::postprocessing::helpers::ported::numpy::{absolute, arg_max};

/// Magnitude spectrum of the whole signal, positive-frequency half only.
///
/// No window and no DC removal are applied: the transform covers the full clip.
///
/// # Arguments
///
/// * `samples` - The signal, at least 2 samples long.
///
/// # Returns
///
/// * `|FFT(samples)|` for bins `0..N/2`.
pub fn magnitude_spectrum(samples: &[f32]) -> Result<Vec<f64>> {
    if samples.len() < 2 {
        return Err(Error::invalid(format!(
            "spectral peak detection needs at least 2 samples, got {}",
            samples.len()
        )));
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(samples.len());

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&sample| Complex { re: sample as f64, im: 0.0 })
        .collect();

    fft.process(&mut buffer);

    let mut magnitudes = absolute(&buffer);
    magnitudes.truncate(samples.len() / 2);
    Ok(magnitudes)
}

/// Frequency of the strongest spectral component of a clip.
///
/// Assumes one sustained monophonic tone. An all-zero clip has no peak and
/// deterministically reports bin 0, i.e. 0 Hz.
///
/// # Arguments
///
/// * `samples` - The signal, at least 2 samples long.
/// * `sample_rate` - Sample rate in Hz, must be positive.
///
/// # Returns
///
/// * `k* * sample_rate / N` where `k*` is the first bin of maximum magnitude.
pub fn detect_peak_frequency(samples: &[f32], sample_rate: u32) -> Result<f64> {
    if sample_rate == 0 {
        return Err(Error::invalid("sample rate must be positive"));
    }

    let magnitudes = magnitude_spectrum(samples)?;
    let peak_index = arg_max(&magnitudes).unwrap_or(0);

    Ok(peak_index as f64 * sample_rate as f64 / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_sine(sample_rate: u32, freq: f64, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate as f64).sin() as f32)
            .collect()
    }

    #[test]
    fn test_detect_a440_within_one_bin() {
        let samples = generate_sine(44100, 440.0, 1024);
        let peak = detect_peak_frequency(&samples, 44100).unwrap();

        let bin_width = 44100.0 / 1024.0;
        assert!((peak - 440.0).abs() <= bin_width, "Expected ~440 Hz, got {} Hz", peak);
    }

    #[test]
    fn test_exact_bin_frequency() {
        // 1000 Hz at 8000 Hz over 800 samples is exactly bin 100
        let samples = generate_sine(8000, 1000.0, 800);
        assert_eq!(detect_peak_frequency(&samples, 8000).unwrap(), 1000.0);
    }

    #[test]
    fn test_silence_reports_zero_hz() {
        assert_eq!(detect_peak_frequency(&[0.0; 512], 44100).unwrap(), 0.0);
    }

    #[test]
    fn test_spectrum_keeps_positive_half() {
        assert_eq!(magnitude_spectrum(&[0.0; 9]).unwrap().len(), 4);
        assert_eq!(magnitude_spectrum(&[1.0, -1.0]).unwrap().len(), 1);
    }

    #[test]
    fn test_preconditions() {
        assert!(matches!(detect_peak_frequency(&[0.5], 44100), Err(Error::InvalidArgument(_))));
        assert!(matches!(detect_peak_frequency(&[], 44100), Err(Error::InvalidArgument(_))));
        assert!(matches!(detect_peak_frequency(&[0.0, 1.0], 0), Err(Error::InvalidArgument(_))));
    }
}
