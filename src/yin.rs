//! YIN fundamental-frequency estimation over centered frames.
//!
//! Steps per frame: silence gate, difference function, cumulative mean
//! normalized difference, absolute threshold (first dip below it, walked down to
//! its local minimum), parabolic interpolation.

use log::warn;

use crate::config::TranscriptionConfig;
use crate::constants::{
    DEFAULT_FMAX, DEFAULT_FMIN, DEFAULT_FRAME_LENGTH, DEFAULT_HOP_LENGTH, DEFAULT_SILENCE_THRESHOLD,
    DEFAULT_YIN_THRESHOLD, MAX_YIN_THRESHOLD, MIN_YIN_THRESHOLD,
};
use crate::error::{Error, Result};
use crate::inference::{F0Estimator, FrameFrequency};
use crate::preprocessing::windowed_audio::window_audio_file;

#[derive(Debug, Clone, PartialEq)]
pub struct YinEstimator {
    fmin: f32,
    fmax: f32,
    frame_length: usize,
    hop_length: usize,
    threshold: f32,
    silence_threshold: f32,
}

impl Default for YinEstimator {
    fn default() -> Self {
        Self {
            fmin: DEFAULT_FMIN,
            fmax: DEFAULT_FMAX,
            frame_length: DEFAULT_FRAME_LENGTH,
            hop_length: DEFAULT_HOP_LENGTH,
            threshold: DEFAULT_YIN_THRESHOLD,
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
        }
    }
}

impl YinEstimator {
    /// Create an estimator searching `fmin..=fmax` Hz.
    pub fn new(fmin: f32, fmax: f32, frame_length: usize, hop_length: usize) -> Result<Self> {
        if !(fmin > 0.0 && fmin < fmax && fmax.is_finite()) {
            return Err(Error::invalid(format!("invalid f0 range {}..{} Hz", fmin, fmax)));
        }
        if frame_length < 2 || hop_length == 0 {
            return Err(Error::invalid(format!(
                "invalid framing: frame_length {} hop_length {}",
                frame_length, hop_length
            )));
        }

        Ok(Self { fmin, fmax, frame_length, hop_length, ..Default::default() })
    }

    pub fn from_config(config: &TranscriptionConfig) -> Result<Self> {
        Ok(Self::new(config.fmin, config.fmax, config.frame_length, config.hop_length)?
            .with_threshold(config.yin_threshold)
            .with_silence_threshold(config.silence_threshold))
    }

    /// Set the absolute threshold on the normalized difference, clamped to
    /// `MIN_YIN_THRESHOLD..=MAX_YIN_THRESHOLD`.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(MIN_YIN_THRESHOLD, MAX_YIN_THRESHOLD);
        self
    }

    /// Frames with an RMS below `threshold` are reported unvoiced.
    pub fn with_silence_threshold(mut self, threshold: f32) -> Self {
        self.silence_threshold = threshold.max(0.0);
        self
    }

    /// Lag search range `(min_period, max_period)` in samples.
    fn period_range(&self, sample_rate: u32) -> (usize, usize) {
        let sample_rate = sample_rate as f64;
        let min_period = ((sample_rate / self.fmax as f64).floor() as usize).max(1);
        let max_period = ((sample_rate / self.fmin as f64).ceil() as usize).min(self.frame_length / 2);
        (min_period, max_period)
    }

    fn detect_frame(&self, frame: &[f32], sample_rate: u32, min_period: usize, max_period: usize) -> FrameFrequency {
        let rms = (frame.iter().map(|&s| s * s).sum::<f32>() / frame.len() as f32).sqrt();
        if rms < self.silence_threshold {
            return FrameFrequency::Unvoiced;
        }

        let cmnd = cumulative_mean_normalized_difference(frame, max_period);

        let mut tau = min_period.max(1);
        let mut period = None;
        while tau < max_period {
            if cmnd[tau] < self.threshold {
                while tau + 1 < max_period && cmnd[tau + 1] < cmnd[tau] {
                    tau += 1;
                }
                period = Some(tau);
                break;
            }
            tau += 1;
        }

        let Some(period) = period else {
            return FrameFrequency::Unvoiced;
        };

        let frequency = (sample_rate as f64 / parabolic_interpolation(&cmnd, period)) as f32;
        if frequency.is_finite() && frequency > 0.0 {
            FrameFrequency::Voiced(frequency)
        } else {
            FrameFrequency::Unvoiced
        }
    }
}

impl F0Estimator for YinEstimator {
    fn estimate(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<FrameFrequency>> {
        if sample_rate == 0 {
            return Err(Error::invalid("sample rate must be positive"));
        }

        let (min_period, max_period) = self.period_range(sample_rate);
        if max_period <= min_period + 1 {
            warn!(
                "No lag range left for {}..{} Hz at {} Hz with {}-sample frames; every frame is unvoiced",
                self.fmin, self.fmax, sample_rate, self.frame_length
            );
        }

        Ok(window_audio_file(samples, self.frame_length, self.hop_length)
            .map(|frame| match frame.as_slice() {
                Some(frame) => self.detect_frame(frame, sample_rate, min_period, max_period),
                None => FrameFrequency::Unvoiced,
            })
            .collect())
    }

    fn hop_length(&self) -> usize {
        self.hop_length
    }
}

/// d'(τ) for τ in 0..=max_period, with d'(0) = 1.
///
/// The difference d(τ) = Σ (x[j] - x[j+τ])² runs over the first
/// `frame.len() - max_period` samples so every lag sees the same window.
fn cumulative_mean_normalized_difference(frame: &[f32], max_period: usize) -> Vec<f32> {
    let window = frame.len() - max_period;
    let mut cmnd = vec![1.0f32; max_period + 1];

    let mut running_sum = 0.0f64;
    for tau in 1..=max_period {
        let difference: f64 = frame[..window]
            .iter()
            .zip(&frame[tau..tau + window])
            .map(|(&a, &b)| {
                let delta = a as f64 - b as f64;
                delta * delta
            })
            .sum();

        running_sum += difference;
        cmnd[tau] = if running_sum > 1e-10 {
            (difference * tau as f64 / running_sum) as f32
        } else {
            1.0
        };
    }

    cmnd
}

fn parabolic_interpolation(cmnd: &[f32], tau: usize) -> f64 {
    if tau < 1 || tau + 1 >= cmnd.len() {
        return tau as f64;
    }

    let s0 = cmnd[tau - 1] as f64;
    let s1 = cmnd[tau] as f64;
    let s2 = cmnd[tau + 1] as f64;

    let denominator = 2.0 * (2.0 * s1 - s2 - s0);
    if denominator.abs() > 1e-10 {
        tau as f64 + (s2 - s0) / denominator
    } else {
        tau as f64
    }
}
