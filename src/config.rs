// Transcription settings, loadable from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BEATS_PER_MINUTE, DEFAULT_FMAX, DEFAULT_FMIN, DEFAULT_FRAME_LENGTH, DEFAULT_HOP_LENGTH,
    DEFAULT_MIN_NOTE_DURATION, DEFAULT_SILENCE_THRESHOLD, DEFAULT_VELOCITY, DEFAULT_YIN_THRESHOLD, MAX_TEMPO_MICROS,
    MAX_YIN_THRESHOLD, MIN_YIN_THRESHOLD,
};
use crate::error::{Error, Result};

/// Settings for the audio-to-MIDI pipeline.
///
/// Every field has a default, so a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Notes shorter than this many seconds are discarded
    pub min_note_duration: f64,
    /// Velocity written for every note (0-127)
    pub velocity: u8,
    /// Lowest frequency the f0 estimator searches, in Hz
    pub fmin: f32,
    /// Highest frequency the f0 estimator searches, in Hz
    pub fmax: f32,
    /// Analysis frame length in samples
    pub frame_length: usize,
    /// Samples between consecutive analysis frames
    pub hop_length: usize,
    /// YIN absolute threshold on the normalized difference (0.01-0.5)
    pub yin_threshold: f32,
    /// Frames with an RMS below this are unvoiced
    pub silence_threshold: f32,
    /// Resample input audio to this rate before analysis
    pub resample_to: Option<u32>,
    /// Tempo of the written MIDI file, at least 4 so one beat fits a tempo event
    pub beats_per_minute: u32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            min_note_duration: DEFAULT_MIN_NOTE_DURATION,
            velocity: DEFAULT_VELOCITY,
            fmin: DEFAULT_FMIN,
            fmax: DEFAULT_FMAX,
            frame_length: DEFAULT_FRAME_LENGTH,
            hop_length: DEFAULT_HOP_LENGTH,
            yin_threshold: DEFAULT_YIN_THRESHOLD,
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            resample_to: None,
            beats_per_minute: DEFAULT_BEATS_PER_MINUTE,
        }
    }
}

impl TranscriptionConfig {
    /// Read a config from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: TranscriptionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the structural preconditions of the pipeline.
    pub fn validate(&self) -> Result<()> {
        if !self.min_note_duration.is_finite() || self.min_note_duration <= 0.0 {
            return Err(Error::invalid(format!(
                "min_note_duration must be a positive number of seconds, got {}",
                self.min_note_duration
            )));
        }
        if self.velocity > 127 {
            return Err(Error::invalid(format!("velocity must be in 0..=127, got {}", self.velocity)));
        }
        if !(self.fmin > 0.0 && self.fmin < self.fmax && self.fmax.is_finite()) {
            return Err(Error::invalid(format!(
                "frequency range must satisfy 0 < fmin < fmax, got {}..{}",
                self.fmin, self.fmax
            )));
        }
        if self.frame_length < 2 || self.hop_length == 0 {
            return Err(Error::invalid(format!(
                "frame_length must be at least 2 and hop_length positive, got {} and {}",
                self.frame_length, self.hop_length
            )));
        }
        if !(MIN_YIN_THRESHOLD..=MAX_YIN_THRESHOLD).contains(&self.yin_threshold) {
            return Err(Error::invalid(format!(
                "yin_threshold must be in {}..={}, got {}",
                MIN_YIN_THRESHOLD, MAX_YIN_THRESHOLD, self.yin_threshold
            )));
        }
        if self.silence_threshold.is_nan() || self.silence_threshold < 0.0 {
            return Err(Error::invalid("silence_threshold must be non-negative"));
        }
        if self.resample_to == Some(0) {
            return Err(Error::invalid("resample_to must be a positive sample rate"));
        }
        if self.beats_per_minute == 0 || 60_000_000 / self.beats_per_minute > MAX_TEMPO_MICROS {
            return Err(Error::invalid(format!("beats_per_minute must be at least 4, got {}", self.beats_per_minute)));
        }
        Ok(())
    }
}
