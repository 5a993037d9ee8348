use std::path::Path;

use log::info;

use crate::config::TranscriptionConfig;
use crate::error::{Error, Result};
use crate::inference::{run_inference, F0Estimator};
use crate::postprocessing::{
    helpers::ported::librosa::frames_to_time,
    midi::write_midi_file,
    note_event_times::{segment_notes, NoteEvent},
    piano_roll::build_piano_roll,
};
use crate::preprocessing::load_audio::load_audio;
use crate::yin::YinEstimator;

/// Transcribe in-memory samples into notes.
///
/// # Arguments
///
/// * `samples` - Mono samples in [-1, 1], at least 2 long.
/// * `sample_rate` - Sample rate in Hz.
/// * `estimator` - Per-frame f0 estimator.
/// * `config` - Segmentation settings.
///
/// # Returns
///
/// * Notes ordered by pitch, then start time.
pub fn transcribe_samples<E: F0Estimator + ?Sized>(
    samples: &[f32],
    sample_rate: u32,
    estimator: &E,
    config: &TranscriptionConfig,
) -> Result<Vec<NoteEvent>> {
    config.validate()?;
    if samples.len() < 2 {
        return Err(Error::invalid(format!("transcription needs at least 2 samples, got {}", samples.len())));
    }
    if sample_rate == 0 {
        return Err(Error::invalid("sample rate must be positive"));
    }

    let frame_frequencies = run_inference(samples, sample_rate, estimator)?;
    let piano_roll = build_piano_roll(&frame_frequencies);

    let frame_duration = frames_to_time(1, sample_rate, estimator.hop_length());
    let notes = segment_notes(&piano_roll, frame_duration, config.min_note_duration, config.velocity)?;

    info!(
        "Transcribed {} notes from {} frames ({:.4} s per frame)",
        notes.len(),
        piano_roll.n_frames(),
        frame_duration
    );

    Ok(notes)
}

/// Convert a WAV file into a MIDI file.
///
/// # Arguments
///
/// * `audio_path` - Input WAV file.
/// * `midi_path` - Where the MIDI file is written.
/// * `config` - Analysis and segmentation settings.
///
/// # Returns
///
/// * The notes that were written.
pub fn audio_to_midi<P: AsRef<Path>, Q: AsRef<Path>>(
    audio_path: P,
    midi_path: Q,
    config: &TranscriptionConfig,
) -> Result<Vec<NoteEvent>> {
    config.validate()?;

    let (samples, sample_rate) = load_audio(audio_path, config.resample_to)?;
    let estimator = YinEstimator::from_config(config)?;

    let samples = samples.into_raw_vec();
    let notes = transcribe_samples(&samples, sample_rate, &estimator, config)?;
    write_midi_file(&notes, midi_path, config.beats_per_minute)?;

    Ok(notes)
}
