use log::debug;

use crate::error::{Error, Result};

use super::{
    note_event_frames::{piano_roll_to_note_frames, NoteEventFrame},
    piano_roll::PianoRoll,
};

/// A note with start and end in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub pitch: u8,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub velocity: u8,
}

impl NoteEvent {
    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// Convert note frames to time-based note events, dropping short ones.
///
/// # Arguments
///
/// * `notes` - Runs of active frames.
/// * `frame_duration` - Seconds per frame.
/// * `min_note_duration` - Notes shorter than this many seconds are dropped.
/// * `velocity` - Velocity given to every note.
///
/// # Returns
///
/// * Time-based note events in the order of `notes`.
pub fn note_frames_to_time(
    notes: &[NoteEventFrame],
    frame_duration: f64,
    min_note_duration: f64,
    velocity: u8,
) -> Vec<NoteEvent> {
    notes
        .iter()
        .filter_map(|note| {
            let start_seconds = note.start_frame as f64 * frame_duration;
            let end_seconds = note.end_frame() as f64 * frame_duration;

            if end_seconds - start_seconds >= min_note_duration {
                Some(NoteEvent { pitch: note.pitch_midi, start_seconds, end_seconds, velocity })
            } else {
                None
            }
        })
        .collect()
}

/// Segment a piano roll into note events.
///
/// # Arguments
///
/// * `piano_roll` - The activity matrix.
/// * `frame_duration` - Seconds per frame, must be positive.
/// * `min_note_duration` - Minimum note length in seconds, must be positive.
/// * `velocity` - Fixed velocity for every note (0-127).
///
/// # Returns
///
/// * Notes ordered by pitch, then start time.
pub fn segment_notes(
    piano_roll: &PianoRoll,
    frame_duration: f64,
    min_note_duration: f64,
    velocity: u8,
) -> Result<Vec<NoteEvent>> {
    if !frame_duration.is_finite() || frame_duration <= 0.0 {
        return Err(Error::invalid(format!("frame duration must be positive, got {}", frame_duration)));
    }
    if !min_note_duration.is_finite() || min_note_duration <= 0.0 {
        return Err(Error::invalid(format!(
            "minimum note duration must be positive, got {}",
            min_note_duration
        )));
    }
    if velocity > 127 {
        return Err(Error::invalid(format!("velocity must be in 0..=127, got {}", velocity)));
    }

    let runs = piano_roll_to_note_frames(piano_roll);
    let notes = note_frames_to_time(&runs, frame_duration, min_note_duration, velocity);
    debug!(
        "Kept {} of {} runs at least {} s long",
        notes.len(),
        runs.len(),
        min_note_duration
    );

    Ok(notes)
}
