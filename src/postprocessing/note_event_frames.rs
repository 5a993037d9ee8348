use crate::constants::N_PITCH_BINS;

use super::piano_roll::PianoRoll;

/// A contiguous run of one pitch bin, in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEventFrame {
    pub start_frame: usize,
    pub duration_frames: usize,
    pub pitch_midi: u8,
}

impl NoteEventFrame {
    pub fn end_frame(&self) -> usize {
        self.start_frame + self.duration_frames
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinState {
    Inactive,
    Active { start_frame: usize },
}

/// Collect every run of consecutive active frames, per pitch bin.
///
/// Each of the 128 bins is an on/off state machine advanced once per frame; a
/// run still open after the last frame is closed at `n_frames`.
///
/// # Arguments
///
/// * `piano_roll` - The activity matrix.
///
/// # Returns
///
/// * The runs ordered by pitch, then by start frame. Runs of the same pitch
///   never overlap.
pub fn piano_roll_to_note_frames(piano_roll: &PianoRoll) -> Vec<NoteEventFrame> {
    let n_frames = piano_roll.n_frames();
    let mut states = [BinState::Inactive; N_PITCH_BINS];
    let mut runs: Vec<Vec<NoteEventFrame>> = vec![Vec::new(); N_PITCH_BINS];

    let close = |runs: &mut Vec<Vec<NoteEventFrame>>, pitch: usize, start_frame: usize, end_frame: usize| {
        runs[pitch].push(NoteEventFrame {
            start_frame,
            duration_frames: end_frame - start_frame,
            pitch_midi: pitch as u8,
        });
    };

    for t in 0..n_frames {
        let frame = piano_roll.frame(t);
        for (pitch, (state, &active)) in states.iter_mut().zip(frame.iter()).enumerate() {
            match (*state, active) {
                (BinState::Inactive, true) => *state = BinState::Active { start_frame: t },
                (BinState::Active { start_frame }, false) => {
                    close(&mut runs, pitch, start_frame, t);
                    *state = BinState::Inactive;
                }
                _ => {}
            }
        }
    }

    for (pitch, state) in states.iter().enumerate() {
        if let BinState::Active { start_frame } = *state {
            close(&mut runs, pitch, start_frame, n_frames);
        }
    }

    runs.into_iter().flatten().collect()
}
