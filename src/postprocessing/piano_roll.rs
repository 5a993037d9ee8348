use ndarray::{Array2, ArrayView1, Axis};

use crate::constants::N_PITCH_BINS;
use crate::inference::FrameFrequency;

use super::helpers::helpers::pitch_bin;

/// Binary activity matrix of shape (frames, 128 pitch bins).
///
/// At most one bin is set per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PianoRoll {
    cells: Array2<bool>,
}

impl PianoRoll {
    /// An all-clear roll with `n_frames` frames.
    pub fn new(n_frames: usize) -> Self {
        Self { cells: Array2::from_elem((n_frames, N_PITCH_BINS), false) }
    }

    pub fn n_frames(&self) -> usize {
        self.cells.nrows()
    }

    pub fn is_active(&self, frame: usize, pitch: usize) -> bool {
        self.cells.get((frame, pitch)).copied().unwrap_or(false)
    }

    /// Mark `pitch` as sounding at `frame`. Out-of-range indices are ignored.
    pub fn set_active(&mut self, frame: usize, pitch: usize) {
        if let Some(cell) = self.cells.get_mut((frame, pitch)) {
            *cell = true;
        }
    }

    /// Activity of every pitch bin at one frame.
    pub fn frame(&self, frame: usize) -> ArrayView1<'_, bool> {
        self.cells.index_axis(Axis(0), frame)
    }

    /// Number of set cells.
    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn as_array(&self) -> &Array2<bool> {
        &self.cells
    }
}

/// Quantize a frame frequency sequence into a piano roll.
///
/// # Arguments
///
/// * `frequencies` - One estimate per frame.
///
/// # Returns
///
/// * A roll where frame `t` has the bin of its nearest MIDI pitch set, or nothing
///   when the frame is unvoiced, malformed, or outside the 128 pitches.
pub fn build_piano_roll(frequencies: &[FrameFrequency]) -> PianoRoll {
    let mut piano_roll = PianoRoll::new(frequencies.len());

    for (t, frequency) in frequencies.iter().enumerate() {
        if let Some(pitch) = frequency.hz().and_then(|hz| pitch_bin(hz as f64)) {
            piano_roll.set_active(t, pitch);
        }
    }

    piano_roll
}
