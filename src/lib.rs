//! Audio to note transcription.
//!
//! Two independent pipelines over raw mono samples:
//! - multi-note transcription: per-frame f0 estimates are quantized into a
//!   128-bin piano roll, which is segmented into timed note events and written
//!   as MIDI;
//! - single-note detection: the dominant FFT peak of a whole clip is matched
//!   to the nearest equal-tempered note.

pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod transcribe;
pub mod yin;
pub mod preprocessing {
    pub mod load_audio;
    pub mod windowed_audio;
}
pub mod postprocessing {
    pub mod helpers {
        pub mod ported {
            pub mod librosa;
            pub mod numpy;
        }
        pub mod helpers;
    }
    pub mod piano_roll;
    pub mod note_event_frames;
    pub mod note_event_times;
    pub mod midi;
}
pub mod single_note {
    pub mod detect;
    pub mod note_table;
    pub mod spectral_peak;
}

pub use config::TranscriptionConfig;
pub use error::{Error, Result};
pub use inference::{F0Estimator, FrameFrequency};
pub use postprocessing::note_event_times::NoteEvent;
pub use postprocessing::piano_roll::{build_piano_roll, PianoRoll};
pub use single_note::detect::{detect_note, DetectedNote};
pub use single_note::note_table::NoteFrequencyTable;
pub use transcribe::{audio_to_midi, transcribe_samples};
pub use yin::YinEstimator;
