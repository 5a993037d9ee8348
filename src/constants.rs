// Tuning
pub const A4_FREQUENCY: f64 = 440.0;
pub const A4_MIDI: f64 = 69.0;
pub const N_PITCH_BINS: usize = 128;

// F0 estimation
pub const DEFAULT_FMIN: f32 = 27.5; // A0
pub const DEFAULT_FMAX: f32 = 4186.01; // C8
pub const DEFAULT_FRAME_LENGTH: usize = 2048;
pub const DEFAULT_HOP_LENGTH: usize = DEFAULT_FRAME_LENGTH / 4;
pub const DEFAULT_YIN_THRESHOLD: f32 = 0.1;
pub const MIN_YIN_THRESHOLD: f32 = 0.01;
pub const MAX_YIN_THRESHOLD: f32 = 0.5;
pub const DEFAULT_SILENCE_THRESHOLD: f32 = 0.01;

// Note segmentation
pub const DEFAULT_MIN_NOTE_DURATION: f64 = 0.2;
pub const DEFAULT_VELOCITY: u8 = 120;

// MIDI Conversion
pub const TICKS_PER_BEAT: u16 = 220;
pub const DEFAULT_BEATS_PER_MINUTE: u32 = 120;
pub const PIANO_PROGRAM: u8 = 0;
// Largest microseconds-per-beat a tempo meta event can hold (24 bits)
pub const MAX_TEMPO_MICROS: u32 = 0xFF_FFFF;
