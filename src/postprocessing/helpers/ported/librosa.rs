/* PORTED LIBROSA FUNCTIONS */

use crate::constants::{A4_FREQUENCY, A4_MIDI};

const PITCH_CLASSES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Converts a frequency in Hz to the corresponding (fractional) MIDI pitch.
///
/// # Arguments
///
/// * `hz` - A frequency in Hz.
///
/// # Returns
///
/// * The corresponding MIDI pitch, 69 being A4 = 440 Hz.
pub fn hz_to_midi(hz: f64) -> f64 {
    A4_MIDI + 12.0 * (hz / A4_FREQUENCY).log2()
}

/// Converts a MIDI pitch to the corresponding frequency in Hz.
///
/// # Arguments
///
/// * `midi` - A MIDI pitch.
///
/// # Returns
///
/// * The corresponding frequency in Hz.
pub fn midi_to_hz(midi: f64) -> f64 {
    A4_FREQUENCY * 2.0f64.powf((midi - A4_MIDI) / 12.0)
}

/// Converts frame counts to seconds.
///
/// # Arguments
///
/// * `frames` - Number of frames.
/// * `sample_rate` - Sample rate of the analysed audio.
/// * `hop_length` - Samples between successive frames.
///
/// # Returns
///
/// * The time `frames` frames span, in seconds.
pub fn frames_to_time(frames: usize, sample_rate: u32, hop_length: usize) -> f64 {
    (frames * hop_length) as f64 / sample_rate as f64
}

/// Parses a scientific pitch label such as `"C4"`, `"A#4"` or `"Bb3"` into a MIDI pitch.
///
/// # Arguments
///
/// * `label` - Letter, any number of `#`/`b` accidentals, then a signed octave.
///
/// # Returns
///
/// * The MIDI pitch, or `None` if the label is not a pitch or falls outside 0..=127.
pub fn note_to_midi(label: &str) -> Option<u8> {
    let mut chars = label.trim().chars().peekable();

    let base: i32 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let mut offset = 0;
    while let Some(&c) = chars.peek() {
        match c {
            '#' => offset += 1,
            'b' => offset -= 1,
            _ => break,
        }
        chars.next();
    }

    let octave: i32 = chars.collect::<String>().parse().ok()?;
    let midi = (octave + 1) * 12 + base + offset;
    u8::try_from(midi).ok().filter(|&m| m <= 127)
}

/// Renders a MIDI pitch as a sharp-notation label, e.g. 69 -> `"A4"`.
pub fn midi_to_note(midi: u8) -> String {
    let octave = midi as i32 / 12 - 1;
    format!("{}{}", PITCH_CLASSES[(midi % 12) as usize], octave)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hz_midi_reference_points() {
        assert_abs_diff_eq!(hz_to_midi(440.0), 69.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hz_to_midi(880.0), 81.0, epsilon = 1e-12);
        assert_abs_diff_eq!(midi_to_hz(60.0), 261.6255653, epsilon = 1e-6);
        assert_abs_diff_eq!(hz_to_midi(midi_to_hz(21.0)), 21.0, epsilon = 1e-9);
    }

    #[test]
    fn test_frames_to_time() {
        assert_abs_diff_eq!(frames_to_time(1, 22050, 512), 512.0 / 22050.0);
        assert_eq!(frames_to_time(0, 44100, 512), 0.0);
        assert_eq!(frames_to_time(10, 1000, 100), 1.0);
    }

    #[test]
    fn test_note_to_midi() {
        assert_eq!(note_to_midi("A4"), Some(69));
        assert_eq!(note_to_midi("C4"), Some(60));
        assert_eq!(note_to_midi("A#4"), Some(70));
        assert_eq!(note_to_midi("Bb3"), Some(58));
        assert_eq!(note_to_midi("C-1"), Some(0));
        assert_eq!(note_to_midi("G9"), Some(127));
        assert_eq!(note_to_midi("G#9"), None);
        assert_eq!(note_to_midi("Beyond B8"), None);
        assert_eq!(note_to_midi(""), None);
    }

    #[test]
    fn test_midi_to_note() {
        assert_eq!(midi_to_note(69), "A4");
        assert_eq!(midi_to_note(61), "C#4");
        assert_eq!(midi_to_note(0), "C-1");
        for midi in 0..=127u8 {
            assert_eq!(note_to_midi(&midi_to_note(midi)), Some(midi));
        }
    }
}
