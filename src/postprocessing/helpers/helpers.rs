use crate::constants::N_PITCH_BINS;

use super::ported::librosa::hz_to_midi;

/// Rounds a frequency to the nearest MIDI pitch number, halves to even.
///
/// # Arguments
///
/// * `hz` - A frequency in Hz.
///
/// # Returns
///
/// * The nearest pitch number, possibly outside 0..=127, or `None` if `hz` is
///   not a finite positive frequency.
pub fn round_to_pitch(hz: f64) -> Option<i64> {
    if !hz.is_finite() || hz <= 0.0 {
        return None;
    }
    Some(nearest_pitch(hz_to_midi(hz)))
}

// Exact halves go to the even pitch
fn nearest_pitch(midi: f64) -> i64 {
    midi.round_ties_even() as i64
}

/// Piano-roll bin for a frequency.
///
/// Pitches outside 0..128 are dropped, never clamped or wrapped.
pub fn pitch_bin(hz: f64) -> Option<usize> {
    round_to_pitch(hz)
        .filter(|&pitch| (0..N_PITCH_BINS as i64).contains(&pitch))
        .map(|pitch| pitch as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocessing::helpers::ported::librosa::midi_to_hz;

    #[test]
    fn test_round_to_pitch_is_monotonic() {
        let mut previous = i64::MIN;
        let mut hz = 200.0;
        while hz < 900.0 {
            let pitch = round_to_pitch(hz).unwrap();
            assert!(pitch >= previous, "{} Hz gave {} after {}", hz, pitch, previous);
            previous = pitch;
            hz += 0.25;
        }
    }

    #[test]
    fn test_rounding_to_nearest_semitone() {
        assert_eq!(round_to_pitch(440.0), Some(69));
        assert_eq!(round_to_pitch(446.0), Some(69));
        assert_eq!(round_to_pitch(460.0), Some(70));
        assert_eq!(round_to_pitch(0.0), None);
        assert_eq!(round_to_pitch(f64::NAN), None);
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        assert_eq!(nearest_pitch(-0.5), 0);
        assert_eq!(nearest_pitch(127.5), 128);
        assert_eq!(nearest_pitch(68.5), 68);
        assert_eq!(nearest_pitch(69.5), 70);
        assert_eq!(nearest_pitch(68.51), 69);
    }

    #[test]
    fn test_bin_boundaries_are_dropped_not_clamped() {
        assert_eq!(pitch_bin(midi_to_hz(0.0)), Some(0));
        assert_eq!(pitch_bin(midi_to_hz(127.0)), Some(127));
        assert_eq!(pitch_bin(midi_to_hz(-1.0)), None);
        assert_eq!(pitch_bin(midi_to_hz(128.0)), None);
    }
}
