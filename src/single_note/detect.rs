use log::info;

use crate::error::Result;

use super::{note_table::NoteFrequencyTable, spectral_peak::detect_peak_frequency};

/// Closest note to the dominant frequency of a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedNote {
    pub label: &'static str,
    pub frequency: f64,
    pub midi: Option<u8>,
}

/// Classify a single sustained note.
///
/// # Arguments
///
/// * `samples` - Mono samples holding one monophonic tone, at least 2 long.
/// * `sample_rate` - Sample rate in Hz.
/// * `table` - Reference note table.
///
/// # Returns
///
/// * The nearest table label together with the detected peak frequency.
pub fn detect_note(samples: &[f32], sample_rate: u32, table: &NoteFrequencyTable) -> Result<DetectedNote> {
    let frequency = detect_peak_frequency(samples, sample_rate)?;
    let entry = table.nearest(frequency);

    info!("Detected frequency: {:.2} Hz, closest note: {}", frequency, entry.label);

    Ok(DetectedNote { label: entry.label, frequency, midi: entry.midi })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_sine(sample_rate: u32, freq: f64, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate as f64).sin() as f32)
            .collect()
    }

    #[test]
    fn test_detects_single_notes() {
        let table = NoteFrequencyTable::standard();

        // One second of audio gives 1 Hz bins
        for (freq, label, midi) in [(220.0, "A3", 57), (349.23, "F4", 65), (830.61, "G#5", 80)] {
            let samples = generate_sine(44100, freq, 44100);
            let note = detect_note(&samples, 44100, &table).unwrap();
            assert_eq!(note.label, label);
            assert_eq!(note.midi, Some(midi));
            assert!((note.frequency - freq).abs() <= 1.0);
        }
    }

    #[test]
    fn test_silence_is_deterministic() {
        let table = NoteFrequencyTable::standard();
        let first = detect_note(&[0.0; 1024], 44100, &table).unwrap();
        let second = detect_note(&[0.0; 1024], 44100, &table).unwrap();

        assert_eq!(first.frequency, 0.0);
        assert_eq!(first.label, "C0");
        assert_eq!(first, second);
    }

    #[test]
    fn test_too_short_input_fails() {
        let table = NoteFrequencyTable::standard();
        assert!(detect_note(&[0.1], 44100, &table).is_err());
    }
}
