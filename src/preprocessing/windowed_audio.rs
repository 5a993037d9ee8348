use ndarray::{s, Array1};

/// Iterator over centered analysis frames.
///
/// The audio is zero-padded by half a frame on both sides, so frame `t` is
/// centered on sample `t * hop_size` and there are `1 + len / hop_size` frames
/// for an even `frame_length`.
pub struct WindowedAudio {
    padded: Array1<f32>,
    frame_length: usize,
    hop_size: usize,
    index: usize,
}

impl Iterator for WindowedAudio {
    type Item = Array1<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        let end_index = self.index + self.frame_length;
        if end_index > self.padded.len() {
            return None;
        }

        let window = self.padded.slice(s![self.index..end_index]).to_owned();
        self.index += self.hop_size;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.index + self.frame_length > self.padded.len() {
            0
        } else {
            (self.padded.len() - self.frame_length - self.index) / self.hop_size + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WindowedAudio {}

/// Split `audio` into centered frames of `frame_length` samples, `hop_size` apart.
///
/// `frame_length` and `hop_size` must both be positive.
pub fn window_audio_file(audio: &[f32], frame_length: usize, hop_size: usize) -> WindowedAudio {
    let padding = frame_length / 2;
    let mut padded = Vec::with_capacity(audio.len() + 2 * padding);
    padded.resize(padding, 0.0);
    padded.extend_from_slice(audio);
    padded.resize(audio.len() + 2 * padding, 0.0);

    WindowedAudio {
        padded: Array1::from(padded),
        frame_length,
        hop_size,
        index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_is_one_plus_len_over_hop() {
        let audio = vec![0.0; 4096];
        assert_eq!(window_audio_file(&audio, 2048, 512).count(), 1 + 4096 / 512);

        let audio = vec![0.0; 1000];
        let frames = window_audio_file(&audio, 2048, 512);
        assert_eq!(frames.len(), 1 + 1000 / 512);
    }

    #[test]
    fn test_frames_are_centered() {
        let audio: Vec<f32> = (0..16).map(|i| i as f32 + 1.0).collect();
        let frames: Vec<Array1<f32>> = window_audio_file(&audio, 4, 4).collect();

        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0].to_vec(), vec![0.0, 0.0, 1.0, 2.0]);
        assert_eq!(frames[1].to_vec(), vec![3.0, 4.0, 5.0, 6.0]);
        assert_eq!(frames[4].to_vec(), vec![15.0, 16.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_audio_still_yields_a_padded_frame() {
        let frames: Vec<Array1<f32>> = window_audio_file(&[], 4, 2).collect();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].iter().all(|&s| s == 0.0));
    }
}
