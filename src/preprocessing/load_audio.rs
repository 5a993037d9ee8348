use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::{debug, info};
use ndarray::Array1;
use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction};

use crate::error::Result;

/// Decode a WAV file into mono samples in [-1, 1].
///
/// Integer PCM of any bit depth is scaled by `2^(bits - 1)`, float PCM is passed
/// through, and multi-channel frames are averaged down to one channel.
///
/// # Arguments
///
/// * `path` - Path to the WAV file.
/// * `resample_to` - Target sample rate, or `None` to keep the file's own rate.
///
/// # Returns
///
/// * The mono samples and the sample rate they are at.
pub fn load_audio<P: AsRef<Path>>(path: P, resample_to: Option<u32>) -> Result<(Array1<f32>, u32)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    info!(
        "Loaded {}: {} Hz, {} channel(s), {}-bit {:?}, {} frames",
        path.display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format,
        reader.duration()
    );

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.into_samples::<f32>().collect::<std::result::Result<Vec<f32>, hound::Error>>()?,
        SampleFormat::Int => {
            let scale = 2.0_f64.powi(spec.bits_per_sample as i32 - 1);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| (s as f64 / scale) as f32))
                .collect::<std::result::Result<Vec<f32>, hound::Error>>()?
        }
    };

    let samples = downmix(&interleaved, spec.channels as usize);

    match resample_to {
        Some(target) if target != spec.sample_rate && samples.len() > 1 => {
            let resampled = resample(&samples, spec.sample_rate, target)?;
            debug!(
                "Resampled {} -> {} samples ({} Hz -> {} Hz)",
                samples.len(),
                resampled.len(),
                spec.sample_rate,
                target
            );
            Ok((Array1::from(resampled), target))
        }
        _ => Ok((Array1::from(samples), spec.sample_rate)),
    }
}

fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    // A trailing partial frame is dropped
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    let channel_data: Vec<Vec<f64>> = vec![samples.iter().map(|&s| s as f64).collect()];

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f64>::new(
        target_rate as f64 / source_rate as f64,
        2.0,
        params,
        samples.len(),
        1,
    )?;
    let channel_resampled_data = resampler.process(&channel_data, None)?;

    Ok(channel_resampled_data[0].iter().map(|&s| s as f32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_wav(path: &Path, spec: WavSpec, samples: &[i32]) {
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_16_bit_mono_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        let spec = WavSpec { channels: 1, sample_rate: 8000, bits_per_sample: 16, sample_format: SampleFormat::Int };
        write_wav(&path, spec, &[0, 16384, -32768]);

        let (samples, rate) = load_audio(&path, None).unwrap();
        assert_eq!(rate, 8000);
        assert_eq!(samples.to_vec(), vec![0.0, 0.5, -1.0]);
    }

    #[test]
    fn test_stereo_is_averaged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec { channels: 2, sample_rate: 8000, bits_per_sample: 16, sample_format: SampleFormat::Int };
        write_wav(&path, spec, &[16384, 0, -16384, -16384]);

        let (samples, _) = load_audio(&path, None).unwrap();
        assert_eq!(samples.to_vec(), vec![0.25, -0.5]);
    }

    #[test]
    fn test_same_rate_skips_resampling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("same.wav");
        let spec = WavSpec { channels: 1, sample_rate: 8000, bits_per_sample: 16, sample_format: SampleFormat::Int };
        write_wav(&path, spec, &[1, 2, 3, 4]);

        let (samples, rate) = load_audio(&path, Some(8000)).unwrap();
        assert_eq!(rate, 8000);
        assert_eq!(samples.len(), 4);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_audio("does/not/exist.wav", None).is_err());
    }
}
