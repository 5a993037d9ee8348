//! Crate-wide error type.
//!
//! Data anomalies (unvoiced frames, out-of-range pitches, silent clips) are not
//! errors; only broken preconditions and I/O failures end up here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("WAV: {0}")]
    Wav(#[from] hound::Error),

    #[error("resampling: {0}")]
    Resample(String),

    #[error("config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

impl From<rubato::ResamplerConstructionError> for Error {
    fn from(err: rubato::ResamplerConstructionError) -> Self {
        Error::Resample(err.to_string())
    }
}

impl From<rubato::ResampleError> for Error {
    fn from(err: rubato::ResampleError) -> Self {
        Error::Resample(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
