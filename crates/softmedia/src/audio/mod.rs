//! Audio backend: blocking playback through a character device
//!
//! # Format policy
//!
//! The device consumes interleaved signed 16-bit little-endian stereo at
//! 44100 Hz and nothing else. [`AudioBackend::open`] therefore ignores the
//! requested spec and reports [`AudioSpec::NATIVE`] back; callers must read
//! the returned spec instead of assuming their request was honored. The mix
//! buffer holds exactly one period of 1000 frames (4000 bytes).

pub mod sink;

pub use sink::CharDeviceSink;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Audio backend errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// The device node could not be opened
    #[error("cannot open audio device {path}: {source}")]
    DeviceSetup {
        /// Device path that failed
        path: PathBuf,
        /// Underlying open error
        source: io::Error,
    },

    /// The backend is already open
    #[error("audio device already open")]
    AlreadyOpen,

    /// An operation ran before [`AudioBackend::open`]
    #[error("audio device not open")]
    NotOpen,

    /// The mix buffer allocation failed
    #[error("out of memory allocating the mix buffer")]
    OutOfMemory,

    /// A playback operation ran on a capture-direction device
    #[error("device was opened for capture, no playback buffer exists")]
    NoPlaybackBuffer,

    /// Device I/O failed
    #[error("audio device I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias for audio results
pub type AudioResult<T> = Result<T, AudioError>;

/// Sample encodings the backend understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Signed 16-bit little-endian
    S16Le,
}

impl SampleFormat {
    /// Bytes per sample for this encoding
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Self::S16Le => 2,
        }
    }

    /// Sample value representing silence
    pub const fn silence(self) -> i16 {
        match self {
            Self::S16Le => 0,
        }
    }
}

/// Stream parameters: rate, encoding, channel count, and period length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    /// Sample rate in Hz
    pub frequency: u32,
    /// Sample encoding
    pub format: SampleFormat,
    /// Interleaved channel count
    pub channels: u8,
    /// Frames per period
    pub samples: u16,
}

impl AudioSpec {
    /// The one spec the device runs at
    pub const NATIVE: Self = Self {
        frequency: 44_100,
        format: SampleFormat::S16Le,
        channels: 2,
        samples: 1000,
    };

    /// Bytes in one period of interleaved samples
    pub const fn buffer_size(&self) -> usize {
        self.samples as usize * self.channels as usize * self.format.bytes_per_sample()
    }
}

/// Whether a stream produces or consumes samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Application writes samples to the device
    Playback,
    /// Application reads samples from the device
    Capture,
}

/// Capability set an audio backend must implement
///
/// One period at a time: fill [`AudioBackend::mix_buffer`], then
/// [`AudioBackend::play`] blocks until the device has taken the whole
/// period. Capture directions open but cannot transfer; see
/// [`AudioBackend::capture`].
pub trait AudioBackend {
    /// Open the device and allocate the mix buffer
    ///
    /// Returns the spec the stream actually runs at, which is always
    /// [`AudioSpec::NATIVE`] regardless of `requested`.
    ///
    /// # Errors
    /// Fails with [`AudioError::AlreadyOpen`] when the device is open,
    /// with [`AudioError::DeviceSetup`] when the device node cannot be
    /// opened, and with [`AudioError::OutOfMemory`] when the mix buffer
    /// cannot be allocated.
    fn open(&mut self, requested: &AudioSpec, direction: Direction) -> AudioResult<AudioSpec>;

    /// Whether the device is open
    fn is_open(&self) -> bool;

    /// The period buffer to fill with interleaved samples, as raw bytes
    ///
    /// # Errors
    /// Fails with [`AudioError::NotOpen`] before open and with
    /// [`AudioError::NoPlaybackBuffer`] on capture streams.
    fn mix_buffer(&mut self) -> AudioResult<&mut [u8]>;

    /// Write the whole mix buffer to the device, blocking until done
    ///
    /// # Errors
    /// Fails with [`AudioError::NotOpen`] before open, with
    /// [`AudioError::NoPlaybackBuffer`] on capture streams, and with
    /// [`AudioError::Io`] when the device write fails.
    fn play(&mut self) -> AudioResult<()>;

    /// Read captured samples into `buffer`
    ///
    /// The device is write-only, so this always fails with
    /// [`AudioError::Io`]; it exists so capture-direction streams report
    /// a clean error instead of blocking forever.
    ///
    /// # Errors
    /// Always fails as described above.
    fn capture(&mut self, buffer: &mut [u8]) -> AudioResult<usize>;

    /// Discard any buffered capture data
    fn flush_capture(&mut self);

    /// Close the device and release the mix buffer
    fn close(&mut self);
}
