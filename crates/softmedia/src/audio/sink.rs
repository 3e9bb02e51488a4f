//! Playback sink backed by a character device node

use super::{AudioBackend, AudioError, AudioResult, AudioSpec, Direction};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Audio backend writing periods straight into a character device
///
/// The production target is the kernel's `/dev/audio`, which accepts raw
/// interleaved S16LE stereo and blocks until the driver has consumed the
/// write. Any writable path works, which is how tests observe the byte
/// stream without the device.
pub struct CharDeviceSink {
    path: PathBuf,
    device: Option<File>,
    direction: Direction,
    mix: Vec<i16>,
}

impl CharDeviceSink {
    /// Create a sink for the device at `path` without opening it
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            device: None,
            direction: Direction::Playback,
            mix: Vec::new(),
        }
    }

    /// Device path this sink writes to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The period buffer as typed samples instead of raw bytes
    ///
    /// # Errors
    /// Fails with [`AudioError::NotOpen`] before open and with
    /// [`AudioError::NoPlaybackBuffer`] on capture streams.
    pub fn mix_samples_mut(&mut self) -> AudioResult<&mut [i16]> {
        if self.device.is_none() {
            return Err(AudioError::NotOpen);
        }
        if self.direction != Direction::Playback {
            return Err(AudioError::NoPlaybackBuffer);
        }
        Ok(&mut self.mix)
    }
}

impl AudioBackend for CharDeviceSink {
    fn open(&mut self, requested: &AudioSpec, direction: Direction) -> AudioResult<AudioSpec> {
        if self.device.is_some() {
            return Err(AudioError::AlreadyOpen);
        }
        if *requested != AudioSpec::NATIVE {
            log::debug!(
                "requested {} Hz / {} ch ignored, stream runs at {} Hz / {} ch",
                requested.frequency,
                requested.channels,
                AudioSpec::NATIVE.frequency,
                AudioSpec::NATIVE.channels
            );
        }
        let device = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|source| AudioError::DeviceSetup {
                path: self.path.clone(),
                source,
            })?;
        if direction == Direction::Playback {
            let samples =
                AudioSpec::NATIVE.buffer_size() / AudioSpec::NATIVE.format.bytes_per_sample();
            let mut mix = Vec::new();
            mix.try_reserve_exact(samples)
                .map_err(|_| AudioError::OutOfMemory)?;
            mix.resize(samples, AudioSpec::NATIVE.format.silence());
            self.mix = mix;
        }
        self.device = Some(device);
        self.direction = direction;
        log::info!(
            "opened audio device {} for {:?}",
            self.path.display(),
            direction
        );
        Ok(AudioSpec::NATIVE)
    }

    fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn mix_buffer(&mut self) -> AudioResult<&mut [u8]> {
        if self.device.is_none() {
            return Err(AudioError::NotOpen);
        }
        if self.direction != Direction::Playback {
            return Err(AudioError::NoPlaybackBuffer);
        }
        Ok(bytemuck::cast_slice_mut(&mut self.mix))
    }

    fn play(&mut self) -> AudioResult<()> {
        let device = self.device.as_mut().ok_or(AudioError::NotOpen)?;
        if self.direction != Direction::Playback {
            return Err(AudioError::NoPlaybackBuffer);
        }
        device.write_all(bytemuck::cast_slice(&self.mix))?;
        Ok(())
    }

    fn capture(&mut self, _buffer: &mut [u8]) -> AudioResult<usize> {
        if self.device.is_none() {
            return Err(AudioError::NotOpen);
        }
        // the device node is write-only
        Err(AudioError::Io(io::Error::from(io::ErrorKind::Unsupported)))
    }

    fn flush_capture(&mut self) {
        // nothing buffered: capture transfers never succeed
    }

    fn close(&mut self) {
        if self.device.take().is_some() {
            self.mix = Vec::new();
            log::info!("closed audio device {}", self.path.display());
        }
    }
}

impl Drop for CharDeviceSink {
    fn drop(&mut self) {
        if self.is_open() {
            self.close();
        }
    }
}
