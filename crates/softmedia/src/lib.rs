//! # Softmedia
//!
//! A software-rendered platform layer: toolkit windowing, translated input,
//! and character-device audio behind capability traits.
//!
//! ## Features
//!
//! - **Fixed-format framebuffers**: XRGB8888 CPU buffers blitted by damage rectangle
//! - **Generational window handles**: stale handles fail instead of aliasing
//! - **Total input translation**: every native key code maps, unknown ones included
//! - **Single-threaded event pump**: drains the toolkit without ever blocking
//! - **Character-device audio**: blocking S16LE stereo playback, one period at a time
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use softmedia::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     softmedia::foundation::logging::init();
//!
//!     let mut video = VideoContext::new(Box::new(LoopbackToolkit::new()));
//!     video.init()?;
//!
//!     let window = video.create_window(&WindowOptions::new("demo", 640, 480))?;
//!     video.show_window(window)?;
//!     video.create_framebuffer(window)?;
//!
//!     video.framebuffer_mut(window)?.fill(0x00ff_8800);
//!     video.update_framebuffer(window, &[Rect::new(0, 0, 640, 480)])?;
//!
//!     loop {
//!         video.pump_events();
//!         while let Some(event) = video.poll_event() {
//!             if event == Event::Quit {
//!                 video.destroy_window(window)?;
//!                 return Ok(());
//!             }
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod audio;
pub mod config;
pub mod events;
pub mod foundation;
pub mod input;
pub mod toolkit;
pub mod video;

/// Common imports for platform layer users
pub mod prelude {
    pub use crate::{
        audio::{
            AudioBackend, AudioError, AudioResult, AudioSpec, CharDeviceSink, Direction,
            SampleFormat,
        },
        config::{AudioSettings, Config, ConfigError, PlatformConfig, VideoSettings},
        events::{Event, EventQueue},
        foundation::geometry::{Point, Rect, Size},
        input::{KeySym, Keycode, Modifiers, MouseButton, NativeKey, Scancode},
        toolkit::{LoopbackToolkit, NativeWindow, Toolkit, ToolkitEvent, WindowOptions},
        video::{
            DisplayMode, FramebufferInfo, PixelFormat, VideoBackend, VideoContext, VideoError,
            VideoResult, WindowFramebuffer, WindowId, WindowState,
        },
    };
}
