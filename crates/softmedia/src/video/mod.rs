//! Video backend: windows, framebuffers, and the event pump
//!
//! # Architecture Overview
//!
//! ```text
//! Application
//!      |  window/framebuffer ops, pump_events, poll_event
//!      v
//! VideoContext ----- translate -----> EventQueue
//!      |                                  ^
//!      |  Toolkit trait calls             |  generic events
//!      v                                  |
//! Native toolkit --- ToolkitEvent --------+
//! ```
//!
//! The context owns every window; applications refer to windows through
//! generational [`WindowId`]s that become invalid on destroy. One backend
//! implementation is selected at build/config time through the
//! [`VideoBackend`] capability trait.

pub mod context;
pub mod framebuffer;

pub use context::VideoContext;
pub use framebuffer::WindowFramebuffer;

use crate::events::Event;
use crate::foundation::geometry::{Rect, Size};
use crate::toolkit::WindowOptions;
use thiserror::Error;

/// Video backend errors
#[derive(Error, Debug)]
pub enum VideoError {
    /// The context was initialized twice
    #[error("video context already initialized")]
    AlreadyInitialized,

    /// An operation ran before initialization
    #[error("video context not initialized")]
    NotInitialized,

    /// The toolkit could not create a window
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// The toolkit could not allocate a drawable surface
    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),

    /// The window handle is stale or was never valid
    #[error("invalid window handle")]
    InvalidWindow,

    /// The window has no framebuffer
    #[error("window has no framebuffer")]
    NoFramebuffer,

    /// A pixel buffer allocation failed
    #[error("out of memory allocating a framebuffer")]
    OutOfMemory,
}

/// Convenience alias for video results
pub type VideoResult<T> = Result<T, VideoError>;

slotmap::new_key_type! {
    /// Generational handle to a window owned by the context
    ///
    /// Destroying the window invalidates the handle; later operations with
    /// it fail with [`VideoError::InvalidWindow`].
    pub struct WindowId;
}

/// Pixel format of every surface this backend produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32 bits per pixel, 8 bits each of red, green, blue; top byte unused
    Xrgb8888,
}

impl PixelFormat {
    /// Bytes per pixel for this format
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Xrgb8888 => 4,
        }
    }
}

/// A display mode reported for the single display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    /// Horizontal resolution in pixels
    pub width: u32,
    /// Vertical resolution in pixels
    pub height: u32,
    /// Refresh rate in Hz
    pub refresh_rate: u32,
    /// Pixel format
    pub format: PixelFormat,
}

const fn mode(width: u32, height: u32) -> DisplayMode {
    DisplayMode {
        width,
        height,
        refresh_rate: 60,
        format: PixelFormat::Xrgb8888,
    }
}

/// Modes reported for the single display, all at 60 Hz
pub const DISPLAY_MODES: [DisplayMode; 5] = [
    mode(640, 480),
    mode(800, 600),
    mode(1024, 768),
    mode(1280, 1024),
    mode(1920, 1080),
];

/// Lifecycle state of a window
///
/// Windows move Created -> Shown <-> Hidden and end at Destroyed, where the
/// handle disappears from the context. Resize and fullscreen changes do not
/// move a window between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Created but never shown
    Created,
    /// Currently visible
    Shown,
    /// Hidden after having been shown
    Hidden,
}

/// What a framebuffer creation reports back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferInfo {
    /// Fixed pixel format of the buffer
    pub format: PixelFormat,
    /// Buffer dimensions, equal to the window size at creation
    pub size: Size,
    /// Bytes per row
    pub pitch: usize,
}

/// Capability set a video backend must implement
///
/// The generic side of the device contract: one implementation drives one
/// native windowing system. All operations are single-threaded and
/// synchronous.
pub trait VideoBackend {
    /// Initialize the backend
    ///
    /// # Errors
    /// Fails with [`VideoError::AlreadyInitialized`] on a second call.
    fn init(&mut self) -> VideoResult<()>;

    /// Modes available on the single display
    fn display_modes(&self) -> &[DisplayMode];

    /// Select a display mode
    ///
    /// The request is accepted and ignored: the display keeps running in
    /// its current mode. This mirrors the device contract, which treats
    /// mode selection as advisory.
    ///
    /// # Errors
    /// Fails when the backend is not initialized.
    fn set_display_mode(&mut self, mode: DisplayMode) -> VideoResult<()>;

    /// Create a native window and register it with the context
    ///
    /// # Errors
    /// Fails when the backend is not initialized or the toolkit rejects
    /// the window.
    fn create_window(&mut self, options: &WindowOptions) -> VideoResult<WindowId>;

    /// Ask the toolkit to show a window
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    fn show_window(&mut self, window: WindowId) -> VideoResult<()>;

    /// Ask the toolkit to hide a window
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    fn hide_window(&mut self, window: WindowId) -> VideoResult<()>;

    /// Update a window's title bar text
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    fn set_window_title(&mut self, window: WindowId, title: &str) -> VideoResult<()>;

    /// Ask the toolkit to resize a window's client area
    ///
    /// The tracked size changes when the toolkit reports the resize back
    /// through the pump.
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    fn set_window_size(&mut self, window: WindowId, size: Size) -> VideoResult<()>;

    /// Enter or leave fullscreen
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    fn set_fullscreen(&mut self, window: WindowId, fullscreen: bool) -> VideoResult<()>;

    /// Destroy a window, its framebuffer, and its native surface
    ///
    /// The handle becomes invalid; later operations with it fail with
    /// [`VideoError::InvalidWindow`].
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    fn destroy_window(&mut self, window: WindowId) -> VideoResult<()>;

    /// Allocate the window's framebuffer and native surface at the
    /// window's current size
    ///
    /// # Errors
    /// Fails on a stale handle, on allocation failure, or when the toolkit
    /// cannot allocate the surface.
    fn create_framebuffer(&mut self, window: WindowId) -> VideoResult<FramebufferInfo>;

    /// Mutable access to the window's framebuffer for drawing
    ///
    /// # Errors
    /// Fails on a stale handle or when no framebuffer exists.
    fn framebuffer_mut(&mut self, window: WindowId) -> VideoResult<&mut WindowFramebuffer>;

    /// Copy damaged regions into the native surface and schedule repaints
    ///
    /// Pumps pending native events once after the blit.
    ///
    /// # Errors
    /// Fails on a stale handle or when no framebuffer exists.
    ///
    /// # Panics
    /// Asserts that the framebuffer size still matches the window size; a
    /// mismatch is a caller error, not a recoverable condition.
    fn update_framebuffer(&mut self, window: WindowId, damage: &[Rect]) -> VideoResult<()>;

    /// Release the window's framebuffer and native surface
    ///
    /// A window without a framebuffer is left untouched; the native
    /// surface is released exactly once.
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    fn destroy_framebuffer(&mut self, window: WindowId) -> VideoResult<()>;

    /// Drain all pending native events through translation into the queue
    ///
    /// Terminates the process when the native loop has requested exit.
    fn pump_events(&mut self);

    /// Pop the oldest translated event, if any
    fn poll_event(&mut self) -> Option<Event>;

    /// Tear down every window and return to the uninitialized state
    fn quit(&mut self);
}
