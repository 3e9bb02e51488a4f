//! Native toolkit boundary
//!
//! Everything the video backend needs from the OS windowing toolkit is
//! expressed through the object-safe [`Toolkit`] trait: window and surface
//! management calls going out, [`ToolkitEvent`]s coming back through a
//! non-blocking poll. A production implementation wraps the OS GUI library;
//! [`LoopbackToolkit`] is the in-process realization used by tests and
//! demos.

pub mod loopback;

pub use loopback::LoopbackToolkit;

use crate::foundation::geometry::{Rect, Size};
use crate::input::{Modifiers, MouseButton, NativeKey};
use crate::video::VideoError;

/// Identifier of a window object inside the native toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeWindow(pub u32);

/// Creation parameters for a native window
#[derive(Debug, Clone)]
pub struct WindowOptions {
    /// Title bar text
    pub title: String,
    /// Initial client size in pixels
    pub size: Size,
    /// Whether the user may resize the window
    ///
    /// Off by default: the framebuffer contract requires sizes to change
    /// only through the backend.
    pub resizable: bool,
    /// Whether the toolkit double-buffers paints
    ///
    /// Off by default: the backend blits complete frames itself.
    pub double_buffered: bool,
    /// Whether the toolkit pre-fills the background before paint events
    pub fill_with_background: bool,
    /// Whether the window starts fullscreen
    pub fullscreen: bool,
}

impl WindowOptions {
    /// Options for a fixed-size window with the defaults the framebuffer
    /// path expects
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            size: Size::new(width, height),
            resizable: false,
            double_buffered: false,
            fill_with_background: false,
            fullscreen: false,
        }
    }
}

/// An input or lifecycle event reported by the native toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolkitEvent {
    /// A window became visible
    Shown {
        /// Affected window
        window: NativeWindow,
    },
    /// A window became hidden
    Hidden {
        /// Affected window
        window: NativeWindow,
    },
    /// A window's client area changed size
    Resized {
        /// Affected window
        window: NativeWindow,
        /// New client width in pixels
        width: u32,
        /// New client height in pixels
        height: u32,
    },
    /// The user asked to close a window
    CloseRequested {
        /// Affected window
        window: NativeWindow,
    },
    /// The pointer entered a window
    Entered {
        /// Affected window
        window: NativeWindow,
    },
    /// The pointer left a window
    Left {
        /// Affected window
        window: NativeWindow,
    },
    /// The pointer moved
    MouseMoved {
        /// Window under the pointer
        window: NativeWindow,
        /// Pointer x in window coordinates
        x: i32,
        /// Pointer y in window coordinates
        y: i32,
    },
    /// A mouse button changed state
    MouseButton {
        /// Window under the pointer
        window: NativeWindow,
        /// Button that changed
        button: MouseButton,
        /// True on press, false on release
        pressed: bool,
        /// Pointer x at the time of the change
        x: i32,
        /// Pointer y at the time of the change
        y: i32,
    },
    /// A key changed state
    Key {
        /// Window with keyboard focus
        window: NativeWindow,
        /// Toolkit key identifier, fed through the translation tables
        key: NativeKey,
        /// Modifier state reported with the event
        modifiers: Modifiers,
        /// True on press, false on release
        pressed: bool,
    },
}

/// Operations the video backend requires from the native toolkit
///
/// Object safe: the video context stores a `Box<dyn Toolkit>`. All calls
/// are synchronous and single-threaded; window identifiers the toolkit has
/// not handed out are ignored by the forwarding calls.
pub trait Toolkit {
    /// Create a native window and return its toolkit identifier
    ///
    /// # Errors
    /// Fails when the toolkit cannot realize the window.
    fn create_window(&mut self, options: &WindowOptions) -> Result<NativeWindow, VideoError>;

    /// Make a window visible
    fn show_window(&mut self, window: NativeWindow);

    /// Hide a window without destroying it
    fn hide_window(&mut self, window: NativeWindow);

    /// Update the title bar text
    fn set_title(&mut self, window: NativeWindow, title: &str);

    /// Resize the window's client area
    fn resize_window(&mut self, window: NativeWindow, size: Size);

    /// Enter or leave fullscreen
    fn set_fullscreen(&mut self, window: NativeWindow, fullscreen: bool);

    /// Destroy the native window and everything attached to it
    fn destroy_window(&mut self, window: NativeWindow);

    /// Current client size of a window
    fn window_size(&self, window: NativeWindow) -> Size;

    /// Allocate the drawable surface for a window, replacing any previous
    /// surface
    ///
    /// # Errors
    /// Fails when the window does not exist or the surface cannot be
    /// allocated.
    fn create_surface(&mut self, window: NativeWindow, size: Size) -> Result<(), VideoError>;

    /// Copy a damaged region of caller pixels into the window surface
    ///
    /// `pixels` is the caller's full buffer in row-major XRGB order with
    /// `pitch` pixels per row; only `region`, clamped to the surface
    /// bounds, is copied.
    fn blit_surface(&mut self, window: NativeWindow, region: Rect, pixels: &[u32], pitch: usize);

    /// Ask the toolkit to repaint a region from the window surface
    fn schedule_repaint(&mut self, window: NativeWindow, region: Rect);

    /// Release the drawable surface
    fn destroy_surface(&mut self, window: NativeWindow);

    /// Take the next pending event, if any (non-blocking)
    fn poll_event(&mut self) -> Option<ToolkitEvent>;

    /// Whether the native event loop has requested process exit
    ///
    /// When this reports true, the event pump terminates the process.
    fn exit_requested(&self) -> bool;

    /// Concrete-type access for embedders that own the toolkit
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable concrete-type access for embedders that own the toolkit
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
