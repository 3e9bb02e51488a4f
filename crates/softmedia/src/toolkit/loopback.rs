//! In-process toolkit used by tests and demos
//!
//! Implements the full toolkit contract against plain in-memory state:
//! windows are table entries, surfaces are pixel vectors, and input is
//! whatever the embedder scripts through [`LoopbackToolkit::push_event`].
//! Visibility and resize calls report back as events the way a real
//! toolkit does, which makes lifecycle transitions observable without a
//! display server.

use super::{NativeWindow, Toolkit, ToolkitEvent, WindowOptions};
use crate::foundation::geometry::{Rect, Size};
use crate::video::VideoError;
use std::collections::{HashMap, VecDeque};

#[derive(Debug)]
struct LoopbackWindow {
    title: String,
    size: Size,
    visible: bool,
    fullscreen: bool,
    surface: Option<Vec<u32>>,
    surface_size: Size,
}

/// Headless toolkit backed by in-memory window state
#[derive(Debug, Default)]
pub struct LoopbackToolkit {
    windows: HashMap<u32, LoopbackWindow>,
    next_id: u32,
    pending: VecDeque<ToolkitEvent>,
    exit_requested: bool,
    repaints: Vec<(NativeWindow, Rect)>,
    // tallies survive window destruction so release behavior stays
    // observable afterwards
    surface_destroys: HashMap<u32, u32>,
}

impl LoopbackToolkit {
    /// Create an empty toolkit with no windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a native event for the next pump
    pub fn push_event(&mut self, event: ToolkitEvent) {
        self.pending.push_back(event);
    }

    /// Flag the native loop's exit request
    ///
    /// The next pump terminates the process, so tests leave this alone.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Whether a window currently exists
    pub fn window_exists(&self, window: NativeWindow) -> bool {
        self.windows.contains_key(&window.0)
    }

    /// Recorded title of a window
    pub fn window_title(&self, window: NativeWindow) -> Option<&str> {
        self.windows.get(&window.0).map(|win| win.title.as_str())
    }

    /// Whether a window is currently visible
    pub fn window_visible(&self, window: NativeWindow) -> bool {
        self.windows.get(&window.0).is_some_and(|win| win.visible)
    }

    /// Whether a window is flagged fullscreen
    pub fn window_fullscreen(&self, window: NativeWindow) -> bool {
        self.windows.get(&window.0).is_some_and(|win| win.fullscreen)
    }

    /// Surface pixel at the given coordinates, for inspecting blits
    pub fn surface_pixel(&self, window: NativeWindow, x: u32, y: u32) -> Option<u32> {
        let win = self.windows.get(&window.0)?;
        let surface = win.surface.as_ref()?;
        if x >= win.surface_size.width || y >= win.surface_size.height {
            return None;
        }
        surface.get((y * win.surface_size.width + x) as usize).copied()
    }

    /// How many times `destroy_surface` was called for a window
    pub fn surface_destroy_count(&self, window: NativeWindow) -> u32 {
        self.surface_destroys.get(&window.0).copied().unwrap_or(0)
    }

    /// Regions scheduled for repaint, in call order
    pub fn repaint_log(&self) -> &[(NativeWindow, Rect)] {
        &self.repaints
    }
}

impl Toolkit for LoopbackToolkit {
    fn create_window(&mut self, options: &WindowOptions) -> Result<NativeWindow, VideoError> {
        self.next_id += 1;
        let id = self.next_id;
        self.windows.insert(
            id,
            LoopbackWindow {
                title: options.title.clone(),
                size: options.size,
                visible: false,
                fullscreen: options.fullscreen,
                surface: None,
                surface_size: Size::default(),
            },
        );
        Ok(NativeWindow(id))
    }

    fn show_window(&mut self, window: NativeWindow) {
        if let Some(win) = self.windows.get_mut(&window.0) {
            if !win.visible {
                win.visible = true;
                self.pending.push_back(ToolkitEvent::Shown { window });
            }
        }
    }

    fn hide_window(&mut self, window: NativeWindow) {
        if let Some(win) = self.windows.get_mut(&window.0) {
            if win.visible {
                win.visible = false;
                self.pending.push_back(ToolkitEvent::Hidden { window });
            }
        }
    }

    fn set_title(&mut self, window: NativeWindow, title: &str) {
        if let Some(win) = self.windows.get_mut(&window.0) {
            win.title = title.to_string();
        }
    }

    fn resize_window(&mut self, window: NativeWindow, size: Size) {
        if let Some(win) = self.windows.get_mut(&window.0) {
            if win.size != size {
                win.size = size;
                self.pending.push_back(ToolkitEvent::Resized {
                    window,
                    width: size.width,
                    height: size.height,
                });
            }
        }
    }

    fn set_fullscreen(&mut self, window: NativeWindow, fullscreen: bool) {
        if let Some(win) = self.windows.get_mut(&window.0) {
            win.fullscreen = fullscreen;
        }
    }

    fn destroy_window(&mut self, window: NativeWindow) {
        self.windows.remove(&window.0);
    }

    fn window_size(&self, window: NativeWindow) -> Size {
        self.windows.get(&window.0).map_or_else(Size::default, |win| win.size)
    }

    fn create_surface(&mut self, window: NativeWindow, size: Size) -> Result<(), VideoError> {
        match self.windows.get_mut(&window.0) {
            Some(win) => {
                win.surface = Some(vec![0; size.area()]);
                win.surface_size = size;
                Ok(())
            }
            None => Err(VideoError::SurfaceCreation(format!(
                "no such window {}",
                window.0
            ))),
        }
    }

    fn blit_surface(&mut self, window: NativeWindow, region: Rect, pixels: &[u32], pitch: usize) {
        if let Some(win) = self.windows.get_mut(&window.0) {
            if let Some(surface) = win.surface.as_mut() {
                let clipped = region.intersection(Rect::from_size(win.surface_size));
                if clipped.is_empty() {
                    return;
                }
                let width = clipped.width as usize;
                let stride = win.surface_size.width as usize;
                for row in 0..clipped.height as usize {
                    let y = clipped.y as usize + row;
                    let src_start = y * pitch + clipped.x as usize;
                    let dst_start = y * stride + clipped.x as usize;
                    if let Some(src) = pixels.get(src_start..src_start + width) {
                        surface[dst_start..dst_start + width].copy_from_slice(src);
                    }
                }
            }
        }
    }

    fn schedule_repaint(&mut self, window: NativeWindow, region: Rect) {
        self.repaints.push((window, region));
    }

    fn destroy_surface(&mut self, window: NativeWindow) {
        *self.surface_destroys.entry(window.0).or_insert(0) += 1;
        if let Some(win) = self.windows.get_mut(&window.0) {
            win.surface = None;
            win.surface_size = Size::default();
        }
    }

    fn poll_event(&mut self) -> Option<ToolkitEvent> {
        self.pending.pop_front()
    }

    fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_window(toolkit: &mut LoopbackToolkit) -> NativeWindow {
        toolkit
            .create_window(&WindowOptions::new("test", 64, 32))
            .unwrap()
    }

    #[test]
    fn test_show_reports_back_once() {
        let mut toolkit = LoopbackToolkit::new();
        let window = make_window(&mut toolkit);

        toolkit.show_window(window);
        toolkit.show_window(window);

        assert_eq!(toolkit.poll_event(), Some(ToolkitEvent::Shown { window }));
        assert_eq!(toolkit.poll_event(), None);
        assert!(toolkit.window_visible(window));
    }

    #[test]
    fn test_resize_reports_new_size() {
        let mut toolkit = LoopbackToolkit::new();
        let window = make_window(&mut toolkit);

        toolkit.resize_window(window, Size::new(128, 96));

        assert_eq!(toolkit.window_size(window), Size::new(128, 96));
        assert_eq!(
            toolkit.poll_event(),
            Some(ToolkitEvent::Resized {
                window,
                width: 128,
                height: 96
            })
        );
    }

    #[test]
    fn test_blit_clamps_to_surface_bounds() {
        let mut toolkit = LoopbackToolkit::new();
        let window = make_window(&mut toolkit);
        toolkit.create_surface(window, Size::new(64, 32)).unwrap();

        let pixels = vec![0x00ff_00ff; 64 * 32];
        toolkit.blit_surface(window, Rect::new(60, 30, 16, 16), &pixels, 64);

        assert_eq!(toolkit.surface_pixel(window, 60, 30), Some(0x00ff_00ff));
        assert_eq!(toolkit.surface_pixel(window, 63, 31), Some(0x00ff_00ff));
        assert_eq!(toolkit.surface_pixel(window, 59, 30), Some(0));
        assert_eq!(toolkit.surface_pixel(window, 64, 31), None);
    }

    #[test]
    fn test_destroy_count_survives_window_destruction() {
        let mut toolkit = LoopbackToolkit::new();
        let window = make_window(&mut toolkit);
        toolkit.create_surface(window, Size::new(64, 32)).unwrap();

        toolkit.destroy_surface(window);
        toolkit.destroy_window(window);

        assert!(!toolkit.window_exists(window));
        assert_eq!(toolkit.surface_destroy_count(window), 1);
    }

    #[test]
    fn test_scripted_events_arrive_in_order() {
        let mut toolkit = LoopbackToolkit::new();
        let window = make_window(&mut toolkit);

        toolkit.push_event(ToolkitEvent::Entered { window });
        toolkit.push_event(ToolkitEvent::MouseMoved { window, x: 5, y: 6 });
        toolkit.push_event(ToolkitEvent::Left { window });

        assert_eq!(toolkit.poll_event(), Some(ToolkitEvent::Entered { window }));
        assert_eq!(
            toolkit.poll_event(),
            Some(ToolkitEvent::MouseMoved { window, x: 5, y: 6 })
        );
        assert_eq!(toolkit.poll_event(), Some(ToolkitEvent::Left { window }));
        assert_eq!(toolkit.poll_event(), None);
    }
}
