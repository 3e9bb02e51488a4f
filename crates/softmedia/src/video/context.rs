//! Window registry and native event translation

use super::{
    DisplayMode, FramebufferInfo, VideoBackend, VideoError, VideoResult, WindowFramebuffer,
    WindowId, WindowState, DISPLAY_MODES,
};
use crate::events::{Event, EventQueue};
use crate::foundation::geometry::{Rect, Size};
use crate::input::{translate, KeySym};
use crate::toolkit::{NativeWindow, Toolkit, ToolkitEvent, WindowOptions};
use slotmap::SlotMap;
use std::collections::HashMap;

/// Per-window bookkeeping kept by the context
struct PlatformWindow {
    native: NativeWindow,
    state: WindowState,
    size: Size,
    fullscreen: bool,
    framebuffer: Option<WindowFramebuffer>,
    has_surface: bool,
}

/// The video backend driving one native toolkit
///
/// Owns every window created through it, translates toolkit events into
/// generic [`Event`]s, and tears everything down on [`VideoBackend::quit`]
/// or drop. Construction is explicit; there is no process-global instance.
pub struct VideoContext {
    toolkit: Box<dyn Toolkit>,
    windows: SlotMap<WindowId, PlatformWindow>,
    by_native: HashMap<NativeWindow, WindowId>,
    events: EventQueue,
    mouse_focus: Option<WindowId>,
    initialized: bool,
}

impl VideoContext {
    /// Create a context around a native toolkit
    ///
    /// The context starts uninitialized; call [`VideoBackend::init`] before
    /// creating windows.
    pub fn new(toolkit: Box<dyn Toolkit>) -> Self {
        Self {
            toolkit,
            windows: SlotMap::with_key(),
            by_native: HashMap::new(),
            events: EventQueue::new(),
            mouse_focus: None,
            initialized: false,
        }
    }

    /// Whether [`VideoBackend::init`] has run
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Window currently containing the pointer, if any
    #[must_use]
    pub const fn mouse_focus(&self) -> Option<WindowId> {
        self.mouse_focus
    }

    /// Lifecycle state of a window
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    pub fn window_state(&self, window: WindowId) -> VideoResult<WindowState> {
        self.windows
            .get(window)
            .map(|win| win.state)
            .ok_or(VideoError::InvalidWindow)
    }

    /// Tracked client size of a window
    ///
    /// Updates when the toolkit reports a resize through the pump, so this
    /// always matches the dimensions the latest resize event carried.
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    pub fn window_size(&self, window: WindowId) -> VideoResult<Size> {
        self.windows
            .get(window)
            .map(|win| win.size)
            .ok_or(VideoError::InvalidWindow)
    }

    /// Whether a window is tracked as fullscreen
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    pub fn window_fullscreen(&self, window: WindowId) -> VideoResult<bool> {
        self.windows
            .get(window)
            .map(|win| win.fullscreen)
            .ok_or(VideoError::InvalidWindow)
    }

    /// Toolkit identifier behind a window handle
    ///
    /// # Errors
    /// Fails with [`VideoError::InvalidWindow`] on a stale handle.
    pub fn native_window(&self, window: WindowId) -> VideoResult<NativeWindow> {
        self.windows
            .get(window)
            .map(|win| win.native)
            .ok_or(VideoError::InvalidWindow)
    }

    /// Mutable access to the toolkit, for embedders that drive it directly
    pub fn toolkit_mut(&mut self) -> &mut dyn Toolkit {
        self.toolkit.as_mut()
    }

    fn dispatch(&mut self, event: ToolkitEvent) {
        match event {
            ToolkitEvent::Shown { window } => {
                if let Some(id) = self.by_native.get(&window).copied() {
                    if let Some(win) = self.windows.get_mut(id) {
                        win.state = WindowState::Shown;
                    }
                    self.events.push(Event::WindowShown { window: id });
                }
            }
            ToolkitEvent::Hidden { window } => {
                if let Some(id) = self.by_native.get(&window).copied() {
                    if let Some(win) = self.windows.get_mut(id) {
                        win.state = WindowState::Hidden;
                    }
                    self.events.push(Event::WindowHidden { window: id });
                }
            }
            ToolkitEvent::Resized {
                window,
                width,
                height,
            } => {
                if let Some(id) = self.by_native.get(&window).copied() {
                    if let Some(win) = self.windows.get_mut(id) {
                        win.size = Size::new(width, height);
                    }
                    self.events.push(Event::WindowResized {
                        window: id,
                        width,
                        height,
                    });
                }
            }
            ToolkitEvent::CloseRequested { .. } => {
                self.events.push(Event::Quit);
            }
            ToolkitEvent::Entered { window } => {
                if let Some(id) = self.by_native.get(&window).copied() {
                    self.mouse_focus = Some(id);
                    self.events.push(Event::MouseEntered { window: id });
                }
            }
            ToolkitEvent::Left { window } => {
                if let Some(id) = self.by_native.get(&window).copied() {
                    if self.mouse_focus == Some(id) {
                        self.mouse_focus = None;
                    }
                    self.events.push(Event::MouseLeft { window: id });
                }
            }
            ToolkitEvent::MouseMoved { window, x, y } => {
                if let Some(id) = self.by_native.get(&window).copied() {
                    self.events.push(Event::MouseMoved { window: id, x, y });
                }
            }
            ToolkitEvent::MouseButton {
                window,
                button,
                pressed,
                x,
                y,
            } => {
                if let Some(id) = self.by_native.get(&window).copied() {
                    // position update precedes the button event
                    self.events.push(Event::MouseMoved { window: id, x, y });
                    self.events.push(Event::MouseButton {
                        window: id,
                        button,
                        pressed,
                        x,
                        y,
                    });
                }
            }
            ToolkitEvent::Key {
                window,
                key,
                modifiers,
                pressed,
            } => {
                if let Some(id) = self.by_native.get(&window).copied() {
                    let (scancode, keycode) = translate(key);
                    let sym = KeySym {
                        scancode,
                        keycode,
                        modifiers,
                    };
                    self.events.push(Event::Key {
                        window: id,
                        sym,
                        pressed,
                    });
                }
            }
        }
    }
}

impl VideoBackend for VideoContext {
    fn init(&mut self) -> VideoResult<()> {
        if self.initialized {
            return Err(VideoError::AlreadyInitialized);
        }
        self.initialized = true;
        log::info!("video context initialized");
        Ok(())
    }

    fn display_modes(&self) -> &[DisplayMode] {
        &DISPLAY_MODES
    }

    fn set_display_mode(&mut self, mode: DisplayMode) -> VideoResult<()> {
        if !self.initialized {
            return Err(VideoError::NotInitialized);
        }
        log::debug!(
            "display mode change to {}x{} ignored",
            mode.width,
            mode.height
        );
        Ok(())
    }

    fn create_window(&mut self, options: &WindowOptions) -> VideoResult<WindowId> {
        if !self.initialized {
            return Err(VideoError::NotInitialized);
        }
        let native = self.toolkit.create_window(options)?;
        let id = self.windows.insert(PlatformWindow {
            native,
            state: WindowState::Created,
            size: options.size,
            fullscreen: options.fullscreen,
            framebuffer: None,
            has_surface: false,
        });
        self.by_native.insert(native, id);
        log::info!(
            "created window {:?} ({}x{}, \"{}\")",
            id,
            options.size.width,
            options.size.height,
            options.title
        );
        self.pump_events();
        Ok(id)
    }

    fn show_window(&mut self, window: WindowId) -> VideoResult<()> {
        let native = self.native_window(window)?;
        self.toolkit.show_window(native);
        Ok(())
    }

    fn hide_window(&mut self, window: WindowId) -> VideoResult<()> {
        let native = self.native_window(window)?;
        self.toolkit.hide_window(native);
        Ok(())
    }

    fn set_window_title(&mut self, window: WindowId, title: &str) -> VideoResult<()> {
        let native = self.native_window(window)?;
        self.toolkit.set_title(native, title);
        Ok(())
    }

    fn set_window_size(&mut self, window: WindowId, size: Size) -> VideoResult<()> {
        let native = self.native_window(window)?;
        self.toolkit.resize_window(native, size);
        Ok(())
    }

    fn set_fullscreen(&mut self, window: WindowId, fullscreen: bool) -> VideoResult<()> {
        let native = self.native_window(window)?;
        self.toolkit.set_fullscreen(native, fullscreen);
        if let Some(win) = self.windows.get_mut(window) {
            win.fullscreen = fullscreen;
        }
        Ok(())
    }

    fn destroy_window(&mut self, window: WindowId) -> VideoResult<()> {
        let win = self
            .windows
            .remove(window)
            .ok_or(VideoError::InvalidWindow)?;
        self.by_native.remove(&win.native);
        if self.mouse_focus == Some(window) {
            self.mouse_focus = None;
        }
        if win.has_surface {
            self.toolkit.destroy_surface(win.native);
        }
        self.toolkit.destroy_window(win.native);
        log::info!("destroyed window {:?}", window);
        Ok(())
    }

    fn create_framebuffer(&mut self, window: WindowId) -> VideoResult<FramebufferInfo> {
        let win = self
            .windows
            .get_mut(window)
            .ok_or(VideoError::InvalidWindow)?;
        let native = win.native;
        let size = win.size;
        let framebuffer = WindowFramebuffer::new(size)?;
        let info = framebuffer.info();
        win.framebuffer = Some(framebuffer);
        self.toolkit.create_surface(native, size)?;
        win.has_surface = true;
        log::debug!(
            "created {}x{} framebuffer for window {:?}, pitch {}",
            size.width,
            size.height,
            window,
            info.pitch
        );
        Ok(info)
    }

    fn framebuffer_mut(&mut self, window: WindowId) -> VideoResult<&mut WindowFramebuffer> {
        self.windows
            .get_mut(window)
            .ok_or(VideoError::InvalidWindow)?
            .framebuffer
            .as_mut()
            .ok_or(VideoError::NoFramebuffer)
    }

    fn update_framebuffer(&mut self, window: WindowId, damage: &[Rect]) -> VideoResult<()> {
        let win = self
            .windows
            .get(window)
            .ok_or(VideoError::InvalidWindow)?;
        let framebuffer = win.framebuffer.as_ref().ok_or(VideoError::NoFramebuffer)?;
        assert!(
            framebuffer.size() == win.size,
            "framebuffer {}x{} does not match window {}x{}",
            framebuffer.size().width,
            framebuffer.size().height,
            win.size.width,
            win.size.height
        );
        let native = win.native;
        let pitch = framebuffer.pitch_pixels();
        for &region in damage {
            self.toolkit
                .blit_surface(native, region, framebuffer.pixels(), pitch);
            self.toolkit.schedule_repaint(native, region);
        }
        self.pump_events();
        Ok(())
    }

    fn destroy_framebuffer(&mut self, window: WindowId) -> VideoResult<()> {
        let win = self
            .windows
            .get_mut(window)
            .ok_or(VideoError::InvalidWindow)?;
        win.framebuffer = None;
        if win.has_surface {
            win.has_surface = false;
            let native = win.native;
            self.toolkit.destroy_surface(native);
        }
        Ok(())
    }

    fn pump_events(&mut self) {
        if self.toolkit.exit_requested() {
            log::info!("native event loop exited, terminating");
            std::process::exit(0);
        }
        while let Some(event) = self.toolkit.poll_event() {
            self.dispatch(event);
        }
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.events.poll()
    }

    fn quit(&mut self) {
        if !self.initialized {
            return;
        }
        let ids: Vec<WindowId> = self.windows.keys().collect();
        for id in ids {
            let _ = self.destroy_window(id);
        }
        self.events.clear();
        self.mouse_focus = None;
        self.initialized = false;
        log::info!("video context shut down");
    }
}

impl Drop for VideoContext {
    fn drop(&mut self) {
        if self.initialized {
            self.quit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Keycode, Modifiers, MouseButton, NativeKey, Scancode};
    use crate::toolkit::LoopbackToolkit;
    use crate::video::PixelFormat;

    fn context() -> VideoContext {
        let mut video = VideoContext::new(Box::new(LoopbackToolkit::new()));
        video.init().unwrap();
        video
    }

    fn loopback(video: &mut VideoContext) -> &mut LoopbackToolkit {
        video
            .toolkit_mut()
            .as_any_mut()
            .downcast_mut::<LoopbackToolkit>()
            .unwrap()
    }

    #[test]
    fn test_double_init_is_rejected() {
        let mut video = context();
        assert!(matches!(video.init(), Err(VideoError::AlreadyInitialized)));
        assert!(video.is_initialized());
    }

    #[test]
    fn test_create_window_requires_init() {
        let mut video = VideoContext::new(Box::new(LoopbackToolkit::new()));
        let result = video.create_window(&WindowOptions::new("too early", 100, 100));
        assert!(matches!(result, Err(VideoError::NotInitialized)));
    }

    #[test]
    fn test_window_lifecycle_states() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("lifecycle", 320, 200))
            .unwrap();
        assert_eq!(video.window_state(id).unwrap(), WindowState::Created);

        video.show_window(id).unwrap();
        video.pump_events();
        assert_eq!(video.window_state(id).unwrap(), WindowState::Shown);
        assert_eq!(video.poll_event(), Some(Event::WindowShown { window: id }));

        video.hide_window(id).unwrap();
        video.pump_events();
        assert_eq!(video.window_state(id).unwrap(), WindowState::Hidden);
        assert_eq!(video.poll_event(), Some(Event::WindowHidden { window: id }));

        video.show_window(id).unwrap();
        video.pump_events();
        assert_eq!(video.window_state(id).unwrap(), WindowState::Shown);
    }

    #[test]
    fn test_resize_event_carries_new_size_before_paint() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("resize", 640, 480))
            .unwrap();

        video.set_window_size(id, Size::new(800, 600)).unwrap();
        // tracked size changes only once the toolkit reports back
        assert_eq!(video.window_size(id).unwrap(), Size::new(640, 480));

        video.pump_events();
        assert_eq!(
            video.poll_event(),
            Some(Event::WindowResized {
                window: id,
                width: 800,
                height: 600,
            })
        );
        assert_eq!(video.window_size(id).unwrap(), Size::new(800, 600));

        let info = video.create_framebuffer(id).unwrap();
        assert_eq!(info.size, Size::new(800, 600));
        assert_eq!(info.pitch, 800 * 4);
    }

    #[test]
    fn test_framebuffer_pitch_is_width_times_four() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("pitch", 640, 480))
            .unwrap();
        let info = video.create_framebuffer(id).unwrap();
        assert_eq!(info.pitch, 2560);
        assert_eq!(info.format, PixelFormat::Xrgb8888);
    }

    #[test]
    fn test_update_framebuffer_blits_damage() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("paint", 64, 32))
            .unwrap();
        video.create_framebuffer(id).unwrap();
        video.framebuffer_mut(id).unwrap().fill(0x00ff_0000);
        video
            .update_framebuffer(id, &[Rect::new(0, 0, 64, 32)])
            .unwrap();

        let native = video.native_window(id).unwrap();
        let toolkit = loopback(&mut video);
        assert_eq!(toolkit.surface_pixel(native, 0, 0), Some(0x00ff_0000));
        assert_eq!(toolkit.surface_pixel(native, 63, 31), Some(0x00ff_0000));
        assert_eq!(toolkit.repaint_log().len(), 1);
    }

    #[test]
    fn test_update_framebuffer_clamps_damage() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("clamp", 64, 32))
            .unwrap();
        video.create_framebuffer(id).unwrap();
        video.framebuffer_mut(id).unwrap().fill(0x00aa_aaaa);
        video
            .update_framebuffer(id, &[Rect::new(60, 30, 16, 16)])
            .unwrap();

        let native = video.native_window(id).unwrap();
        let toolkit = loopback(&mut video);
        assert_eq!(toolkit.surface_pixel(native, 60, 30), Some(0x00aa_aaaa));
        assert_eq!(toolkit.surface_pixel(native, 63, 31), Some(0x00aa_aaaa));
        assert_eq!(toolkit.surface_pixel(native, 59, 30), Some(0));
        assert_eq!(toolkit.surface_pixel(native, 60, 29), Some(0));
    }

    #[test]
    #[should_panic(expected = "does not match window")]
    fn test_update_framebuffer_size_mismatch_panics() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("stale buffer", 64, 64))
            .unwrap();
        video.create_framebuffer(id).unwrap();
        video.set_window_size(id, Size::new(128, 128)).unwrap();
        video.pump_events();
        let _ = video.update_framebuffer(id, &[Rect::new(0, 0, 1, 1)]);
    }

    #[test]
    fn test_update_framebuffer_without_buffer_fails() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("no buffer", 32, 32))
            .unwrap();
        let result = video.update_framebuffer(id, &[]);
        assert!(matches!(result, Err(VideoError::NoFramebuffer)));
    }

    #[test]
    fn test_destroy_window_releases_surface_exactly_once() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("short lived", 32, 32))
            .unwrap();
        video.create_framebuffer(id).unwrap();
        let native = video.native_window(id).unwrap();

        video.destroy_window(id).unwrap();

        let toolkit = loopback(&mut video);
        assert_eq!(toolkit.surface_destroy_count(native), 1);
        assert!(!toolkit.window_exists(native));
        assert!(matches!(
            video.window_state(id),
            Err(VideoError::InvalidWindow)
        ));
        assert!(matches!(
            video.show_window(id),
            Err(VideoError::InvalidWindow)
        ));
        assert!(matches!(
            video.destroy_window(id),
            Err(VideoError::InvalidWindow)
        ));
    }

    #[test]
    fn test_destroy_framebuffer_then_window_releases_once() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("tidy", 32, 32))
            .unwrap();
        video.create_framebuffer(id).unwrap();
        let native = video.native_window(id).unwrap();

        video.destroy_framebuffer(id).unwrap();
        video.destroy_framebuffer(id).unwrap();
        video.destroy_window(id).unwrap();

        assert_eq!(loopback(&mut video).surface_destroy_count(native), 1);
    }

    #[test]
    fn test_close_request_becomes_quit() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("closing", 32, 32))
            .unwrap();
        let native = video.native_window(id).unwrap();

        loopback(&mut video).push_event(ToolkitEvent::CloseRequested { window: native });
        video.pump_events();
        assert_eq!(video.poll_event(), Some(Event::Quit));
    }

    #[test]
    fn test_button_event_is_preceded_by_position_update() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("clicks", 100, 100))
            .unwrap();
        let native = video.native_window(id).unwrap();

        loopback(&mut video).push_event(ToolkitEvent::MouseButton {
            window: native,
            button: MouseButton::Left,
            pressed: true,
            x: 10,
            y: 20,
        });
        video.pump_events();

        assert_eq!(
            video.poll_event(),
            Some(Event::MouseMoved {
                window: id,
                x: 10,
                y: 20,
            })
        );
        assert_eq!(
            video.poll_event(),
            Some(Event::MouseButton {
                window: id,
                button: MouseButton::Left,
                pressed: true,
                x: 10,
                y: 20,
            })
        );
    }

    #[test]
    fn test_enter_and_leave_track_mouse_focus() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("hover", 100, 100))
            .unwrap();
        let native = video.native_window(id).unwrap();
        assert_eq!(video.mouse_focus(), None);

        loopback(&mut video).push_event(ToolkitEvent::Entered { window: native });
        video.pump_events();
        assert_eq!(video.mouse_focus(), Some(id));
        assert_eq!(video.poll_event(), Some(Event::MouseEntered { window: id }));

        loopback(&mut video).push_event(ToolkitEvent::Left { window: native });
        video.pump_events();
        assert_eq!(video.mouse_focus(), None);
        assert_eq!(video.poll_event(), Some(Event::MouseLeft { window: id }));
    }

    #[test]
    fn test_key_events_run_the_translation_tables() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("typing", 100, 100))
            .unwrap();
        let native = video.native_window(id).unwrap();

        loopback(&mut video).push_event(ToolkitEvent::Key {
            window: native,
            key: NativeKey(69),
            modifiers: Modifiers::SHIFT,
            pressed: true,
        });
        video.pump_events();

        match video.poll_event() {
            Some(Event::Key {
                window,
                sym,
                pressed,
            }) => {
                assert_eq!(window, id);
                assert!(pressed);
                assert_eq!(sym.scancode, Scancode::A);
                assert_eq!(sym.keycode, Keycode::Char('a'));
                assert_eq!(sym.modifiers, Modifiers::SHIFT);
            }
            other => panic!("expected a key event, got {other:?}"),
        }
    }

    #[test]
    fn test_pump_preserves_arrival_order() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("ordered", 100, 100))
            .unwrap();
        let native = video.native_window(id).unwrap();

        {
            let toolkit = loopback(&mut video);
            toolkit.push_event(ToolkitEvent::Entered { window: native });
            toolkit.push_event(ToolkitEvent::MouseMoved {
                window: native,
                x: 5,
                y: 6,
            });
            toolkit.push_event(ToolkitEvent::Left { window: native });
        }
        video.pump_events();

        assert_eq!(video.poll_event(), Some(Event::MouseEntered { window: id }));
        assert_eq!(
            video.poll_event(),
            Some(Event::MouseMoved {
                window: id,
                x: 5,
                y: 6,
            })
        );
        assert_eq!(video.poll_event(), Some(Event::MouseLeft { window: id }));
        assert_eq!(video.poll_event(), None);
    }

    #[test]
    fn test_display_mode_changes_are_accepted_and_ignored() {
        let mut video = context();
        assert_eq!(video.display_modes().len(), 5);
        assert_eq!(video.display_modes()[0].width, 640);
        assert_eq!(video.display_modes()[4].height, 1080);
        assert!(video
            .display_modes()
            .iter()
            .all(|mode| mode.refresh_rate == 60));

        let mode = video.display_modes()[4];
        video.set_display_mode(mode).unwrap();
    }

    #[test]
    fn test_set_title_reaches_the_toolkit() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("before", 100, 100))
            .unwrap();
        let native = video.native_window(id).unwrap();

        video.set_window_title(id, "after").unwrap();
        assert_eq!(loopback(&mut video).window_title(native), Some("after"));
    }

    #[test]
    fn test_fullscreen_is_forwarded_and_tracked() {
        let mut video = context();
        let id = video
            .create_window(&WindowOptions::new("big", 100, 100))
            .unwrap();
        let native = video.native_window(id).unwrap();
        assert!(!video.window_fullscreen(id).unwrap());

        video.set_fullscreen(id, true).unwrap();
        assert!(video.window_fullscreen(id).unwrap());
        assert!(loopback(&mut video).window_fullscreen(native));
    }

    #[test]
    fn test_quit_destroys_all_windows_and_allows_reinit() {
        let mut video = context();
        let first = video
            .create_window(&WindowOptions::new("first", 32, 32))
            .unwrap();
        let second = video
            .create_window(&WindowOptions::new("second", 32, 32))
            .unwrap();
        video.create_framebuffer(first).unwrap();

        video.quit();
        assert!(!video.is_initialized());
        assert!(matches!(
            video.window_state(first),
            Err(VideoError::InvalidWindow)
        ));
        assert!(matches!(
            video.window_state(second),
            Err(VideoError::InvalidWindow)
        ));

        video.init().unwrap();
        let reborn = video
            .create_window(&WindowOptions::new("reborn", 32, 32))
            .unwrap();
        assert_eq!(video.window_state(reborn).unwrap(), WindowState::Created);
    }
}
