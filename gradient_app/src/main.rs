//! Gradient demo application
//!
//! Paints a scrolling color gradient into a software framebuffer and plays
//! a short tone, driving the whole platform layer end to end. Input comes
//! from a scripted loopback toolkit, so the demo runs headless.

use softmedia::prelude::*;
use std::path::Path;

const FRAMES: u32 = 120;
const TONE_PERIODS: u32 = 30;

pub struct GradientApp {
    video: VideoContext,
    window: WindowId,
}

impl GradientApp {
    pub fn new(config: &PlatformConfig) -> Result<Self, Box<dyn std::error::Error>> {
        log::info!("Creating gradient demo application...");
        let mut video = VideoContext::new(Box::new(LoopbackToolkit::new()));
        video.init()?;

        log::info!("Creating window...");
        let mut options = WindowOptions::new(
            config.video.title.clone(),
            config.video.width,
            config.video.height,
        );
        options.fullscreen = config.video.fullscreen;
        let window = video.create_window(&options)?;
        video.show_window(window)?;
        video.pump_events();
        video.create_framebuffer(window)?;
        log::info!("Window and framebuffer ready");

        Ok(Self { video, window })
    }

    /// Queue a handful of toolkit events so the drain loop has work to do
    fn script_input(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let native = self.video.native_window(self.window)?;
        if let Some(toolkit) = self
            .video
            .toolkit_mut()
            .as_any_mut()
            .downcast_mut::<LoopbackToolkit>()
        {
            toolkit.push_event(ToolkitEvent::Entered { window: native });
            toolkit.push_event(ToolkitEvent::MouseMoved {
                window: native,
                x: 320,
                y: 240,
            });
            toolkit.push_event(ToolkitEvent::MouseButton {
                window: native,
                button: MouseButton::Left,
                pressed: true,
                x: 320,
                y: 240,
            });
            toolkit.push_event(ToolkitEvent::Key {
                window: native,
                key: NativeKey(69),
                modifiers: Modifiers::empty(),
                pressed: true,
            });
        }
        Ok(())
    }

    pub fn run(&mut self, audio_device: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.script_input()?;
        play_tone(audio_device);

        for frame in 0..FRAMES {
            let size = self.video.window_size(self.window)?;
            self.paint(frame)?;
            self.video
                .update_framebuffer(self.window, &[Rect::from_size(size)])?;

            while let Some(event) = self.video.poll_event() {
                match event {
                    Event::Quit => {
                        log::info!("Quit requested");
                        self.video.destroy_window(self.window)?;
                        return Ok(());
                    }
                    Event::Key {
                        sym,
                        pressed: true,
                        ..
                    } if sym.keycode == Keycode::Escape => {
                        log::info!("Escape pressed");
                        self.video.destroy_window(self.window)?;
                        return Ok(());
                    }
                    Event::Key {
                        sym,
                        pressed: true,
                        ..
                    } => {
                        log::info!("Key pressed: {:?}", sym.keycode);
                    }
                    Event::MouseButton {
                        x, y, pressed: true, ..
                    } => {
                        log::info!("Click at ({x}, {y})");
                    }
                    _ => {}
                }
            }
        }

        self.video.destroy_window(self.window)?;
        log::info!("Gradient demo completed");
        Ok(())
    }

    fn paint(&mut self, frame: u32) -> Result<(), Box<dyn std::error::Error>> {
        let size = self.video.window_size(self.window)?;
        let framebuffer = self.video.framebuffer_mut(self.window)?;
        for y in 0..size.height {
            for x in 0..size.width {
                let red = x * 255 / size.width.max(1);
                let green = y * 255 / size.height.max(1);
                let blue = (frame * 2) % 256;
                framebuffer.set_pixel(x, y, (red << 16) | (green << 8) | blue);
            }
        }
        Ok(())
    }
}

/// Write a short 440 Hz tone, skipping audio when no device is available
fn play_tone(device: &Path) {
    let mut sink = CharDeviceSink::new(device);
    let spec = match sink.open(&AudioSpec::NATIVE, Direction::Playback) {
        Ok(spec) => spec,
        Err(err) => {
            log::warn!("audio unavailable: {err}");
            return;
        }
    };

    let mut phase = 0.0_f32;
    let step = 440.0 * std::f32::consts::TAU / spec.frequency as f32;
    for _ in 0..TONE_PERIODS {
        match sink.mix_samples_mut() {
            Ok(samples) => {
                for frame in samples.chunks_mut(spec.channels as usize) {
                    let value = (phase.sin() * 12_000.0) as i16;
                    for sample in frame {
                        *sample = value;
                    }
                    phase += step;
                }
            }
            Err(err) => {
                log::warn!("mix buffer unavailable: {err}");
                return;
            }
        }
        if let Err(err) = sink.play() {
            log::warn!("audio write failed: {err}");
            return;
        }
    }
    sink.close();
    log::info!("Played {TONE_PERIODS} periods of a 440 Hz tone");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Softmedia Gradient Demo");

    let config = match PlatformConfig::load_from_file("gradient_app.toml") {
        Ok(config) => {
            log::info!("Loaded configuration from gradient_app.toml");
            config
        }
        Err(_) => PlatformConfig::default()
            .with_title("Softmedia - Gradient Demo")
            .with_window_size(640, 480),
    };

    let mut app = GradientApp::new(&config)?;
    app.run(&config.audio.device)?;

    log::info!("Gradient demo finished successfully");
    Ok(())
}
