//! The banner window
//!
//! One transparent, borderless, always-on-top window covering the primary
//! monitor. Its life:
//! 1. built invisible, with every layer pre-rendered
//! 2. loaded (first `Resumed`): made click-through, first frame presented,
//!    shown, sound started, clock started
//! 3. redrawn on every tick until the timeline reports `Closed`
//! 4. dropped, which ends the event loop and the process

use crate::args::BannerRequest;
use crate::config::{self, Assets};
use crate::font::resolve_font;
use crate::platform::{apply_input_transparency, Presenter};
use crate::render::Renderer;
use crate::scene::Scene;
use crate::sound::{load_sound, SoundCue};
use crate::style::BannerStyle;
use crate::timeline::{Frame, Phase, Timeline};
use anyhow::{Context, Result};
use cosmic_text::FontSystem;
use std::rc::Rc;
use std::time::{Duration, Instant};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder, WindowLevel};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const FALLBACK_SCREEN: PhysicalSize<u32> = PhysicalSize::new(1920, 1080);

/// Show the banner and block until it has closed
pub fn run(request: BannerRequest) -> Result<()> {
    let assets = Assets::beside_executable();
    let style = config::load_style(&assets.style_path());

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut banner = BannerWindow::new(&event_loop, &request, &assets, &style)?;

    event_loop
        .run(move |event, target| banner.handle_event(event, target))
        .context("Event loop failed")?;

    tracing::info!("Banner finished");
    Ok(())
}

/// Where the banner is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Created,
    Running { started: Instant },
    Closed,
}

/// Load-once clock driving the timeline
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: State,
    timeline: Timeline,
}

impl Lifecycle {
    pub fn new(timeline: Timeline) -> Self {
        Lifecycle {
            state: State::Created,
            timeline,
        }
    }

    /// Start the clock; true only the first time
    pub fn load(&mut self, now: Instant) -> bool {
        if self.state != State::Created {
            return false;
        }
        self.state = State::Running { started: now };
        true
    }

    /// Frame to show at `now`, if the banner is running
    pub fn frame(&self, now: Instant) -> Option<Frame> {
        match self.state {
            State::Running { started } => {
                Some(self.timeline.sample(now.saturating_duration_since(started)))
            }
            _ => None,
        }
    }

    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }
}

pub struct BannerWindow {
    // presenter holds a handle to the window, so it goes first on close
    presenter: Option<Presenter>,
    window: Option<Rc<Window>>,
    scene: Scene,
    renderer: Renderer,
    sound: Option<SoundCue>,
    lifecycle: Lifecycle,
}

impl BannerWindow {
    pub fn new(
        event_loop: &EventLoop<()>,
        request: &BannerRequest,
        assets: &Assets,
        style: &BannerStyle,
    ) -> Result<Self> {
        let size = screen_size(event_loop);
        tracing::info!(
            "Creating banner '{}' at {}x{} (muted: {})",
            request.display_text(),
            size.width,
            size.height,
            request.muted()
        );

        let builder = WindowBuilder::new()
            .with_title("Elden Banner")
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_position(PhysicalPosition::new(0, 0))
            .with_inner_size(size)
            .with_visible(false);

        #[cfg(windows)]
        let builder = {
            use winit::platform::windows::WindowBuilderExtWindows;
            builder.with_skip_taskbar(true)
        };

        let window = Rc::new(
            builder
                .build(event_loop)
                .context("Failed to create banner window")?,
        );

        let scene = Scene::new(request, style);

        let mut font_system = FontSystem::new();
        let font = resolve_font(&mut font_system, assets, &style.fallback_font);
        let renderer = Renderer::new(&scene, &font, &mut font_system, size.width, size.height)?;

        let presenter = Presenter::new(window.clone(), size.width, size.height)?;
        let sound = load_sound(assets, request.muted());

        Ok(BannerWindow {
            presenter: Some(presenter),
            window: Some(window),
            scene,
            renderer,
            sound,
            lifecycle: Lifecycle::new(Scene::timeline(style)),
        })
    }

    fn handle_event(&mut self, event: Event<()>, target: &EventLoopWindowTarget<()>) {
        match event {
            Event::Resumed => self.on_loaded(target),
            Event::WindowEvent { event, .. } => match event {
                // Nothing the user does can close the banner early
                WindowEvent::CloseRequested => tracing::debug!("Ignoring close request"),
                WindowEvent::RedrawRequested => self.draw(Instant::now(), target),
                _ => {}
            },
            Event::AboutToWait => {
                if self.lifecycle.is_closed() {
                    target.exit();
                    return;
                }
                let now = Instant::now();
                if self.lifecycle.frame(now).is_some() {
                    self.draw(now, target);
                    target.set_control_flow(ControlFlow::WaitUntil(now + FRAME_INTERVAL));
                }
            }
            _ => {}
        }
    }

    fn on_loaded(&mut self, target: &EventLoopWindowTarget<()>) {
        let now = Instant::now();
        if !self.lifecycle.load(now) {
            return;
        }
        tracing::info!("Banner loaded");

        if let Some(window) = &self.window {
            apply_input_transparency(window);
        }

        // First frame goes out before the window is shown
        self.draw(now, target);
        if let Some(window) = &self.window {
            window.set_visible(true);
        }

        if let Some(sound) = &self.sound {
            sound.play();
        }

        target.set_control_flow(ControlFlow::WaitUntil(now + FRAME_INTERVAL));
    }

    fn draw(&mut self, now: Instant, target: &EventLoopWindowTarget<()>) {
        let Some(frame) = self.lifecycle.frame(now) else {
            return;
        };

        if frame.phase == Phase::Closed {
            self.close(frame.elapsed, target);
            return;
        }

        self.scene.apply(&frame);
        let canvas = self.renderer.render(&self.scene);

        if let Some(presenter) = &mut self.presenter {
            if let Err(e) = presenter.present(canvas) {
                tracing::error!("Failed to present banner: {:#}", e);
                self.close(frame.elapsed, target);
            }
        }
    }

    fn close(&mut self, elapsed: f32, target: &EventLoopWindowTarget<()>) {
        self.lifecycle.close();
        self.presenter = None;
        self.window = None;
        tracing::info!("Banner closed after {:.3}s", elapsed);
        target.exit();
    }
}

/// Resolution of the primary monitor, read once
fn screen_size(event_loop: &EventLoop<()>) -> PhysicalSize<u32> {
    event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())
        .map(|monitor| monitor.size())
        .filter(|size| size.width > 0 && size.height > 0)
        .unwrap_or_else(|| {
            tracing::warn!(
                "No monitor reported, assuming {}x{}",
                FALLBACK_SCREEN.width,
                FALLBACK_SCREEN.height
            );
            FALLBACK_SCREEN
        })
}
