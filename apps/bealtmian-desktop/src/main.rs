use anyhow::{Context as _, Result};
use bealtmian_common::SessionConfig;
use bealtmian_input::InputState;
use bealtmian_kernel::{Clock, MonotonicClock, Session, TickSchedule};
use bealtmian_render::{DisplayList, FrameComposer};
use bealtmian_render_egui::EguiCanvas;
use clap::Parser;
use egui::Context as EguiContext;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "bealtmian-desktop", about = "Bealtmian walk-around demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Canvas width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Number of cubes to scatter
    #[arg(long, default_value = "15")]
    cubes: usize,

    /// RNG seed for cube placement and sky noise
    #[arg(long)]
    seed: Option<u64>,

    /// Length of the loading splash in seconds
    #[arg(long, default_value = "3")]
    loading_secs: f64,

    /// Delay between frames in milliseconds
    #[arg(long, default_value = "30")]
    frame_ms: u64,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let loading_duration = Duration::try_from_secs_f64(self.loading_secs)
            .context("--loading-secs must be a non-negative number")?;
        let config = SessionConfig {
            width: self.width,
            height: self.height,
            cube_count: self.cubes,
            seed: self.seed,
            loading_duration,
            frame_interval: Duration::from_millis(self.frame_ms),
            ..SessionConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// The single character a logical key produces, if any.
fn key_char(key: &Key) -> Option<char> {
    let Key::Character(text) = key else {
        return None;
    };
    let mut chars = text.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// Application state.
struct AppState {
    composer: FrameComposer,
    clock: MonotonicClock,
    schedule: TickSchedule,
    input: InputState,
    // Last composed frame, replayed on every redraw
    frame: DisplayList,
}

impl AppState {
    fn new(config: SessionConfig) -> Result<Self> {
        let clock = MonotonicClock::new();
        let schedule = TickSchedule::new(config.frame_interval);
        let session = Session::new(config, clock.now())?;
        Ok(Self {
            composer: FrameComposer::new(session),
            clock,
            schedule,
            input: InputState::new(),
            frame: DisplayList::new(),
        })
    }

    fn handle_key(&mut self, key: &Key, pressed: bool) {
        if let Some(c) = key_char(key) {
            self.input.handle_char(c, pressed);
        }
    }

    /// Run a frame if one is due. Returns true when a new frame was composed.
    fn poll_tick(&mut self) -> bool {
        let now = self.clock.now();
        if !self.schedule.take_due(now) {
            return false;
        }
        let report = self
            .composer
            .tick(now, self.input.snapshot(), &mut self.frame);
        if report.entered_play {
            tracing::info!(frame = self.composer.frames(), "gameplay started");
        }
        self.schedule.arm(self.clock.now());
        true
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.schedule
            .deadline()
            .map(|at| self.clock.instant_at(at))
    }

    fn draw_frame(&self, ctx: &EguiContext) {
        let config = self.composer.session().config();
        let painter = ctx.layer_painter(egui::LayerId::background());
        let mut canvas = EguiCanvas::new(&painter, ctx.screen_rect(), config.width, config.height);
        self.frame.replay(&mut canvas);
    }
}

/// GPU objects tied to the window surface. Dropping this releases the surface.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(window: Arc<Window>) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("bealtmian_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }
}

struct DesktopApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
}

impl DesktopApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            gpu: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let config = self.state.composer.session().config();
        let attrs = Window::default_attributes()
            .with_title("Bealtmian")
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let gpu = Gpu::new(window.clone())?;
        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_winit = Some(egui_winit);
        Ok(())
    }

    /// Stop ticking and release the surface before the loop exits.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.state.schedule.cancel();
        self.egui_winit = None;
        self.gpu = None;
        self.window = None;
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let (Some(window), Some(gpu), Some(egui_winit)) =
            (&self.window, &mut self.gpu, &mut self.egui_winit)
        else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = egui_winit.take_egui_input(window);
        let state = &self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_frame(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("canvas_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("canvas_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            tracing::error!("failed to initialize window: {e:#}");
            event_loop.exit();
            return;
        }
        let now = self.state.clock.now();
        self.state.schedule.start(now);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let _ = egui_winit.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!(frames = self.state.composer.frames(), "window closed");
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.input.clear();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(&logical_key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.poll_tick() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        if let Some(deadline) = self.state.next_deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.state.schedule.cancel();
        self.gpu = None;
        tracing::info!("bealtmian-desktop exiting");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("bealtmian-desktop starting");

    let config = cli.session_config()?;
    let state = AppState::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = DesktopApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
