//! Window and event loop driving [`Bolt`]

use std::sync::Arc;

use anyhow::Context as _;
use cgmath::Vector2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::bolt::Bolt;
use crate::config::BoltConfig;
use crate::controls::DroneControls;
use crate::error::BoltError;
use crate::gfx::{import::ObjImporter, rendering::FrameCommands, RenderEngine};
use crate::ui::{self, UiManager};

pub struct BoltApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: BoltConfig,
    controls: DroneControls,
    frame: FrameCommands,
    viewer: Option<Viewer>,
    startup_error: Option<BoltError>,
}

/// Everything that only exists once the window is up
struct Viewer {
    window: Arc<Window>,
    render_engine: RenderEngine,
    ui_manager: UiManager,
    bolt: Bolt,
}

impl BoltApp {
    pub fn new(config: BoltConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;

        Ok(Self {
            event_loop,
            app_state: AppState {
                controls: DroneControls::from_config(&config),
                config,
                frame: FrameCommands::new(),
                viewer: None,
                startup_error: None,
            },
        })
    }

    /// Runs the event loop until the window is closed
    pub fn run(mut self) -> anyhow::Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.app_state)
            .context("Event loop failed")?;

        match self.app_state.startup_error.take() {
            Some(e) => Err(e).context("Viewer failed to start"),
            None => Ok(()),
        }
    }
}

impl Viewer {
    fn create(event_loop: &ActiveEventLoop, config: &BoltConfig) -> crate::Result<Self> {
        let (width, height) = config.window_size;
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(config.window_title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
            )
            .map_err(|e| BoltError::Window(e.to_string()))?;
        let window = Arc::new(window);

        let (width, height) = window.inner_size().into();
        let mut render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            config.clear_color,
        ))?;

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );

        let mut bolt = Bolt::init(&mut ObjImporter::new(), &mut render_engine, config)?;
        bolt.resize(Vector2::new(width, height));

        Ok(Self {
            window,
            render_engine,
            ui_manager,
            bolt,
        })
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        match Viewer::create(event_loop, &self.config) {
            Ok(viewer) => self.viewer = Some(viewer),
            Err(e) => {
                log::error!("{}", e);
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        let Viewer {
            window,
            render_engine,
            ui_manager,
            bolt,
        } = viewer;

        // UI gets the event first
        let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        if ui_manager.handle_input(window, &ui_event) {
            window.request_redraw();
            return;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                bolt.resize(Vector2::new(width, height));
                render_engine.resize(width, height);
                ui_manager.update_display_size(width, height);
            }
            WindowEvent::RedrawRequested => {
                let controls = &mut self.controls;
                ui_manager.update_logic(window, |ui| {
                    ui::drone_options(ui, controls);
                    ui::camera_options(ui, controls);
                });
                controls.clamp();

                bolt.update(controls);

                self.frame.clear();
                bolt.draw_frame(&mut self.frame);

                render_engine.render_frame(
                    &self.frame,
                    Some(|device: &wgpu::Device,
                          queue: &wgpu::Queue,
                          encoder: &mut wgpu::CommandEncoder,
                          view: &wgpu::TextureView| {
                        ui_manager.render_display_only(device, queue, encoder, view);
                    }),
                );
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = self.viewer.as_ref() {
            viewer.window.request_redraw();
        }
    }
}
