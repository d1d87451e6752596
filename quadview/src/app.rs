use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use flume::Receiver;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_util::program::ProgramError;
use gl_util::renderer::GlRenderer;

use crate::config::Settings;
use crate::loader::{self, DecodedImage, LoaderError};
use crate::render;
use crate::resources::RenderResources;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    resources: RenderResources,
    rx_image: Receiver<Result<DecodedImage, LoaderError>>,
    frame_limit: u64,
}

impl App {
    /// Acquires window and context, builds every render resource and starts
    /// the texture load. Any failure leaves nothing behind for the render
    /// loop to pick up.
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                settings.width,
                settings.height,
            )))
            .with_title(settings.title.as_str());
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .map_err(|e| AppError::Capability(e.to_string()))?;

        let window =
            window.ok_or_else(|| AppError::Capability(String::from("no window was created")))?;

        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        let resources = RenderResources::create()?;

        log::info!("loading texture from {:?}", settings.texture);
        let rx_image = loader::spawn(settings.texture.clone());

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            resources,
            rx_image,
            frame_limit: settings.frames,
        })
    }

    pub fn run(self) -> ! {
        let mut renderer = GlRenderer::new();

        let size = self.gl_window.window.inner_size();
        let mut viewport = (size.width, size.height);
        renderer.resize(viewport.0, viewport.1);

        let frame_limit = self.frame_limit;
        let mut frames_drawn: u64 = 0;

        self.event_loop
            .run(move |event, _window_target, control_flow| {
                *control_flow = ControlFlow::Wait;
                match event {
                    Event::RedrawEventsCleared => {
                        if let Some(result) = self.rx_image.try_iter().next() {
                            match result {
                                Ok(image) => {
                                    log::info!(
                                        "texture ready: {}x{}",
                                        image.width,
                                        image.height
                                    );

                                    if let Err(e) = self.resources.texture.update_rgba(
                                        image.width,
                                        image.height,
                                        &image.pixels,
                                    ) {
                                        log::error!("texture upload rejected: {e}");
                                    }
                                }
                                Err(e) => {
                                    log::error!("texture load failed, keeping placeholder: {e}");
                                }
                            }
                        }

                        self.gl_window.window.request_redraw();

                        if let Err(e) = self.gl_window.surface.swap_buffers(&self.gl_context) {
                            log::error!("swap_buffers failed: {e}");
                        }
                    }
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::Resized(size) => {
                            if size.width != 0 && size.height != 0 {
                                self.gl_window.surface.resize(
                                    &self.gl_context,
                                    NonZeroU32::new(size.width).unwrap(),
                                    NonZeroU32::new(size.height).unwrap(),
                                );
                                renderer.resize(size.width, size.height);
                                viewport = (size.width, size.height);
                            }
                        }
                        WindowEvent::CloseRequested => {
                            control_flow.set_exit();
                        }
                        _ => (),
                    },
                    Event::RedrawRequested(_) => {
                        render::draw_frame(&mut renderer, &self.resources, viewport);

                        frames_drawn += 1;
                        if frame_limit != 0 && frames_drawn >= frame_limit {
                            log::info!("frame limit reached after {frames_drawn} frames");
                            control_flow.set_exit();
                        }
                    }
                    _ => (),
                }
            })
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    fn new(window: Window, config: &Config) -> Result<Self, glutin::error::Error> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no usable rendering surface: {0}")]
    Capability(String),
    #[error("OpenGL context setup failed: {0}")]
    Context(#[from] glutin::error::Error),
    #[error(transparent)]
    Program(#[from] ProgramError),
}
