use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use egui_winit::State as EguiWinitState;
use pixels::{Pixels, SurfaceTexture, wgpu};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::Window as NativeWindow;

use crate::adapters::pixel_format::blit_canvas_to_rgba;
use crate::controllers::ports::native_input::NativeInput;
use crate::core::data::event::Modifiers;
use crate::core::data::window::Window;
use crate::core::data::window_ref::WindowRef;
use crate::presenters::windowed::events::GuiEvent;
use crate::presenters::windowed::keymap::{key_code, modifiers_from};

/// Native resources of one open window: a pixels framebuffer sized to the
/// canvas, plus an egui tab strip for tabbed windows.
pub struct WindowSurface {
    handle: WindowRef,
    window: &'static NativeWindow,
    pixels: Pixels<'static>,
    egui_ctx: EguiContext,
    egui_state: EguiWinitState,
    egui_renderer: EguiRenderer,
    tabs: Option<Vec<String>>,
    selected: usize,
    surface_width: u32,
    surface_height: u32,
    cursor: (i32, i32),
    modifiers: Modifiers,
}

impl WindowSurface {
    pub fn new(
        target: &Window,
        window: &'static NativeWindow,
        elwt: &EventLoopWindowTarget<GuiEvent>,
    ) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(target.width, target.height, surface_texture)?;

        let egui_ctx = EguiContext::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            elwt,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer =
            EguiRenderer::new(pixels.device(), pixels.render_texture_format(), None, 1);

        Ok(Self {
            handle: target.id(),
            window,
            pixels,
            egui_ctx,
            egui_state,
            egui_renderer,
            tabs: target.tabs.as_ref().map(|tabs| tabs.names.clone()),
            selected: target.active_subwindow,
            surface_width: size.width,
            surface_height: size.height,
            cursor: (0, 0),
            modifiers: Modifiers::empty(),
        })
    }

    #[must_use]
    pub fn handle(&self) -> WindowRef {
        self.handle
    }

    #[must_use]
    pub fn native(&self) -> &'static NativeWindow {
        self.window
    }

    /// Copies the selected subwindow of `target` into the framebuffer and
    /// schedules a redraw.
    pub fn show(&mut self, target: &Window) {
        self.selected = target.active_subwindow;

        if let Some(subwindow) = target.subwindow(target.active_subwindow) {
            let (width, height) = (target.width, target.height);
            blit_canvas_to_rgba(subwindow.surface(), self.pixels.frame_mut(), width, height);
        }
        self.window.request_redraw();
    }

    pub fn raise(&self) {
        self.window.set_visible(true);
        self.window.focus_window();
    }

    /// The native window is never destroyed while the event loop runs, only
    /// hidden; pixels needs it for the whole program.
    pub fn hide(&self) {
        self.window.set_visible(false);
    }

    /// Turns a window event into native input for the GUI owner.
    pub fn on_window_event(&mut self, event: &WindowEvent, out: &mut Vec<NativeInput>) {
        let response = self.egui_state.on_window_event(self.window, event);
        if response.repaint {
            self.window.request_redraw();
        }

        let window = self.handle;
        match event {
            WindowEvent::CloseRequested => out.push(NativeInput::CloseRequested { window }),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                let size = self.window.inner_size();
                self.resize(size.width, size.height);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers_from(modifiers.state());
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = self.to_canvas(position.x, position.y);
                if !response.consumed {
                    out.push(NativeInput::Motion {
                        window,
                        x: self.cursor.0,
                        y: self.cursor.1,
                    });
                }
            }
            WindowEvent::MouseInput { state, button, .. } if !response.consumed => {
                out.push(NativeInput::Button {
                    window,
                    x: self.cursor.0,
                    y: self.cursor.1,
                    button: button_number(*button),
                    pressed: *state == ElementState::Pressed,
                    modifiers: self.modifiers,
                });
            }
            WindowEvent::KeyboardInput { event, .. } if !response.consumed => {
                if let Some(key) = key_code(&event.logical_key, event.location) {
                    out.push(NativeInput::Key {
                        window,
                        key,
                        pressed: event.state == ElementState::Pressed,
                        modifiers: self.modifiers,
                    });
                }
            }
            _ => {}
        }
    }

    fn to_canvas(&self, x: f64, y: f64) -> (i32, i32) {
        match self.pixels.window_pos_to_pixel((x as f32, y as f32)) {
            Ok((x, y)) => (x as i32, y as i32),
            Err((x, y)) => (x as i32, y as i32),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface_width = width;
        self.surface_height = height;

        if width == 0 || height == 0 {
            return;
        }
        if let Err(err) = self.pixels.resize_surface(width, height) {
            tracing::warn!("winit: resize of {} failed: {err}", self.handle);
        }
        self.window.request_redraw();
    }

    /// Draws the framebuffer and the tab strip. Returns the tab the user
    /// picked, if any.
    pub fn render(&mut self) -> Result<Option<usize>, pixels::Error> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Ok(None);
        }

        let raw_input = self.egui_state.take_egui_input(self.window);
        let tabs = self.tabs.as_deref();
        let selected = self.selected;
        let mut picked = None;

        let egui_output = self.egui_ctx.run(raw_input, |ctx| {
            let Some(names) = tabs else {
                return;
            };
            egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (index, name) in names.iter().enumerate() {
                        let clicked = ui
                            .selectable_label(index == selected, name.as_str())
                            .clicked();
                        if clicked && index != selected {
                            picked = Some(index);
                        }
                    }
                });
            });
        });

        self.egui_state
            .handle_platform_output(self.window, egui_output.platform_output);
        if egui_output
            .viewport_output
            .values()
            .any(|viewport| viewport.repaint_delay.is_zero())
        {
            self.window.request_redraw();
        }

        let pixels_per_point = self.egui_ctx.pixels_per_point();
        let clipped_primitives = self.egui_ctx.tessellate(egui_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_width, self.surface_height],
            pixels_per_point,
        };
        let textures_delta = egui_output.textures_delta;
        let renderer = &mut self.egui_renderer;

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            for (id, delta) in &textures_delta.set {
                renderer.update_texture(&context.device, &context.queue, *id, delta);
            }
            renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("tabs"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });
                renderer.render(&mut render_pass, &clipped_primitives, &screen_descriptor);
            }

            for id in &textures_delta.free {
                renderer.free_texture(id);
            }
            Ok(())
        })?;

        Ok(picked)
    }
}

fn button_number(button: MouseButton) -> i32 {
    match button {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
        MouseButton::Back => 4,
        MouseButton::Forward => 5,
        MouseButton::Other(n) => i32::from(n),
    }
}
