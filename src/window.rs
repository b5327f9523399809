//! SDL2 window that displays the engine's color buffer.
//!
//! Only compiled with the `window` feature. The window owns a streaming
//! `ARGB8888` texture the size of the frame; [`Window::present`] uploads the
//! engine's bytes into it and blits it to the canvas.

use sdl2::event::{Event, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::camera::CameraMove;
use crate::engine::RenderMode;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: u64 = 1000 / FPS;

/// Input the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    SetRenderMode(RenderMode),
    SetBackfaceCulling(bool),
    ToggleGrid,
    /// Sent again on key repeat while the key is held.
    MoveCamera(CameraMove),
}

fn movement_key(keycode: Keycode) -> Option<CameraMove> {
    match keycode {
        Keycode::W => Some(CameraMove::Forward),
        Keycode::S => Some(CameraMove::Backward),
        Keycode::A => Some(CameraMove::StrafeLeft),
        Keycode::D => Some(CameraMove::StrafeRight),
        Keycode::R => Some(CameraMove::Up),
        Keycode::F => Some(CameraMove::Down),
        Keycode::Left => Some(CameraMove::TurnLeft),
        Keycode::Right => Some(CameraMove::TurnRight),
        Keycode::Up => Some(CameraMove::LookUp),
        Keycode::Down => Some(CameraMove::LookDown),
        _ => None,
    }
}

fn key_event(keycode: Keycode) -> Option<WindowEvent> {
    let mode = |index: usize| Some(WindowEvent::SetRenderMode(RenderMode::ALL[index]));
    match keycode {
        Keycode::Escape => Some(WindowEvent::Quit),
        Keycode::Num1 => mode(0),
        Keycode::Num2 => mode(1),
        Keycode::Num3 => mode(2),
        Keycode::Num4 => mode(3),
        Keycode::Num5 => mode(4),
        Keycode::Num6 => mode(5),
        Keycode::C => Some(WindowEvent::SetBackfaceCulling(true)),
        Keycode::X => Some(WindowEvent::SetBackfaceCulling(false)),
        Keycode::G => Some(WindowEvent::ToggleGrid),
        _ => movement_key(keycode).map(WindowEvent::MoveCamera),
    }
}

/// Sleeps out the remainder of each frame to cap the frame rate.
pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.ticks(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let elapsed = window.ticks().saturating_sub(self.previous_frame_time);
        if elapsed < FRAME_TARGET_TIME {
            std::thread::sleep(std::time::Duration::from_millis(FRAME_TARGET_TIME - elapsed));
        }
        let now = window.ticks();
        let delta = now.saturating_sub(self.previous_frame_time);
        self.previous_frame_time = now;
        delta
    }
}

pub struct Window {
    // Declared before `texture_creator` so it is dropped first.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    fn create_texture(
        creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Texture<'static>, String> {
        // SAFETY: the creator is boxed, never moved out of the `Window`, and
        // outlives the texture by field drop order.
        let creator: &'static TextureCreator<WindowContext> = unsafe { &*(creator as *const _) };
        creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drains pending SDL events into the ones the frame loop understands.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat,
                    ..
                } => match key_event(keycode) {
                    Some(event @ WindowEvent::MoveCamera(_)) => events.push(event),
                    Some(event) if !repeat => events.push(event),
                    _ => {}
                },
                Event::Window {
                    win_event: SdlWindowEvent::Resized(w, h),
                    ..
                } if w > 0 && h > 0 => events.push(WindowEvent::Resize(w as u32, h as u32)),
                _ => {}
            }
        }
        events
    }

    /// Uploads one frame of `ARGB8888` bytes and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    /// Recreates the streaming texture for a new frame size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Milliseconds since SDL was initialized.
    pub fn ticks(&self) -> u64 {
        self.timer_subsystem.ticks64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_map_to_camera_moves() {
        assert_eq!(
            key_event(Keycode::W),
            Some(WindowEvent::MoveCamera(CameraMove::Forward))
        );
        assert_eq!(
            key_event(Keycode::Left),
            Some(WindowEvent::MoveCamera(CameraMove::TurnLeft))
        );
        assert_eq!(
            key_event(Keycode::F),
            Some(WindowEvent::MoveCamera(CameraMove::Down))
        );
    }

    #[test]
    fn mode_and_toggle_keys_keep_their_bindings() {
        assert_eq!(
            key_event(Keycode::Num3),
            Some(WindowEvent::SetRenderMode(RenderMode::ALL[2]))
        );
        assert_eq!(key_event(Keycode::C), Some(WindowEvent::SetBackfaceCulling(true)));
        assert_eq!(key_event(Keycode::G), Some(WindowEvent::ToggleGrid));
        assert_eq!(key_event(Keycode::Z), None);
    }
}
