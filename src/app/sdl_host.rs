//! SDL2 window, keyboard polling and pixel presentation: the concrete
//! `HostCallbacks` the binary hands to `Machine::run_frame`.

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, Sdl};

use xpire_core::devices::InputLatch;
use xpire_core::host::HostCallbacks;
use xpire_core::rasterizer::{Palette, Surface, DISPLAY_HEIGHT, DISPLAY_WIDTH};

pub struct SdlHost {
    _sdl: Sdl,
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: EventPump,
    palette: Palette,
    quit: bool,
    halted: bool,
}

impl SdlHost {
    pub fn new(title: &str, scale: u32, palette: Palette) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let video = sdl.video()?;
        let window = video
            .window(title, DISPLAY_WIDTH as u32 * scale, DISPLAY_HEIGHT as u32 * scale)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl.event_pump()?;

        Ok(SdlHost {
            _sdl: sdl,
            canvas,
            texture_creator,
            event_pump,
            palette,
            quit: false,
            halted: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn halted(&self) -> bool {
        self.halted
    }
}

impl HostCallbacks for SdlHost {
    fn present(&mut self, surface: &Surface) {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
            .expect("fixed small RGB24 texture should always be creatable");

        let palette = &self.palette;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                for y in 0..DISPLAY_HEIGHT {
                    for x in 0..DISPLAY_WIDTH {
                        let color = palette.color_for(surface.get(x, y));
                        let offset = y * pitch + x * 3;
                        buffer[offset] = color.0;
                        buffer[offset + 1] = color.1;
                        buffer[offset + 2] = color.2;
                    }
                }
            })
            .expect("locking a just-created streaming texture should not fail");

        self.canvas.clear();
        let _ = self.canvas.copy(&texture, None, None);
        self.canvas.present();
    }

    /// Drains the SDL event queue (so the window stays responsive) and
    /// folds keyboard state down to P1 controller bits. `ALWAYS_SET` and
    /// the per-frame latch reset are `Machine`'s job, not this one's.
    fn poll_input(&mut self) -> u8 {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => self.quit = true,
                _ => {}
            }
        }

        let keys = self.event_pump.keyboard_state();
        let mut bits = 0u8;
        if keys.is_scancode_pressed(Scancode::C) {
            bits |= InputLatch::COIN;
        }
        if keys.is_scancode_pressed(Scancode::Return) {
            bits |= InputLatch::START;
        }
        if keys.is_scancode_pressed(Scancode::Space) {
            bits |= InputLatch::FIRE;
        }
        if keys.is_scancode_pressed(Scancode::Left) {
            bits |= InputLatch::LEFT;
        }
        if keys.is_scancode_pressed(Scancode::Right) {
            bits |= InputLatch::RIGHT;
        }
        bits
    }

    fn on_halt(&mut self) {
        self.halted = true;
    }
}
