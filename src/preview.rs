// Window that shows a finished buffer.
// Visual: the rendered image appears in a plain window until it is closed or
// ESC is pressed.

use log::info;
use minifb::{Key, Window, WindowOptions};

use crate::buffer::ColorBuffer;
use crate::error::{Error, Result};

pub struct Preview {
    window: Window,
}

impl Preview {
    /// Open a window sized to the image.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::Window(e.to_string()))?;
        Ok(Self { window })
    }

    /// Returns false when the user closes the window or holds ESC.
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Block, redrawing `buffer`, until the window goes away.
    pub fn show(mut self, buffer: &ColorBuffer) -> Result<()> {
        info!("previewing {}x{}, ESC to close", buffer.width(), buffer.height());
        self.window.set_target_fps(30);
        let words = buffer.to_argb_words();
        while self.is_open() {
            self.window
                .update_with_buffer(&words, buffer.width(), buffer.height())
                .map_err(|e| Error::Window(e.to_string()))?;
        }
        Ok(())
    }
}
