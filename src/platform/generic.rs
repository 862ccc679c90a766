//! winit + softbuffer presentation for non-Windows targets

use super::pack_argb;
use anyhow::{anyhow, Result};
use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::rc::Rc;
use tiny_skia::Pixmap;
use winit::window::Window;

/// Stop the window from taking part in hit-testing
pub fn apply_input_transparency(window: &Window) {
    if let Err(e) = window.set_cursor_hittest(false) {
        tracing::debug!("Cursor hit-test not supported here: {}", e);
    }
}

pub struct Presenter {
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
}

impl Presenter {
    pub fn new(window: Rc<Window>, width: u32, height: u32) -> Result<Self> {
        let context = Context::new(window.clone())
            .map_err(|e| anyhow!("Failed to create softbuffer context: {}", e))?;
        let mut surface = Surface::new(&context, window)
            .map_err(|e| anyhow!("Failed to create softbuffer surface: {}", e))?;

        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(anyhow!("Invalid surface size {}x{}", width, height));
        };
        surface
            .resize(w, h)
            .map_err(|e| anyhow!("Failed to resize surface: {}", e))?;

        Ok(Presenter {
            _context: context,
            surface,
        })
    }

    pub fn present(&mut self, canvas: &Pixmap) -> Result<()> {
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to map surface buffer: {}", e))?;

        for (dst, px) in buffer.iter_mut().zip(canvas.data().chunks_exact(4)) {
            *dst = pack_argb(px);
        }

        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present frame: {}", e))
    }
}
