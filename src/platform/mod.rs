//! OS seam for the overlay window
//!
//! Each platform provides:
//! - `apply_input_transparency(window)`: let all pointer and keyboard input
//!   fall through to whatever is below the window
//! - `Presenter`: pushes a premultiplied RGBA canvas to the window

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub use win32::{apply_input_transparency, Presenter};

#[cfg(not(windows))]
mod generic;
#[cfg(not(windows))]
pub use generic::{apply_input_transparency, Presenter};

/// Pack a premultiplied RGBA8 pixel as `0xAARRGGBB`
pub fn pack_argb(px: &[u8]) -> u32 {
    (px[3] as u32) << 24 | (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32
}
