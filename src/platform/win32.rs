//! Layered-window presentation through `UpdateLayeredWindow`
//!
//! The canvas is copied into a top-down 32-bit DIB section as premultiplied
//! BGRA and handed to the compositor with per-pixel alpha.

use anyhow::{anyhow, Result};
use std::rc::Rc;
use tiny_skia::Pixmap;
use windows::Win32::Foundation::{COLORREF, HWND, POINT, SIZE};
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    AC_SRC_ALPHA, AC_SRC_OVER, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION,
    DIB_RGB_COLORS, HBITMAP, HDC, HGDIOBJ,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowLongW, SetWindowLongW, UpdateLayeredWindow, GWL_EXSTYLE, ULW_ALPHA, WS_EX_LAYERED,
    WS_EX_TRANSPARENT,
};
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window;

const CLICK_THROUGH: i32 = (WS_EX_TRANSPARENT.0 | WS_EX_LAYERED.0) as i32;

fn hwnd(window: &Window) -> Option<HWND> {
    match window.window_handle().ok()?.as_raw() {
        RawWindowHandle::Win32(handle) => Some(HWND(handle.hwnd.get())),
        _ => None,
    }
}

/// Mark the window click-through and layered
///
/// Needs the native handle, so call it once the window exists. winit keeps
/// `WS_EX_TRANSPARENT | WS_EX_LAYERED` in its own style flags once hit-testing
/// is off, so later `set_visible` calls don't strip them again. The bits are
/// also OR-ed in directly for the first present; the result is not checked.
pub fn apply_input_transparency(window: &Window) {
    if let Err(e) = window.set_cursor_hittest(false) {
        tracing::warn!("Failed to disable hit-testing: {}", e);
    }

    let Some(hwnd) = hwnd(window) else {
        tracing::warn!("No Win32 handle, window may not be layered");
        return;
    };

    unsafe {
        let style = GetWindowLongW(hwnd, GWL_EXSTYLE);
        SetWindowLongW(hwnd, GWL_EXSTYLE, style | CLICK_THROUGH);
    }
}

pub struct Presenter {
    // Keeps the handle valid for as long as we draw into it
    _window: Rc<Window>,
    hwnd: HWND,
    mem_dc: HDC,
    bitmap: HBITMAP,
    old_obj: HGDIOBJ,
    bits: *mut u8,
    width: u32,
    height: u32,
}

impl Presenter {
    pub fn new(window: Rc<Window>, width: u32, height: u32) -> Result<Self> {
        let hwnd = hwnd(&window).ok_or_else(|| anyhow!("Window has no Win32 handle"))?;

        unsafe {
            let screen_dc = GetDC(HWND::default());
            let mem_dc = CreateCompatibleDC(screen_dc);
            ReleaseDC(HWND::default(), screen_dc);

            let bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width as i32,
                    biHeight: -(height as i32), // Top-down
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0 as u32,
                    ..std::mem::zeroed()
                },
                bmiColors: [std::mem::zeroed(); 1],
            };

            let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
            let bitmap = match CreateDIBSection(mem_dc, &bmi, DIB_RGB_COLORS, &mut bits, None, 0) {
                Ok(bitmap) => bitmap,
                Err(e) => {
                    let _ = DeleteDC(mem_dc);
                    return Err(anyhow!("CreateDIBSection failed: {}", e));
                }
            };

            if bits.is_null() {
                let _ = DeleteObject(bitmap);
                let _ = DeleteDC(mem_dc);
                return Err(anyhow!("DIB section has no pixel memory"));
            }

            let old_obj = SelectObject(mem_dc, bitmap);

            Ok(Presenter {
                _window: window,
                hwnd,
                mem_dc,
                bitmap,
                old_obj,
                bits: bits as *mut u8,
                width,
                height,
            })
        }
    }

    pub fn present(&mut self, canvas: &Pixmap) -> Result<()> {
        let len = (self.width * self.height * 4) as usize;
        let dst = unsafe { std::slice::from_raw_parts_mut(self.bits, len) };

        // RGBA -> BGRA, both premultiplied
        for (d, s) in dst.chunks_exact_mut(4).zip(canvas.data().chunks_exact(4)) {
            d[0] = s[2];
            d[1] = s[1];
            d[2] = s[0];
            d[3] = s[3];
        }

        let blend = BLENDFUNCTION {
            BlendOp: AC_SRC_OVER as u8,
            BlendFlags: 0,
            SourceConstantAlpha: 255,
            AlphaFormat: AC_SRC_ALPHA as u8,
        };
        let size = SIZE {
            cx: self.width as i32,
            cy: self.height as i32,
        };
        let origin = POINT { x: 0, y: 0 };

        let result = unsafe {
            let screen_dc = GetDC(HWND::default());
            let result = UpdateLayeredWindow(
                self.hwnd,
                screen_dc,
                Some(&origin),
                Some(&size),
                self.mem_dc,
                Some(&origin),
                COLORREF(0), // Unused when ULW_ALPHA is set
                Some(&blend),
                ULW_ALPHA,
            );
            ReleaseDC(HWND::default(), screen_dc);
            result
        };

        result.map_err(|e| anyhow!("UpdateLayeredWindow failed: {}", e))
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.mem_dc, self.old_obj);
            let _ = DeleteObject(self.bitmap);
            let _ = DeleteDC(self.mem_dc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event_loop::EventLoopBuilder;
    use winit::platform::windows::EventLoopBuilderExtWindows;
    use winit::window::WindowBuilder;

    #[test]
    fn test_click_through_survives_show() {
        let event_loop = EventLoopBuilder::new().with_any_thread(true).build().unwrap();
        let window = WindowBuilder::new()
            .with_decorations(false)
            .with_transparent(true)
            .with_visible(false)
            .build(&event_loop)
            .unwrap();

        apply_input_transparency(&window);
        window.set_visible(true);

        let hwnd = hwnd(&window).unwrap();
        let style = unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) };
        assert_eq!(style & CLICK_THROUGH, CLICK_THROUGH);
    }
}
