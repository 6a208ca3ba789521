// Window + software overlay utilities.
// Visual effects provided here:
// 1) A window that shows the canvas.
// 2) A round brush outline that follows your mouse, sized like the pen.

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the canvas.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0), y.max(0.0)))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Keys that went down since the last frame (no auto-repeat).
    pub fn keys_pressed(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }
}

/* ---------- Software drawing: brush cursor ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Invert a pixel so the outline shows on any background.
#[inline]
fn invert_pixel(fb: &mut FrameBuffer, x: i32, y: i32) {
    if x < 0 || y < 0 || x as usize >= fb.width || y as usize >= fb.height {
        return;
    }
    let old = fb.pixels[y as usize * fb.width + x as usize];
    put_pixel(fb, x, y, !old & 0x00FF_FFFF);
}

/// Outline of the brush footprint at (cx,cy), midpoint circle.
/// Tiny brushes get a small plus instead so the cursor stays visible.
/// Visual: shows where and how wide the next stroke will land.
pub fn draw_brush_cursor(fb: &mut FrameBuffer, cx: i32, cy: i32, thickness: u32) {
    let r = (thickness / 2) as i32;
    if r < 2 {
        for (dx, dy) in [(0, 0), (-2, 0), (2, 0), (0, -2), (0, 2)] {
            invert_pixel(fb, cx + dx, cy + dy);
        }
        return;
    }

    // Octant mirrors overlap on the axes and diagonals; invert each pixel once.
    let mut rim = Vec::with_capacity(8 * r as usize);
    let (mut x, mut y) = (r, 0);
    let mut err = 1 - r;
    while x >= y {
        rim.extend([(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)]);
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
    rim.sort_unstable();
    rim.dedup();
    for (px, py) in rim {
        invert_pixel(fb, cx + px, cy + py);
    }
}
