//! Half-block pixel buffer and the world-to-terminal viewport.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use crate::geom::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    pub const fn darken(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    fn to_crossterm(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// Pixel buffer drawn two pixels per terminal cell using `▀`.
pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb(0, 0, 0); w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Rgb(0, 0, 0));
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Halve the brightness of every pixel.
    pub fn dim(&mut self) {
        for p in &mut self.px {
            *p = p.darken();
        }
    }

    /// Emit the whole buffer, only switching colours when they change.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.to_crossterm()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.to_crossterm()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.to_crossterm()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

/// Uniform scale from world pixels into the buffer, centred with
/// letterboxing on the long axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub ox: i32,
    pub oy: i32,
}

impl Viewport {
    pub fn fit(world_w: i32, world_h: i32, buf_w: usize, buf_h: usize) -> Self {
        let sx = buf_w as f32 / world_w.max(1) as f32;
        let sy = buf_h as f32 / world_h.max(1) as f32;
        let scale = sx.min(sy).max(f32::EPSILON);
        let used_w = (world_w as f32 * scale).floor() as i32;
        let used_h = (world_h as f32 * scale).floor() as i32;
        Self {
            scale,
            ox: (buf_w as i32 - used_w) / 2,
            oy: (buf_h as i32 - used_h) / 2,
        }
    }

    pub fn to_buf_x(&self, wx: f32) -> i32 {
        (wx * self.scale).floor() as i32 + self.ox
    }

    pub fn to_buf_y(&self, wy: f32) -> i32 {
        (wy * self.scale).floor() as i32 + self.oy
    }

    /// Buffer-space `(x0, y0, x1, y1)`, half-open, at least one pixel wide
    /// and tall for non-empty rects.
    pub fn to_buf_rect(&self, r: Rect) -> (i32, i32, i32, i32) {
        let x0 = self.to_buf_x(r.left() as f32);
        let y0 = self.to_buf_y(r.top() as f32);
        let mut x1 = self.to_buf_x(r.right() as f32);
        let mut y1 = self.to_buf_y(r.bottom() as f32);
        if r.w > 0 {
            x1 = x1.max(x0 + 1);
        }
        if r.h > 0 {
            y1 = y1.max(y0 + 1);
        }
        (x0, y0, x1, y1)
    }

    /// World coordinates of the centre of buffer pixel `(bx, by)`.
    pub fn to_world(&self, bx: i32, by: i32) -> (f32, f32) {
        (
            (bx - self.ox) as f32 / self.scale + 0.5 / self.scale,
            (by - self.oy) as f32 / self.scale + 0.5 / self.scale,
        )
    }

    /// Map a terminal cell to the world point under its centre.
    pub fn cell_to_world(&self, col: u16, row: u16) -> Point {
        let bx = col as f32 + 0.5 - self.ox as f32;
        let by = row as f32 * 2.0 + 1.0 - self.oy as f32;
        Point::new(
            (bx / self.scale).floor() as i32,
            (by / self.scale).floor() as i32,
        )
    }

    /// Size of one world pixel in buffer pixels, rounded, at least 1.
    pub fn px(&self, world_len: f32) -> i32 {
        (world_len * self.scale).round().max(1.0) as i32
    }
}
