//! Procedural art: bird animation frames and a tiny 3x5 bitmap font.

use crate::render::Rgb;

pub const SKY_TOP: Rgb = Rgb(70, 180, 200);
pub const SKY_BOT: Rgb = Rgb(190, 232, 245);
pub const GRASS: Rgb = Rgb(84, 168, 55);
pub const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
pub const DIRT: Rgb = Rgb(210, 185, 110);
pub const DIRT_DARK: Rgb = Rgb(185, 160, 90);
pub const PIPE_L: Rgb = Rgb(74, 122, 26);
pub const PIPE_M: Rgb = Rgb(100, 170, 40);
pub const PIPE_R: Rgb = Rgb(115, 191, 46);
pub const PIPE_HI: Rgb = Rgb(145, 215, 62);
pub const CAP_DARK: Rgb = Rgb(60, 100, 20);
pub const HILL_FAR: Rgb = Rgb(120, 195, 75);
pub const HILL_NEAR: Rgb = Rgb(95, 175, 55);
pub const BUTTON: Rgb = Rgb(235, 120, 40);
pub const BUTTON_EDGE: Rgb = Rgb(120, 50, 10);
pub const PANEL: Rgb = Rgb(220, 195, 120);
pub const LETTERBOX: Rgb = Rgb(15, 15, 20);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const GOLD: Rgb = Rgb(245, 200, 66);
pub const SHADOW: Rgb = Rgb(30, 30, 30);

const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const OUTLINE: Rgb = Rgb(40, 30, 20);

#[rustfmt::skip]
const BIRD_BODY: [&str; 12] = [
    ".....KKKKKK......",
    "...KKHHHHHKEK....",
    "..KHHYYYYKEEEK...",
    ".KYYYYYYYKEEPEK..",
    "KYYYYYYYYKEEPEK..",
    "KYYYYYYYYYKEEEK..",
    "KYYYYYYYYYYKKKKKK",
    ".KYYYYYYYYKbbbbbK",
    "..KYYYYYYKBKKKKK.",
    "...KKYYYYYKBBBBK.",
    ".....KKKKKKKKKK..",
    ".................",
];

#[rustfmt::skip]
const WING: [&str; 3] = [
    "KKKK.",
    "WWWWK",
    "KWWK.",
];

/// Wing row for each animation frame: up, level, down.
const WING_ROWS: [usize; 3] = [3, 4, 6];

/// A small RGBA-ish bitmap: `None` is transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub w: usize,
    pub h: usize,
    px: Vec<Option<Rgb>>,
}

impl Bitmap {
    fn from_rows(rows: &[&str]) -> Self {
        let h = rows.len();
        let w = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut px = vec![None; w * h];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                px[y * w + x] = palette(ch);
            }
        }
        Self { w, h, px }
    }

    fn overlay(&mut self, rows: &[&str], ox: usize, oy: usize) {
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let (tx, ty) = (ox + x, oy + y);
                if tx < self.w && ty < self.h {
                    if let Some(c) = palette(ch) {
                        self.px[ty * self.w + tx] = Some(c);
                    }
                }
            }
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.w && y < self.h {
            self.px[y * self.w + x]
        } else {
            None
        }
    }
}

fn palette(ch: char) -> Option<Rgb> {
    match ch {
        'Y' => Some(BIRD_Y),
        'H' => Some(BIRD_HI),
        'W' => Some(BIRD_WING),
        'E' => Some(BIRD_EYE),
        'P' => Some(BIRD_PUPIL),
        'B' => Some(BIRD_BEAK),
        'b' => Some(BIRD_BEAK_HI),
        'K' => Some(OUTLINE),
        _ => None,
    }
}

/// All art the scene draws. Built once at startup.
#[derive(Debug, Clone)]
pub struct Sprites {
    pub bird_frames: Vec<Bitmap>,
}

impl Sprites {
    pub fn new(frame_count: usize) -> Self {
        let bird_frames = (0..frame_count.max(1))
            .map(|i| {
                let mut frame = Bitmap::from_rows(&BIRD_BODY);
                frame.overlay(&WING, 1, WING_ROWS[i % WING_ROWS.len()]);
                frame
            })
            .collect();
        Self { bird_frames }
    }

    pub fn bird_frame(&self, index: usize) -> &Bitmap {
        &self.bird_frames[index % self.bird_frames.len()]
    }
}

impl Default for Sprites {
    fn default() -> Self {
        Self::new(WING_ROWS.len())
    }
}

// ── 3x5 bitmap font ────────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
fn letter(ch: char) -> Option<[u8; 15]> {
    Some(match ch {
        'A' => [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1],
        'B' => [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0],
        'C' => [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1],
        'E' => [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1],
        'I' => [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1],
        'K' => [1,0,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1],
        'L' => [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1],
        'R' => [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1],
        'S' => [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0],
        'T' => [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0],
        _ => return None,
    })
}

/// Glyph for a digit or one of the few capitals the HUD uses.
pub fn glyph(ch: char) -> Option<[u8; 15]> {
    match ch.to_digit(10) {
        Some(d) => Some(DIGITS[d as usize]),
        None => letter(ch),
    }
}

/// Width in glyph cells (3 per glyph plus 1 spacing between).
pub fn text_cells(text: &str) -> i32 {
    (text.chars().count() as i32 * 4 - 1).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_share_size_and_differ_by_wing() {
        let s = Sprites::default();
        assert_eq!(s.bird_frames.len(), 3);
        for f in &s.bird_frames {
            assert_eq!((f.w, f.h), (17, 12));
        }
        assert_ne!(s.bird_frames[0], s.bird_frames[2]);
    }

    #[test]
    fn frame_index_wraps() {
        let s = Sprites::default();
        assert_eq!(s.bird_frame(4), &s.bird_frames[1]);
    }

    #[test]
    fn font_covers_hud_text() {
        for ch in "0123456789RESTARTCLICKBEST".chars() {
            assert!(glyph(ch).is_some(), "missing glyph {ch}");
        }
        assert!(glyph('?').is_none());
        assert_eq!(text_cells("RESTART"), 27);
    }
}
