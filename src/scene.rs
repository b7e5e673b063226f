//! Draws a `Game` into a `PixelBuf`.
//!
//! Everything is positioned in world pixels and mapped through a
//! `Viewport`, so the layout is the same whatever the terminal size.

use crate::config::Config;
use crate::game::{Game, Phase};
use crate::geom::Rect;
use crate::pipe::{Pipe, PipeKind};
use crate::render::{PixelBuf, Rgb, Viewport};
use crate::sprites::{self, Bitmap, Sprites};

const CAP_H: i32 = 30;
const CAP_EXTRA: i32 = 4;
const GRASS_H: i32 = 14;
const SCORE_Y: i32 = 20;
const GLYPH_CELL: f32 = 8.0;

pub struct Scene {
    sprites: Sprites,
}

impl Scene {
    pub fn new(cfg: &Config) -> Self {
        Self {
            sprites: Sprites::new(cfg.bird.frame_count),
        }
    }

    pub fn viewport(cfg: &Config, buf: &PixelBuf) -> Viewport {
        Viewport::fit(cfg.screen.width, cfg.screen.height, buf.width(), buf.height())
    }

    pub fn draw(&self, game: &Game, buf: &mut PixelBuf) {
        let cfg = game.config();
        let vp = Self::viewport(cfg, buf);
        buf.clear(sprites::LETTERBOX);

        draw_sky(buf, &vp, cfg);
        draw_hills(buf, &vp, cfg);
        for pair in game.pairs() {
            for pipe in pair.pipes() {
                draw_pipe(buf, &vp, cfg, pipe);
            }
        }
        draw_ground(buf, &vp, cfg, game.ground_offset());
        self.draw_bird(buf, &vp, game);

        let cell = vp.px(GLYPH_CELL);
        let mid_x = vp.to_buf_x((cfg.screen.width / 2) as f32);
        draw_text(
            buf,
            &game.score().to_string(),
            mid_x,
            vp.to_buf_y(SCORE_Y as f32),
            cell,
            sprites::WHITE,
        );

        match game.phase() {
            Phase::Idle => {
                let y = vp.to_buf_y((game.bird().rect().top() - 80) as f32);
                draw_text(buf, "CLICK", mid_x, y, cell, sprites::WHITE);
            }
            Phase::Flying => {}
            Phase::GameOver => {
                buf.dim();
                draw_panel(buf, &vp, game);
                draw_button(buf, &vp, game.button().rect());
            }
        }
    }

    /// Samples the current frame through the inverse rotation so the tilt
    /// survives any scale.
    fn draw_bird(&self, buf: &mut PixelBuf, vp: &Viewport, game: &Game) {
        let bird = game.bird();
        let rect = bird.rect();
        let frame = self.sprites.bird_frame(bird.frame());
        let (w, h) = (rect.w as f32, rect.h as f32);
        let cx = rect.x as f32 + w / 2.0;
        let cy = rect.y as f32 + h / 2.0;
        let radius = (w * w + h * h).sqrt() / 2.0;
        let (sin, cos) = bird.angle().to_radians().sin_cos();

        let bounds = Rect::new(
            (cx - radius).floor() as i32,
            (cy - radius).floor() as i32,
            (radius * 2.0).ceil() as i32 + 1,
            (radius * 2.0).ceil() as i32 + 1,
        );
        let (x0, y0, x1, y1) = vp.to_buf_rect(bounds);
        for by in y0..y1 {
            for bx in x0..x1 {
                let (wx, wy) = vp.to_world(bx, by);
                let (dx, dy) = (wx - cx, wy - cy);
                let sx = dx * cos - dy * sin;
                let sy = dx * sin + dy * cos;
                if let Some(c) = sample(frame, sx / w + 0.5, sy / h + 0.5) {
                    buf.set(bx, by, c);
                }
            }
        }
    }
}

fn sample(bitmap: &Bitmap, u: f32, v: f32) -> Option<Rgb> {
    if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
        return None;
    }
    bitmap.get(
        (u * bitmap.w as f32) as usize,
        (v * bitmap.h as f32) as usize,
    )
}

fn draw_sky(buf: &mut PixelBuf, vp: &Viewport, cfg: &Config) {
    let sky = Rect::new(0, 0, cfg.screen.width, cfg.screen.ground_y);
    let (x0, y0, x1, y1) = vp.to_buf_rect(sky);
    let rows = (y1 - y0).max(1);
    for y in y0..y1 {
        let t = (((y - y0) * 256) / rows) as u16;
        let c = Rgb::lerp(sprites::SKY_TOP, sprites::SKY_BOT, t);
        for x in x0..x1 {
            buf.set(x, y, c);
        }
    }
}

fn draw_hills(buf: &mut PixelBuf, vp: &Viewport, cfg: &Config) {
    let (x0, _, x1, _) = vp.to_buf_rect(Rect::new(0, 0, cfg.screen.width, 1));
    let base = vp.to_buf_y(cfg.screen.ground_y as f32);
    let layers: [(f32, f32, f32, Rgb); 2] = [
        (0.012, 50.0, 40.0, sprites::HILL_FAR),
        (0.019, 30.0, 15.0, sprites::HILL_NEAR),
    ];
    for (freq, amp, lift, color) in layers {
        for x in x0..x1 {
            let (wx, _) = vp.to_world(x, 0);
            let fx = wx * freq;
            let h = (fx.sin() * amp + (fx * 1.7).sin() * amp * 0.5) + amp + lift;
            let top = vp.to_buf_y(cfg.screen.ground_y as f32 - h);
            for y in top..base {
                buf.set(x, y, color);
            }
        }
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return sprites::PIPE_M;
    }
    let t = (x.clamp(0, total_w - 1) as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(sprites::PIPE_L, sprites::PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(sprites::PIPE_M, sprites::PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(sprites::PIPE_HI, sprites::PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(sprites::PIPE_R, sprites::PIPE_L, ((t - 160) * 3).min(256))
    }
}

fn fill_shaded(buf: &mut PixelBuf, rect: (i32, i32, i32, i32), clip_bottom: i32) {
    let (x0, y0, x1, y1) = rect;
    let w = x1 - x0;
    for x in x0..x1 {
        let c = pipe_shade(x - x0, w);
        for y in y0..y1.min(clip_bottom) {
            buf.set(x, y, c);
        }
    }
}

fn draw_pipe(buf: &mut PixelBuf, vp: &Viewport, cfg: &Config, pipe: &Pipe) {
    let ground = vp.to_buf_y(cfg.screen.ground_y as f32);
    let r = pipe.rect;
    fill_shaded(buf, vp.to_buf_rect(r), ground);

    // The cap sits on the end facing the gap.
    let cap_y = match pipe.kind {
        PipeKind::Top => r.bottom() - CAP_H,
        PipeKind::Bottom => r.top(),
    };
    let cap = Rect::new(r.x - CAP_EXTRA, cap_y, r.w + CAP_EXTRA * 2, CAP_H);
    let (x0, y0, x1, y1) = vp.to_buf_rect(cap);
    fill_shaded(buf, (x0, y0, x1, y1), ground);
    for x in x0..x1 {
        if y0 < ground {
            buf.set(x, y0, sprites::CAP_DARK);
        }
        if y1 - 1 < ground {
            buf.set(x, y1 - 1, sprites::CAP_DARK);
        }
    }
}

fn draw_ground(buf: &mut PixelBuf, vp: &Viewport, cfg: &Config, offset: i32) {
    let strip = Rect::new(
        0,
        cfg.screen.ground_y,
        cfg.screen.width,
        cfg.screen.height - cfg.screen.ground_y,
    );
    let (x0, y0, x1, y1) = vp.to_buf_rect(strip);
    let grass_end = vp.to_buf_y((cfg.screen.ground_y + GRASS_H) as f32).max(y0 + 1);
    for y in y0..y1 {
        for x in x0..x1 {
            let (wx, wy) = vp.to_world(x, y);
            // The strip is drawn at x = offset, so patterns move with it.
            let gx = wx as i32 - offset;
            let c = if y < grass_end {
                if (gx / 12).rem_euclid(2) == 0 {
                    sprites::GRASS
                } else {
                    sprites::GRASS_LIGHT
                }
            } else {
                let gy = wy as i32 - cfg.screen.ground_y;
                if (gx + gy * 2).rem_euclid(48) < 24 {
                    sprites::DIRT
                } else {
                    sprites::DIRT_DARK
                }
            };
            buf.set(x, y, c);
        }
    }
}

/// Text centred on `cx`, each glyph pixel `cell` buffer pixels square.
fn draw_text(buf: &mut PixelBuf, text: &str, cx: i32, y: i32, cell: i32, fg: Rgb) {
    let start_x = cx - sprites::text_cells(text) * cell / 2;
    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = sprites::glyph(ch) else {
            continue;
        };
        let gx = start_x + i as i32 * 4 * cell;
        for row in 0..5 {
            for col in 0..3 {
                if glyph[row * 3 + col] == 1 {
                    let px = gx + col as i32 * cell;
                    let py = y + row as i32 * cell;
                    buf.fill_rect(px + 1, py + 1, cell, cell, sprites::SHADOW);
                    buf.fill_rect(px, py, cell, cell, fg);
                }
            }
        }
    }
}

/// Score card stacked above the restart button.
fn draw_panel(buf: &mut PixelBuf, vp: &Viewport, game: &Game) {
    let (score, best) = (game.score(), game.best());
    let button = game.button().rect();
    let mid_x = game.config().screen.width / 2;
    let panel = Rect::centered(mid_x, button.top() - 110, 240, 170);
    let (x0, y0, x1, y1) = vp.to_buf_rect(panel);
    buf.fill_rect(x0 - 1, y0 - 1, x1 - x0 + 2, y1 - y0 + 2, sprites::SHADOW);
    buf.fill_rect(x0, y0, x1 - x0, y1 - y0, sprites::DIRT);
    buf.fill_rect(x0 + 1, y0 + 1, x1 - x0 - 2, y1 - y0 - 2, sprites::PANEL);

    let cell = vp.px(GLYPH_CELL);
    let cx = (x0 + x1) / 2;
    let line = |world_dy: i32| vp.to_buf_y((panel.top() + world_dy) as f32);
    draw_text(buf, &score.to_string(), cx, line(15), cell, sprites::WHITE);
    draw_text(buf, "BEST", cx, line(70), cell, sprites::GOLD);
    draw_text(buf, &best.to_string(), cx, line(115), cell, sprites::GOLD);
}

fn draw_button(buf: &mut PixelBuf, vp: &Viewport, rect: Rect) {
    let (x0, y0, x1, y1) = vp.to_buf_rect(rect);
    buf.fill_rect(x0, y0, x1 - x0, y1 - y0, sprites::BUTTON_EDGE);
    buf.fill_rect(x0 + 1, y0 + 1, x1 - x0 - 2, y1 - y0 - 2, sprites::BUTTON);

    let label = if sprites::text_cells("RESTART") + 2 <= x1 - x0 {
        "RESTART"
    } else {
        "R"
    };
    let text_y = (y0 + y1) / 2 - 2;
    draw_text(buf, label, (x0 + x1) / 2, text_y, 1, sprites::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FrameInput;

    fn big_buf(cfg: &Config) -> PixelBuf {
        PixelBuf::new(cfg.screen.width as usize / 4, cfg.screen.height as usize / 4)
    }

    #[test]
    fn bird_is_drawn_at_its_position() {
        let cfg = Config::default();
        let game = Game::new(cfg.clone(), 3);
        let scene = Scene::new(&cfg);
        let mut buf = big_buf(&cfg);
        scene.draw(&game, &mut buf);

        let vp = Scene::viewport(&cfg, &buf);
        let c = game.bird().rect().center();
        let px = buf.get(
            vp.to_buf_x(c.x as f32) as usize,
            vp.to_buf_y(c.y as f32) as usize,
        );
        let sky_x = vp.to_buf_x(700.0) as usize;
        let sky = buf.get(sky_x, vp.to_buf_y(c.y as f32) as usize);
        assert_ne!(px, sky);
    }

    #[test]
    fn game_over_dims_and_shows_button() {
        let cfg = Config::default();
        let mut game = Game::new(cfg.clone(), 3);
        let click = FrameInput {
            pressed: true,
            activated: true,
            ..FrameInput::default()
        };
        game.tick(16, &click);
        let mut t = 32;
        while game.phase() != Phase::GameOver {
            game.tick(t, &FrameInput::default());
            t += 16;
        }

        let scene = Scene::new(&cfg);
        let mut buf = big_buf(&cfg);
        scene.draw(&game, &mut buf);
        let vp = Scene::viewport(&cfg, &buf);
        let (x0, y0, _, _) = vp.to_buf_rect(game.button().rect());
        assert_eq!(buf.get(x0 as usize, y0 as usize), sprites::BUTTON_EDGE);
    }

    #[test]
    fn viewport_follows_a_resized_buffer() {
        let cfg = Config::default();
        let mut buf = big_buf(&cfg);
        let before = Scene::viewport(&cfg, &buf);

        // Terminal doubled: 216x117 cells, 432x468 pixels.
        buf.resize(432, 468);
        let after = Scene::viewport(&cfg, &buf);
        let centre_cell = (216, 117);

        let p = after.cell_to_world(centre_cell.0, centre_cell.1);
        assert!((p.x - 432).abs() <= 4, "x = {}", p.x);
        assert!((p.y - 468).abs() <= 4, "y = {}", p.y);

        // The pre-resize mapping would put that click off the world.
        let stale = before.cell_to_world(centre_cell.0, centre_cell.1);
        assert!(stale.x >= cfg.screen.width);
    }

    #[test]
    fn tiny_buffers_do_not_panic() {
        let cfg = Config::default();
        let game = Game::new(cfg.clone(), 3);
        let scene = Scene::new(&cfg);
        for (w, h) in [(0, 0), (1, 2), (3, 1), (40, 10)] {
            let mut buf = PixelBuf::new(w, h);
            scene.draw(&game, &mut buf);
        }
    }

    #[test]
    fn shade_handles_every_column() {
        for x in 0..20 {
            let _ = pipe_shade(x, 20);
        }
        assert_eq!(pipe_shade(0, 1), sprites::PIPE_M);
    }
}
