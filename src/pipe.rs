//! Pipe pairs and the timer that spawns them.

use rand::Rng;
use tracing::debug;

use crate::config::{PipeConfig, ScreenConfig};
use crate::geom::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    /// Hangs from the ceiling; drawn flipped so the cap faces down.
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipe {
    pub kind: PipeKind,
    pub rect: Rect,
}

/// One obstacle: a top and bottom pipe sharing an offset and a spawn time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipePair {
    pub top: Pipe,
    pub bottom: Pipe,
    pub offset: i32,
    pub spawned_at_ms: u64,
}

impl PipePair {
    /// Both pipes start at `x`; the gap is centred on `mid_y + offset`.
    pub fn new(cfg: &PipeConfig, x: i32, mid_y: i32, offset: i32, now_ms: u64) -> Self {
        let center = mid_y + offset;
        let top = Rect::new(x, center - cfg.gap / 2 - cfg.height, cfg.width, cfg.height);
        let bottom = Rect::new(x, center + cfg.gap / 2, cfg.width, cfg.height);
        Self {
            top: Pipe {
                kind: PipeKind::Top,
                rect: top,
            },
            bottom: Pipe {
                kind: PipeKind::Bottom,
                rect: bottom,
            },
            offset,
            spawned_at_ms: now_ms,
        }
    }

    pub fn update(&mut self, scroll_speed: i32) {
        self.top.rect.x -= scroll_speed;
        self.bottom.rect.x -= scroll_speed;
    }

    pub fn left(&self) -> i32 {
        self.bottom.rect.left()
    }

    pub fn right(&self) -> i32 {
        self.bottom.rect.right()
    }

    pub fn gap(&self) -> i32 {
        self.bottom.rect.top() - self.top.rect.bottom()
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() < 0
    }

    pub fn pipes(&self) -> [&Pipe; 2] {
        [&self.top, &self.bottom]
    }
}

#[derive(Debug, Clone)]
pub struct PipeSpawner {
    cfg: PipeConfig,
    screen_width: i32,
    mid_y: i32,
    last_spawn_ms: u64,
}

impl PipeSpawner {
    pub fn new(cfg: &PipeConfig, screen: &ScreenConfig) -> Self {
        Self {
            cfg: cfg.clone(),
            screen_width: screen.width,
            mid_y: screen.height / 2,
            last_spawn_ms: 0,
        }
    }

    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        flying: bool,
        game_over: bool,
        rng: &mut R,
    ) -> Option<PipePair> {
        if !flying || game_over {
            return None;
        }
        if now_ms.saturating_sub(self.last_spawn_ms) <= self.cfg.spawn_interval_ms {
            return None;
        }

        let offset = rng.gen_range(-self.cfg.max_offset..=self.cfg.max_offset);
        self.last_spawn_ms = now_ms;
        debug!(now_ms, offset, "spawning pipe pair");
        Some(PipePair::new(
            &self.cfg,
            self.screen_width,
            self.mid_y,
            offset,
            now_ms,
        ))
    }

    pub fn last_spawn_ms(&self) -> u64 {
        self.last_spawn_ms
    }
}
