//! The restart button shown on the game-over screen.

use crate::config::{ButtonConfig, ScreenConfig};
use crate::geom::{Point, Rect};

#[derive(Debug, Clone)]
pub struct RestartButton {
    rect: Rect,
}

impl RestartButton {
    pub fn new(cfg: &ButtonConfig, screen: &ScreenConfig) -> Self {
        Self {
            rect: cfg.rect(screen),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// True on every frame the pointer is held down inside the button.
    /// Holding it keeps firing; callers gate on the game phase.
    pub fn poll(&self, pointer: Point, pressed: bool) -> bool {
        pressed && self.rect.contains(pointer)
    }
}
