//! Collision detection and pass-through scoring.

use crate::geom::Rect;
use crate::pipe::PipePair;

/// Result of one frame's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub collided: bool,
    /// Collision was with the ground (the bird also stops flying).
    pub hit_ground: bool,
    pub score_delta: u32,
}

/// Tracks whether the bird is part-way through the nearest pair.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    pass_pending: bool,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pass_pending(&self) -> bool {
        self.pass_pending
    }

    pub fn clear(&mut self) {
        self.pass_pending = false;
    }

    /// Arms once the bird sits fully between the pair's edges, then scores
    /// when the bird's left edge clears the pair's right edge.
    pub fn observe(&mut self, bird: Rect, nearest: Option<&PipePair>) -> u32 {
        let Some(pair) = nearest else {
            return 0;
        };
        if !self.pass_pending && bird.left() > pair.left() && bird.right() < pair.right() {
            self.pass_pending = true;
        }
        if self.pass_pending && bird.left() > pair.right() {
            self.pass_pending = false;
            return 1;
        }
        0
    }
}

pub fn collides(bird: Rect, pairs: &[PipePair], ground_y: i32) -> (bool, bool) {
    let hit_ground = bird.bottom() > ground_y;
    let hit_pipe = pairs
        .iter()
        .flat_map(PipePair::pipes)
        .any(|p| bird.intersects(&p.rect));
    (hit_pipe || bird.top() < 0 || hit_ground, hit_ground)
}

/// Score first, then collisions, against the pairs in spawn order.
pub fn evaluate(
    bird: Rect,
    pairs: &[PipePair],
    ground_y: i32,
    tracker: &mut ScoreTracker,
) -> Evaluation {
    let score_delta = tracker.observe(bird, pairs.first());
    let (collided, hit_ground) = collides(bird, pairs, ground_y);
    Evaluation {
        collided,
        hit_ground,
        score_delta,
    }
}
