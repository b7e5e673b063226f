//! The player's bird: gravity, rising-edge jumps, flap animation and tilt.

use crate::config::{BirdConfig, ScreenConfig};
use crate::geom::Rect;

#[derive(Debug, Clone)]
pub struct Bird {
    rect: Rect,
    velocity: f32,
    frame: usize,
    counter: u32,
    /// Set while the input stays held after a jump.
    clicked: bool,
    game_over: bool,
    spawn: (i32, i32),
    gravity: f32,
    max_fall_speed: f32,
    jump_velocity: f32,
    flap_cooldown: u32,
    frame_count: usize,
    ground_y: i32,
}

impl Bird {
    pub fn new(cfg: &BirdConfig, screen: &ScreenConfig) -> Self {
        Self {
            rect: Rect::centered(cfg.spawn_x, cfg.spawn_y, cfg.width, cfg.height),
            velocity: 0.0,
            frame: 0,
            counter: 0,
            clicked: false,
            game_over: false,
            spawn: (cfg.spawn_x, cfg.spawn_y),
            gravity: cfg.gravity,
            max_fall_speed: cfg.max_fall_speed,
            jump_velocity: cfg.jump_velocity,
            flap_cooldown: cfg.flap_cooldown,
            frame_count: cfg.frame_count,
            ground_y: screen.ground_y,
        }
    }

    pub fn update(&mut self, flying: bool, game_over: bool, pressed: bool) {
        self.game_over = game_over;

        if flying {
            self.velocity = (self.velocity + self.gravity).min(self.max_fall_speed);
        }

        if game_over {
            // A press that starts while frozen is never a jump edge later.
            self.clicked = pressed;
            return;
        }

        if pressed && !self.clicked {
            self.clicked = true;
            self.velocity = self.jump_velocity;
        }
        if !pressed {
            self.clicked = false;
        }

        // Stop moving once on the ground so the ground check can still fire.
        if self.rect.bottom() < self.ground_y {
            self.rect.y += self.velocity as i32;
        }

        self.counter += 1;
        if self.counter > self.flap_cooldown {
            self.counter = 0;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }

    /// Switch to the dead pose immediately, on the tick the crash happens.
    pub fn die(&mut self) {
        self.game_over = true;
    }

    /// Back to the spawn point, at rest. The click latch is left alone so a
    /// press held through the restart click is not read as a jump.
    pub fn reset(&mut self) {
        self.rect.set_center(self.spawn.0, self.spawn.1);
        self.velocity = 0.0;
        self.game_over = false;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Counter-clockwise tilt in degrees: nose up while rising, nose down
    /// while falling, straight down once dead.
    pub fn angle(&self) -> f32 {
        if self.game_over {
            -90.0
        } else {
            -2.0 * self.velocity
        }
    }

    #[cfg(test)]
    pub(crate) fn set_y(&mut self, y: i32) {
        self.rect.y = y;
    }

    #[cfg(test)]
    pub(crate) fn set_velocity(&mut self, v: f32) {
        self.velocity = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird() -> Bird {
        Bird::new(&BirdConfig::default(), &ScreenConfig::default())
    }

    #[test]
    fn gravity_accumulates_up_to_max_fall_speed() {
        let mut b = bird();
        let mut expected = 0.0f32;
        for _ in 0..40 {
            b.update(true, false, false);
            expected = (expected + 0.5).min(8.0);
            assert_eq!(b.velocity(), expected);
        }
        assert_eq!(b.velocity(), 8.0);
    }

    #[test]
    fn no_gravity_while_idle() {
        let mut b = bird();
        let start = b.rect();
        for _ in 0..10 {
            b.update(false, false, false);
        }
        assert_eq!(b.velocity(), 0.0);
        assert_eq!(b.rect(), start);
    }

    #[test]
    fn jump_fires_on_rising_edge_only() {
        let mut b = bird();
        b.update(true, false, true);
        assert_eq!(b.velocity(), -10.0);

        // Held: gravity keeps acting, no second impulse.
        b.update(true, false, true);
        assert_eq!(b.velocity(), -9.5);
        b.update(true, false, true);
        assert_eq!(b.velocity(), -9.0);

        // Release then press again.
        b.update(true, false, false);
        b.update(true, false, true);
        assert_eq!(b.velocity(), -10.0);
    }

    #[test]
    fn position_moves_by_truncated_velocity() {
        let mut b = bird();
        let y0 = b.rect().y;
        b.update(true, false, true);
        assert_eq!(b.rect().y, y0 - 10);
        b.update(true, false, true);
        // -9.5 truncates toward zero.
        assert_eq!(b.rect().y, y0 - 19);
    }

    #[test]
    fn stops_moving_at_the_ground() {
        let mut b = bird();
        b.set_y(768 - 36);
        b.set_velocity(8.0);
        b.update(true, false, false);
        assert_eq!(b.rect().bottom(), 768);
    }

    #[test]
    fn frozen_once_game_over() {
        let mut b = bird();
        b.set_velocity(3.0);
        let start = b.rect();
        b.update(true, true, true);
        assert_eq!(b.rect(), start);
        assert_eq!(b.velocity(), 3.5);
        assert_eq!(b.angle(), -90.0);
    }

    #[test]
    fn die_switches_to_the_dead_pose_at_once() {
        let mut b = bird();
        b.set_velocity(8.0);
        b.update(true, false, false);
        assert_eq!(b.angle(), -16.0);
        b.die();
        assert_eq!(b.angle(), -90.0);
        b.reset();
        assert_eq!(b.angle(), 0.0);
    }

    #[test]
    fn press_held_through_game_over_is_not_a_jump() {
        let mut b = bird();
        b.update(true, true, true);
        b.reset();
        b.update(false, false, true);
        assert_eq!(b.velocity(), 0.0);
        b.update(false, false, false);
        b.update(false, false, true);
        assert_eq!(b.velocity(), -10.0);
    }

    #[test]
    fn animation_advances_every_sixth_update() {
        let mut b = bird();
        for _ in 0..5 {
            b.update(false, false, false);
        }
        assert_eq!(b.frame(), 0);
        b.update(false, false, false);
        assert_eq!(b.frame(), 1);
        for _ in 0..12 {
            b.update(false, false, false);
        }
        assert_eq!(b.frame(), 0);
    }

    #[test]
    fn angle_follows_velocity() {
        let mut b = bird();
        b.set_velocity(-10.0);
        assert_eq!(b.angle(), 20.0);
        b.set_velocity(8.0);
        assert_eq!(b.angle(), -16.0);
    }

    #[test]
    fn reset_restores_spawn_and_velocity() {
        let mut b = bird();
        b.update(true, false, true);
        b.update(true, true, true);
        b.reset();
        assert_eq!(b.rect(), Rect::centered(100, 468, 51, 36));
        assert_eq!(b.velocity(), 0.0);
        assert_eq!(b.angle(), 0.0);
    }
}
