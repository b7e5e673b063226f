//! Game state controller: owns every entity and runs one tick per frame.

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::bird::Bird;
use crate::button::RestartButton;
use crate::config::Config;
use crate::ground::GroundScroller;
use crate::input::FrameInput;
use crate::pipe::{PipePair, PipeSpawner};
use crate::rules::{self, ScoreTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first click; bird static, nothing spawns.
    Idle,
    Flying,
    /// Frozen until the restart button is pressed.
    GameOver,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub started: bool,
    pub scored: u32,
    pub crashed: bool,
    pub restarted: bool,
}

pub struct Game {
    cfg: Config,
    phase: Phase,
    bird: Bird,
    pairs: Vec<PipePair>,
    spawner: PipeSpawner,
    tracker: ScoreTracker,
    ground: GroundScroller,
    button: RestartButton,
    score: u32,
    best: u32,
    rng: StdRng,
}

impl Game {
    pub fn new(cfg: Config, seed: u64) -> Self {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(cfg: Config) -> Self {
        Self::with_rng(cfg, StdRng::from_entropy())
    }

    fn with_rng(cfg: Config, rng: StdRng) -> Self {
        Self {
            phase: Phase::Idle,
            bird: Bird::new(&cfg.bird, &cfg.screen),
            pairs: Vec::new(),
            spawner: PipeSpawner::new(&cfg.pipes, &cfg.screen),
            tracker: ScoreTracker::new(),
            ground: GroundScroller::new(cfg.ground.wrap),
            button: RestartButton::new(&cfg.button, &cfg.screen),
            score: 0,
            best: 0,
            rng,
            cfg,
        }
    }

    /// Advance one frame. `now_ms` is the monotonic game clock.
    pub fn tick(&mut self, now_ms: u64, input: &FrameInput) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let flying = self.phase == Phase::Flying;
        let game_over = self.phase == Phase::GameOver;

        self.bird.update(flying, game_over, input.pressed);

        if flying {
            if let Some(pair) = self
                .spawner
                .maybe_spawn(now_ms, flying, game_over, &mut self.rng)
            {
                self.pairs.push(pair);
            }

            let speed = self.cfg.pipes.scroll_speed;
            self.ground.advance(speed);
            for pair in &mut self.pairs {
                pair.update(speed);
            }
            self.pairs.retain(|p| !p.is_off_screen());

            let eval = rules::evaluate(
                self.bird.rect(),
                &self.pairs,
                self.cfg.screen.ground_y,
                &mut self.tracker,
            );
            if eval.score_delta > 0 {
                self.score += eval.score_delta;
                outcome.scored = eval.score_delta;
                debug!(score = self.score, "passed pipe");
            }
            if eval.collided {
                self.phase = Phase::GameOver;
                self.bird.die();
                self.best = self.best.max(self.score);
                outcome.crashed = true;
                info!(
                    score = self.score,
                    best = self.best,
                    ground = eval.hit_ground,
                    "game over"
                );
            }
        }

        let restart_pressed =
            input.restart || self.button.poll(input.pointer, input.pointer_pressed);
        if self.phase == Phase::GameOver && restart_pressed {
            self.restart();
            outcome.restarted = true;
        } else if self.phase == Phase::Idle && input.activated {
            self.phase = Phase::Flying;
            outcome.started = true;
            info!("flying");
        }

        outcome
    }

    /// Clear pipes and score and put the bird back, from any phase.
    pub fn restart(&mut self) {
        self.pairs.clear();
        self.bird.reset();
        self.score = 0;
        self.tracker.clear();
        self.phase = Phase::Idle;
        info!("restart");
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pairs(&self) -> &[PipePair] {
        &self.pairs
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn ground_offset(&self) -> i32 {
        self.ground.offset()
    }

    pub fn button(&self) -> &RestartButton {
        &self.button
    }

    /// The bird is between the nearest pair's edges and has not scored it yet.
    pub fn pass_pending(&self) -> bool {
        self.tracker.pass_pending()
    }

    #[cfg(test)]
    pub(crate) fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }
}
