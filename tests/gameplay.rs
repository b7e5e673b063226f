//! Drives whole runs of the game through its public API.

use flappy_arcade::geom::Point;
use flappy_arcade::{Config, FrameInput, Game, Phase};

const FRAME_MS: u64 = 16;

fn click(pointer: Point) -> FrameInput {
    FrameInput {
        pointer,
        pressed: true,
        pointer_pressed: true,
        activated: true,
        ..FrameInput::default()
    }
}

fn idle() -> FrameInput {
    FrameInput::default()
}

/// Flap (rising edge only) whenever the bird's bottom sinks below `floor`.
struct Autopilot {
    was_pressed: bool,
}

impl Autopilot {
    fn input(&mut self, game: &Game, floor: i32) -> FrameInput {
        let want = game.bird().rect().bottom() > floor;
        let press = want && !self.was_pressed;
        self.was_pressed = press;
        FrameInput {
            pressed: press,
            activated: press,
            ..FrameInput::default()
        }
    }
}

#[test]
fn crash_into_a_pipe_then_restart() {
    let mut game = Game::new(Config::default(), 2024);
    assert_eq!(game.phase(), Phase::Idle);

    // First click: flying, with a jump.
    let outside_button = Point::new(20, 20);
    let out = game.tick(FRAME_MS, &click(outside_button));
    assert!(out.started);
    assert_eq!(game.phase(), Phase::Flying);
    assert_eq!(game.bird().velocity(), -10.0);

    // Hover high above every possible gap until the first pair shows up.
    let mut pilot = Autopilot { was_pressed: true };
    let mut now = FRAME_MS;
    while game.pairs().is_empty() {
        now += FRAME_MS;
        let input = pilot.input(&game, 230);
        game.tick(now, &input);
        assert_eq!(game.phase(), Phase::Flying);
    }
    assert!(now > 1500);
    assert_eq!(game.pairs().len(), 1);
    let pair = &game.pairs()[0];
    assert!((-100..=100).contains(&pair.offset));
    assert_eq!(pair.gap(), 150);

    // Keep hovering: the top pipe reaches down past y = 293, so the bird
    // must run into it.
    while game.phase() == Phase::Flying {
        now += FRAME_MS;
        let input = pilot.input(&game, 230);
        game.tick(now, &input);
        for p in game.pairs() {
            assert_eq!(p.gap(), 150);
        }
        assert!(now < 20_000, "never reached a pipe");
    }
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.score(), 0);
    let frozen: Vec<_> = game.pairs().iter().map(|p| p.left()).collect();
    assert!(!frozen.is_empty());

    // Clicking anywhere but the button changes nothing.
    for _ in 0..5 {
        now += FRAME_MS;
        let out = game.tick(now, &click(outside_button));
        assert!(!out.started && !out.restarted);
        assert_eq!(game.phase(), Phase::GameOver);
    }
    let still: Vec<_> = game.pairs().iter().map(|p| p.left()).collect();
    assert_eq!(frozen, still);

    // Restart.
    now += FRAME_MS;
    let button = game.button().rect().center();
    let out = game.tick(now, &click(button));
    assert!(out.restarted);
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.score(), 0);
    assert!(game.pairs().is_empty());
    let cfg = game.config();
    assert_eq!(game.bird().rect().center(), Point::new(cfg.bird.spawn_x, cfg.bird.spawn_y));
    assert_eq!(game.bird().velocity(), 0.0);

    // Still holding the button on the next frame: no jump, no flight.
    now += FRAME_MS;
    let held = FrameInput {
        pointer: button,
        pressed: true,
        pointer_pressed: true,
        ..FrameInput::default()
    };
    game.tick(now, &held);
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.bird().velocity(), 0.0);
}

#[test]
fn threading_the_gaps_scores_once_per_pair() {
    let mut game = Game::new(Config::default(), 99);
    game.tick(FRAME_MS, &click(Point::new(0, 0)));
    let mut pilot = Autopilot { was_pressed: true };
    let mut now = FRAME_MS;

    while game.score() < 4 {
        now += FRAME_MS;
        let bird_left = game.bird().rect().left();
        let floor = game
            .pairs()
            .iter()
            .find(|p| p.right() > bird_left)
            .map(|p| p.bottom.rect.top() - 10)
            .unwrap_or(533);
        let input = pilot.input(&game, floor);

        let before = game.score();
        let out = game.tick(now, &input);
        assert_eq!(game.phase(), Phase::Flying, "crashed at score {before}");
        assert!(out.scored <= 1);
        assert_eq!(game.score(), before + out.scored);
        assert!(now < 60_000, "stuck at score {before}");
    }
    assert_eq!(game.score(), 4);
}

#[test]
fn idle_bird_ignores_time() {
    let mut game = Game::new(Config::default(), 5);
    let start = game.bird().rect();
    for i in 1..=300 {
        game.tick(i * FRAME_MS, &idle());
    }
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.bird().rect(), start);
    assert!(game.pairs().is_empty());
}
