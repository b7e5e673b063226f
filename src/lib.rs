//! Flappy Bird for the terminal.
//!
//! The simulation (`game`, `bird`, `pipe`, `rules`, `ground`, `button`) runs
//! in an 864x936 world at a fixed 60 Hz and knows nothing about terminals.
//! `input`, `render`, `scene` and `term` connect it to crossterm.

pub mod bird;
pub mod button;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod geom;
pub mod ground;
pub mod input;
pub mod pipe;
pub mod render;
pub mod rules;
pub mod scene;
pub mod sprites;
pub mod term;

pub use config::Config;
pub use error::{GameError, Result};
pub use game::{Game, Phase, TickOutcome};
pub use input::FrameInput;
