//! Game tuning, loaded from TOML.
//!
//! Every section defaults to the reference layout (864x936 screen, ground at
//! 768, 150px gaps every 1.5s), so a config file only needs the keys it
//! changes.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::geom::Rect;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
    /// Top of the ground strip; the bird dies below it.
    pub ground_y: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 864,
            height: 936,
            ground_y: 768,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BirdConfig {
    pub width: i32,
    pub height: i32,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_velocity: f32,
    /// Updates to wait before advancing the flap animation.
    pub flap_cooldown: u32,
    pub frame_count: usize,
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            width: 51,
            height: 36,
            spawn_x: 100,
            spawn_y: 468,
            gravity: 0.5,
            max_fall_speed: 8.0,
            jump_velocity: -10.0,
            flap_cooldown: 5,
            frame_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipeConfig {
    pub width: i32,
    pub height: i32,
    pub gap: i32,
    pub spawn_interval_ms: u64,
    /// Random gap offset is drawn from `-max_offset..=max_offset`.
    pub max_offset: i32,
    pub scroll_speed: i32,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            width: 78,
            height: 560,
            gap: 150,
            spawn_interval_ms: 1500,
            max_offset: 100,
            scroll_speed: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Scroll offset snaps back to 0 once it passes this distance.
    pub wrap: i32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self { wrap: 35 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Left edge; unset places it relative to the screen centre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// Top edge; unset places it relative to the screen centre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    pub width: i32,
    pub height: i32,
}

impl ButtonConfig {
    /// Where the button sits on `screen`. Unset coordinates follow the
    /// screen actually loaded, not the default one.
    pub fn rect(&self, screen: &ScreenConfig) -> Rect {
        Rect::new(
            self.x.unwrap_or(screen.width / 2 - 50),
            self.y.unwrap_or(screen.height / 2 - 100),
            self.width,
            self.height,
        )
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: 120,
            height: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub bird: BirdConfig,
    pub pipes: PipeConfig,
    pub ground: GroundConfig,
    pub button: ButtonConfig,
    pub timing: TimingConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(GameError::InvalidConfig(msg.to_string()));

        if self.screen.width <= 0 || self.screen.height <= 0 {
            return invalid("screen dimensions must be positive");
        }
        if self.screen.ground_y <= 0 || self.screen.ground_y > self.screen.height {
            return invalid("ground_y must lie inside the screen");
        }
        if self.bird.width <= 0 || self.bird.height <= 0 {
            return invalid("bird dimensions must be positive");
        }
        if self.bird.frame_count == 0 {
            return invalid("bird needs at least one animation frame");
        }
        if self.bird.max_fall_speed <= 0.0 {
            return invalid("max_fall_speed must be positive");
        }
        if self.pipes.width <= 0 || self.pipes.height <= 0 {
            return invalid("pipe dimensions must be positive");
        }
        if self.pipes.gap <= 0 {
            return invalid("pipe gap must be positive");
        }
        if self.pipes.max_offset < 0 {
            return invalid("max_offset must not be negative");
        }
        // A pair must never jump over the bird in a single frame.
        if self.pipes.scroll_speed <= 0 || self.pipes.scroll_speed >= self.pipes.width {
            return invalid("scroll_speed must be positive and narrower than a pipe");
        }
        if self.ground.wrap <= 0 {
            return invalid("ground wrap must be positive");
        }
        if self.button.width <= 0 || self.button.height <= 0 {
            return invalid("button dimensions must be positive");
        }
        if self.timing.fps == 0 {
            return invalid("fps must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_layout() {
        let cfg = Config::default();
        assert_eq!((cfg.screen.width, cfg.screen.height), (864, 936));
        assert_eq!(cfg.screen.ground_y, 768);
        assert_eq!(cfg.bird.gravity, 0.5);
        assert_eq!(cfg.bird.max_fall_speed, 8.0);
        assert_eq!(cfg.bird.jump_velocity, -10.0);
        assert_eq!(cfg.pipes.gap, 150);
        assert_eq!(cfg.pipes.spawn_interval_ms, 1500);
        assert_eq!(cfg.pipes.scroll_speed, 4);
        let button = cfg.button.rect(&cfg.screen);
        assert_eq!((button.x, button.y), (382, 368));
        assert_eq!(cfg.timing.fps, 60);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let cfg = Config::from_toml_str(
            r#"
            [pipes]
            gap = 200

            [timing]
            fps = 30
            "#,
        )
        .unwrap();
        assert_eq!(cfg.pipes.gap, 200);
        assert_eq!(cfg.timing.fps, 30);
        assert_eq!(cfg.pipes.width, 78);
        assert_eq!(cfg.bird, BirdConfig::default());
    }

    #[test]
    fn button_follows_the_loaded_screen() {
        let cfg = Config::from_toml_str("[screen]\nwidth = 1000\nheight = 800\n").unwrap();
        let button = cfg.button.rect(&cfg.screen);
        assert_eq!((button.x, button.y), (450, 300));

        let cfg = Config::from_toml_str("[button]\nx = 10\n").unwrap();
        let button = cfg.button.rect(&cfg.screen);
        assert_eq!((button.x, button.y), (10, 368));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = Config::from_toml_str("[timing]\nfps = 0\n").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));

        let err = Config::from_toml_str("[pipes]\nscroll_speed = 100\n").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::from_toml_str("[pipes\ngap = ").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let text = Config::default().to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), Config::default());
    }
}
