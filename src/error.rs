//! Error types for configuration loading and the terminal session.

/// Error type for everything the library can fail at.
///
/// Gameplay itself never fails: a crash into a pipe is a phase change, not an
/// error. Only the edges of the program (config files, the terminal) produce
/// these.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// IO error from the filesystem or the terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has the wrong shape
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written back out
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config parsed but holds values the game cannot run with
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, GameError>;
