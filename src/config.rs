//! Startup configuration: the play-field size and the RNG seed.

use thiserror::Error;

/// Largest play field, in game units.
pub const MAX_WIDTH: f32 = 1200.0;
pub const MAX_HEIGHT: f32 = 800.0;
/// Space kept free around the play field when it is fitted to a display.
pub const DISPLAY_MARGIN: f32 = 100.0;
/// Smallest play field that still holds the level-1 grid above the player row.
pub const MIN_WIDTH: f32 = 400.0;
pub const MIN_HEIGHT: f32 = 300.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("viewport {width}x{height} must have finite dimensions")]
    NonFiniteViewport { width: f32, height: f32 },
    #[error("viewport {width}x{height} is smaller than the minimum {min_width}x{min_height}")]
    ViewportTooSmall {
        width: f32,
        height: f32,
        min_width: f32,
        min_height: f32,
    },
}

/// Size of the play field.  All entity coordinates live in `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    /// Fit the play field into a display of the given size, leaving a margin
    /// and never exceeding `MAX_WIDTH × MAX_HEIGHT`.
    pub fn fit_display(display_width: f32, display_height: f32) -> Self {
        Viewport {
            width: MAX_WIDTH.min(display_width - DISPLAY_MARGIN),
            height: MAX_HEIGHT.min(display_height - DISPLAY_MARGIN),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(MAX_WIDTH, MAX_HEIGHT)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameConfig {
    pub viewport: Viewport,
    /// Fixed seed for a reproducible session; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Viewport { width, height } = self.viewport;
        if !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::NonFiniteViewport { width, height });
        }
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(ConfigError::ViewportTooSmall {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        Ok(())
    }
}
