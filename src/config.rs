use thiserror::Error;

use crate::collision::min_safe_index;

pub const DEFAULT_WIDTH: f64 = 640.0;
pub const DEFAULT_HEIGHT: f64 = 480.0;
pub const DEFAULT_INITIAL_LENGTH: usize = 48;
pub const DEFAULT_APPLE_RADIUS: f64 = 8.0;
pub const DEFAULT_SEGMENTS_PER_APPLE: usize = 48;
pub const DEFAULT_SEGMENT_RADIUS: f64 = 5.0;
pub const DEFAULT_CLIP_RADIUS: f64 = 1.5;
/// Twice the clipping radius keeps the spacing correction stable.
pub const DEFAULT_STEP: f64 = 3.0;
pub const DEFAULT_TURN_RATE: f64 = 0.08;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("turn rate must be finite, got {0}")]
    BadTurnRate(f64),
    #[error("initial length must be at least 1")]
    EmptyChain,
    #[error("step {step} exceeds twice the clipping radius {clip_radius}")]
    UnstableStep { step: f64, clip_radius: f64 },
    #[error("{name} {value} is too large for a {width}x{height} plane")]
    TooLargeForPlane {
        name: &'static str,
        value: f64,
        width: f64,
        height: f64,
    },
}

/// Constants fixed for the lifetime of one simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub width: f64,
    pub height: f64,
    pub initial_length: usize,
    pub step: f64,
    pub turn_rate: f64,
    pub segment_radius: f64,
    pub clip_radius: f64,
    pub apple_radius: f64,
    pub segments_per_apple: usize,
    /// Overrides the derived first collidable body index.
    pub safe_zone: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_length: DEFAULT_INITIAL_LENGTH,
            step: DEFAULT_STEP,
            turn_rate: DEFAULT_TURN_RATE,
            segment_radius: DEFAULT_SEGMENT_RADIUS,
            clip_radius: DEFAULT_CLIP_RADIUS,
            apple_radius: DEFAULT_APPLE_RADIUS,
            segments_per_apple: DEFAULT_SEGMENTS_PER_APPLE,
            safe_zone: None,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("step", self.step),
            ("segment radius", self.segment_radius),
            ("clipping radius", self.clip_radius),
            ("apple radius", self.apple_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !self.turn_rate.is_finite() {
            return Err(ConfigError::BadTurnRate(self.turn_rate));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::EmptyChain);
        }
        if self.step > 2.0 * self.clip_radius {
            return Err(ConfigError::UnstableStep {
                step: self.step,
                clip_radius: self.clip_radius,
            });
        }
        // Single wrap corrections and folded distances assume small moves.
        let half_side = self.width.min(self.height) / 2.0;
        for (name, value) in [
            ("step", self.step),
            ("clipping span", 2.0 * self.clip_radius),
        ] {
            if value >= half_side {
                return Err(ConfigError::TooLargeForPlane {
                    name,
                    value,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    pub fn safe_index(&self) -> usize {
        self.safe_zone
            .unwrap_or_else(|| min_safe_index(self.segment_radius, self.clip_radius))
    }
}
