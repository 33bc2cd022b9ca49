use std::fmt;

use super::source::SourceKind;

pub const DEFAULT_MEDIA_SPEED_FACTOR: f32 = 1.5;

/// Knobs for turning a [`Source`](super::Source) into text.
///
/// `recover_image_text` only affects documents and `speed_factor` only
/// affects media; each normalizer ignores the option it has no use for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationOptions {
    pub recover_image_text: bool,
    pub speed_factor: SpeedFactor,
}

impl NormalizationOptions {
    /// Defaults for the given kind: media is sped up by 1.5x, documents
    /// skip image text recovery.
    pub fn for_kind(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Document => Self::default(),
            SourceKind::Media => Self {
                recover_image_text: false,
                speed_factor: SpeedFactor::new(DEFAULT_MEDIA_SPEED_FACTOR)
                    .unwrap_or_default(),
            },
        }
    }

    pub fn with_image_text_recovery(mut self, enabled: bool) -> Self {
        self.recover_image_text = enabled;
        self
    }

    pub fn with_speed_factor(mut self, speed_factor: SpeedFactor) -> Self {
        self.speed_factor = speed_factor;
        self
    }
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            recover_image_text: false,
            speed_factor: SpeedFactor::default(),
        }
    }
}

/// Audio playback-rate multiplier applied before transcription.
///
/// Always finite and strictly positive. Values above 1.0 shorten the audio
/// and raise its pitch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpeedFactor(f32);

impl SpeedFactor {
    pub fn new(value: f32) -> Result<Self, InvalidSpeedFactor> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidSpeedFactor(value))
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn is_identity(&self) -> bool {
        (self.0 - 1.0).abs() < f32::EPSILON
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("speed factor must be a finite number greater than zero, got {0}")]
pub struct InvalidSpeedFactor(pub f32);
