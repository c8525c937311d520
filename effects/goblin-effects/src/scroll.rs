//! Scroll-driven effects: the "scroll down" indicator fade and hero parallax

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goblin_particles::DeviceClass;

use crate::error::{EffectsError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollOptions {
    /// Scroll distance over which the indicator fades out completely
    pub indicator_fade_distance: f32,
    /// Hero background offset per pixel scrolled
    pub parallax_factor: f32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            indicator_fade_distance: 200.0,
            parallax_factor: 0.25,
        }
    }
}

impl ScrollOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.indicator_fade_distance.is_finite() && self.indicator_fade_distance > 0.0) {
            return Err(EffectsError::InvalidOption(format!(
                "indicator fade distance must be positive, got {}",
                self.indicator_fade_distance
            )));
        }
        if !self.parallax_factor.is_finite() {
            return Err(EffectsError::InvalidOption(
                "parallax factor must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Styles to apply after a scroll event
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollUpdate {
    /// Opacity of the scroll indicator
    pub indicator_opacity: f32,
    /// Hero background transform, `None` when parallax is disabled
    pub parallax_transform: Option<String>,
}

/// Scroll handlers for one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEffects {
    options: ScrollOptions,
    device: DeviceClass,
}

impl ScrollEffects {
    pub fn new(options: ScrollOptions, device: DeviceClass) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, device })
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    /// Indicator opacity, fading linearly from 1 at the top to 0
    ///
    /// Overscroll above the top (negative offsets) stays fully opaque.
    pub fn indicator_opacity(&self, scroll_y: f32) -> f32 {
        (1.0 - scroll_y / self.options.indicator_fade_distance).clamp(0.0, 1.0)
    }

    /// Vertical hero background offset; parallax only runs on desktop
    pub fn parallax_offset(&self, scroll_y: f32) -> Option<f32> {
        if self.device.is_mobile() {
            return None;
        }
        Some(scroll_y * self.options.parallax_factor)
    }

    pub fn parallax_transform(&self, scroll_y: f32) -> Option<String> {
        self.parallax_offset(scroll_y)
            .map(|offset| format!("translateY({offset}px)"))
    }

    /// Everything a scroll event changes
    pub fn on_scroll(&self, scroll_y: f32) -> ScrollUpdate {
        ScrollUpdate {
            indicator_opacity: self.indicator_opacity(scroll_y),
            parallax_transform: self.parallax_transform(scroll_y),
        }
    }
}
