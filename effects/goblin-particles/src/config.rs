//! Particle field configuration
//!
//! Every tunable of the field lives here. The defaults reproduce the gold
//! background of the landing page: 35 particles on phones, 80 on wider
//! screens, gold hues between 40° and 60°, and a slow twinkle between 8% and
//! 65% opacity.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::device::DeviceClass;
use crate::error::{ParticleError, Result};

/// Half-open real interval `[min, max)` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw a value from the interval
    ///
    /// A degenerate span (`min == max`) always yields `min`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    /// Check whether a value lies inside the closed interval
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ParticleError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Frame budget interval `[min, max)` in whole frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LifeSpan {
    pub min: u32,
    pub max: u32,
}

impl LifeSpan {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw a frame budget
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.max <= self.min {
            return self.min;
        }
        let span = (self.max - self.min) as f64;
        let offset = (rng.random::<f64>() * span) as u32;
        // Guard against the float product rounding up to the open bound
        (self.min + offset).min(self.max - 1)
    }

    /// Check whether a budget could have been drawn from this span
    pub fn contains(&self, life: u32) -> bool {
        if self.max <= self.min {
            life == self.min
        } else {
            life >= self.min && life < self.max
        }
    }
}

/// Opacity oscillation settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TwinkleConfig {
    /// Opacity change per frame
    pub step: f32,
    /// Above this the particle starts fading out
    pub upper: f32,
    /// Below this the particle starts fading in
    pub lower: f32,
}

impl Default for TwinkleConfig {
    fn default() -> Self {
        Self {
            step: 0.004,
            upper: 0.65,
            lower: 0.08,
        }
    }
}

impl TwinkleConfig {
    /// Lowest opacity a twinkling particle can reach
    pub fn floor(&self) -> f32 {
        self.lower - self.step
    }

    /// Highest opacity a twinkling particle can reach
    pub fn ceiling(&self) -> f32 {
        self.upper + self.step
    }
}

/// Halo drawn around every particle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlowConfig {
    /// Halo radius as a multiple of the particle size
    pub radius_scale: f32,
    /// Halo alpha as a multiple of the particle opacity
    pub alpha_scale: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            radius_scale: 2.5,
            alpha_scale: 0.15,
        }
    }
}

/// Complete particle field configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticleConfig {
    /// Viewport width below which the device counts as mobile
    pub mobile_breakpoint: f32,
    /// Particle count on mobile viewports
    pub mobile_count: usize,
    /// Particle count on desktop viewports
    pub desktop_count: usize,
    /// Point radius
    pub size: Span,
    /// Horizontal drift per frame
    pub drift_x: Span,
    /// Vertical drift per frame (negative is upward)
    pub drift_y: Span,
    /// Opacity at birth
    pub opacity: Span,
    /// Hue in degrees
    pub hue: Span,
    /// Frame budget before reseeding
    pub life: LifeSpan,
    /// HSL saturation in percent
    pub saturation: f32,
    /// HSL lightness in percent
    pub lightness: f32,
    /// Distance outside the surface a particle may drift before reseeding
    pub margin: f32,
    pub twinkle: TwinkleConfig,
    pub glow: GlowConfig,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            mobile_count: 35,
            desktop_count: 80,
            size: Span::new(0.5, 3.0),
            drift_x: Span::new(-0.15, 0.15),
            drift_y: Span::new(-0.3, 0.0),
            opacity: Span::new(0.1, 0.6),
            hue: Span::new(40.0, 60.0),
            life: LifeSpan::new(200, 600),
            saturation: 80.0,
            lightness: 60.0,
            margin: 10.0,
            twinkle: TwinkleConfig::default(),
            glow: GlowConfig::default(),
        }
    }
}

impl ParticleConfig {
    /// Classify a viewport width against the configured breakpoint
    pub fn device_for_width(&self, viewport_width: f32) -> DeviceClass {
        DeviceClass::from_viewport_width(viewport_width, self.mobile_breakpoint)
    }

    /// Number of particles to create on the given device class
    pub fn count_for(&self, device: DeviceClass) -> usize {
        match device {
            DeviceClass::Mobile => self.mobile_count,
            DeviceClass::Desktop => self.desktop_count,
        }
    }

    /// Check that every range is usable
    pub fn validate(&self) -> Result<()> {
        self.size.validate("size")?;
        self.drift_x.validate("drift_x")?;
        self.drift_y.validate("drift_y")?;
        self.opacity.validate("opacity")?;
        self.hue.validate("hue")?;

        if self.size.min < 0.0 {
            return Err(ParticleError::InvalidRange {
                field: "size",
                min: self.size.min,
                max: self.size.max,
            });
        }

        if self.life.min > self.life.max {
            return Err(ParticleError::InvalidLifeSpan {
                min: self.life.min,
                max: self.life.max,
            });
        }

        let twinkle = &self.twinkle;
        if !(twinkle.step.is_finite() && twinkle.step > 0.0) {
            return Err(ParticleError::InvalidTwinkle(format!(
                "step must be positive, got {}",
                twinkle.step
            )));
        }
        if !(twinkle.lower.is_finite() && twinkle.upper.is_finite())
            || twinkle.lower >= twinkle.upper
        {
            return Err(ParticleError::InvalidTwinkle(format!(
                "lower bound {} must be below upper bound {}",
                twinkle.lower, twinkle.upper
            )));
        }

        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(ParticleError::InvalidConfig(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        if !(self.mobile_breakpoint.is_finite() && self.mobile_breakpoint >= 0.0) {
            return Err(ParticleError::InvalidConfig(format!(
                "mobile breakpoint must be non-negative, got {}",
                self.mobile_breakpoint
            )));
        }
        if !(self.glow.radius_scale >= 0.0 && self.glow.alpha_scale >= 0.0) {
            return Err(ParticleError::InvalidConfig(
                "glow scales must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ParticleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_counts_per_device() {
        let config = ParticleConfig::default();
        assert_eq!(config.count_for(DeviceClass::Mobile), 35);
        assert_eq!(config.count_for(DeviceClass::Desktop), 80);
        assert_eq!(config.device_for_width(767.0), DeviceClass::Mobile);
        assert_eq!(config.device_for_width(768.0), DeviceClass::Desktop);
    }

    #[test]
    fn test_span_sample_within_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let span = Span::new(0.5, 3.0);
        for _ in 0..1000 {
            let v = span.sample(&mut rng);
            assert!((0.5..=3.0).contains(&v));
        }
    }

    #[test]
    fn test_degenerate_span() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Span::new(2.0, 2.0).sample(&mut rng), 2.0);
        assert_eq!(LifeSpan::new(300, 300).sample(&mut rng), 300);
    }

    #[test]
    fn test_life_span_sample_is_half_open() {
        let mut rng = StdRng::seed_from_u64(9);
        let life = LifeSpan::new(200, 600);
        for _ in 0..1000 {
            let v = life.sample(&mut rng);
            assert!(life.contains(v), "{v} outside [200, 600)");
        }
    }

    #[test]
    fn test_reversed_range_rejected() {
        let config = ParticleConfig {
            hue: Span::new(60.0, 40.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ParticleError::InvalidRange { field: "hue", .. })
        ));
    }

    #[test]
    fn test_twinkle_bounds_rejected() {
        let config = ParticleConfig {
            twinkle: TwinkleConfig {
                step: 0.004,
                upper: 0.1,
                lower: 0.5,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ParticleError::InvalidTwinkle(_))
        ));

        let config = ParticleConfig {
            twinkle: TwinkleConfig {
                step: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_life_span_rejected() {
        let config = ParticleConfig {
            life: LifeSpan::new(600, 200),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ParticleError::InvalidLifeSpan { min: 600, max: 200 })
        );
    }
}
