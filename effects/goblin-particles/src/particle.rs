//! Individual particle representation

use glam::Vec2;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Hsla;
use crate::config::{ParticleConfig, TwinkleConfig};
use crate::surface::{Bounds, Surface, SurfaceSize};

/// Lifecycle state of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    /// Within its frame budget and inside the inflated surface bounds
    Alive,
    /// Past its frame budget or drifted out of bounds; must be reseeded
    Expired,
}

/// A single twinkling point light
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Particle {
    /// Position in surface pixels
    pub position: Vec2,
    /// Drift per frame
    pub velocity: Vec2,
    /// Point radius
    pub size: f32,
    /// Current opacity
    pub opacity: f32,
    /// Twinkle direction, +1.0 or -1.0
    pub opacity_dir: f32,
    /// Hue in degrees
    pub hue: f32,
    /// Frames since (re)birth
    pub age: u32,
    /// Frame budget for this lifetime
    pub life: u32,
}

impl Particle {
    /// Seed a fresh particle somewhere on the surface
    pub fn seed<R: Rng + ?Sized>(config: &ParticleConfig, size: SurfaceSize, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.random::<f32>() * size.width,
            rng.random::<f32>() * size.height,
        );
        let point_size = config.size.sample(rng);
        let velocity = Vec2::new(config.drift_x.sample(rng), config.drift_y.sample(rng));
        let opacity = config.opacity.sample(rng);
        let opacity_dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let hue = config.hue.sample(rng);
        let life = config.life.sample(rng);

        Self {
            position,
            velocity,
            size: point_size,
            opacity,
            opacity_dir,
            hue,
            age: 0,
            life,
        }
    }

    /// Advance one frame: drift, age and twinkle
    ///
    /// Opacity is not clamped. It may pass a bound by one step before the
    /// direction flips.
    pub fn advance(&mut self, twinkle: &TwinkleConfig) {
        self.position += self.velocity;
        self.age = self.age.saturating_add(1);

        self.opacity += self.opacity_dir * twinkle.step;
        if self.opacity > twinkle.upper {
            self.opacity_dir = -1.0;
        }
        if self.opacity < twinkle.lower {
            self.opacity_dir = 1.0;
        }
    }

    /// Check whether the particle has used up its budget or left the bounds
    #[inline]
    pub fn state(&self, bounds: &Bounds) -> ParticleState {
        if self.age > self.life || !bounds.contains(self.position) {
            ParticleState::Expired
        } else {
            ParticleState::Alive
        }
    }

    #[inline]
    pub fn is_alive(&self, bounds: &Bounds) -> bool {
        self.state(bounds) == ParticleState::Alive
    }

    /// Point color for the current frame
    pub fn color(&self, config: &ParticleConfig) -> Hsla {
        Hsla::new(self.hue, config.saturation, config.lightness, self.opacity)
    }

    /// Draw the point and its faint halo
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &ParticleConfig) {
        let color = self.color(config);
        surface.fill_circle(self.position.x, self.position.y, self.size, color);
        surface.fill_circle(
            self.position.x,
            self.position.y,
            self.size * config.glow.radius_scale,
            color.with_alpha(self.opacity * config.glow.alpha_scale),
        );
    }
}
