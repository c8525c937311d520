//! Particle field runtime state

use log::{debug, trace};
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::ParticleConfig;
use crate::device::DeviceClass;
use crate::error::Result;
use crate::particle::{Particle, ParticleState};
use crate::surface::{Surface, SurfaceSize};

/// Fixed-size collection of particles plus everything needed to evolve it
///
/// The field exclusively owns its particles. The collection length is set at
/// construction and never changes: expired particles are reseeded in place.
#[derive(Debug, Clone)]
pub struct ParticleField<R = StdRng> {
    /// Current particles
    particles: Vec<Particle>,
    /// Field settings
    config: ParticleConfig,
    /// Dimensions particles are seeded against
    size: SurfaceSize,
    /// Random source used for every (re)seed
    rng: R,
    /// Frames advanced so far
    frame: u64,
    /// Reseeds performed so far, excluding the initial seeding
    reseeds: u64,
}

impl<R: Rng> ParticleField<R> {
    /// Create a field sized for the device implied by the surface width
    pub fn new(config: ParticleConfig, size: SurfaceSize, rng: R) -> Result<Self> {
        let device = config.device_for_width(size.width);
        let count = config.count_for(device);
        debug!(
            "Creating particle field: {}x{} ({device}) with {count} particles",
            size.width, size.height
        );
        Self::with_count(config, size, count, rng)
    }

    /// Create a field with an explicit particle count
    pub fn with_count(
        config: ParticleConfig,
        size: SurfaceSize,
        count: usize,
        mut rng: R,
    ) -> Result<Self> {
        config.validate()?;

        let particles = (0..count)
            .map(|_| Particle::seed(&config, size, &mut rng))
            .collect();

        Ok(Self {
            particles,
            config,
            size,
            rng,
            frame: 0,
            reseeds: 0,
        })
    }

    /// Get the number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of the particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Dimensions new particles are seeded against
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Device class implied by the current width
    pub fn device(&self) -> DeviceClass {
        self.config.device_for_width(self.size.width)
    }

    /// Frames advanced since construction
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Reseeds performed since construction
    pub fn reseed_count(&self) -> u64 {
        self.reseeds
    }

    /// Update the stored dimensions
    ///
    /// Existing particles keep their positions; those that end up outside the
    /// new bounds are reseeded against the new size on the next step. The
    /// particle count stays what it was at construction.
    pub fn resize(&mut self, size: SurfaceSize) {
        debug!(
            "Particle field resized: {}x{} -> {}x{}",
            self.size.width, self.size.height, size.width, size.height
        );
        self.size = size;
    }

    /// Advance every particle one frame without drawing
    ///
    /// Returns the number of particles reseeded during this step.
    pub fn step(&mut self) -> usize {
        let bounds = self.size.inflated(self.config.margin);
        let mut reseeded = 0;

        for particle in &mut self.particles {
            particle.advance(&self.config.twinkle);

            if particle.state(&bounds) == ParticleState::Expired {
                trace!(
                    "Reseeding particle at ({:.1}, {:.1}) age {}/{}",
                    particle.position.x, particle.position.y, particle.age, particle.life
                );
                *particle = Particle::seed(&self.config, self.size, &mut self.rng);
                reseeded += 1;
            }
        }

        self.frame += 1;
        self.reseeds += reseeded as u64;
        reseeded
    }

    /// Draw the current state without advancing it
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            particle.draw(surface, &self.config);
        }
    }

    /// Run one full frame: clear, advance and draw
    ///
    /// Returns the number of particles reseeded during this frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        surface.clear();
        let reseeded = self.step();
        self.draw(surface);
        reseeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use glam::Vec2;
    use rand::SeedableRng;

    fn field(width: f32, height: f32, seed: u64) -> ParticleField {
        ParticleField::new(
            ParticleConfig::default(),
            SurfaceSize::new(width, height),
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_count_follows_device() {
        assert_eq!(field(1024.0, 768.0, 1).len(), 80);
        assert_eq!(field(320.0, 640.0, 1).len(), 35);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ParticleConfig {
            margin: -1.0,
            ..Default::default()
        };
        let result = ParticleField::new(
            config,
            SurfaceSize::new(100.0, 100.0),
            StdRng::seed_from_u64(1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_step_keeps_length() {
        let mut f = field(800.0, 600.0, 2);
        for _ in 0..1000 {
            f.step();
        }
        assert_eq!(f.len(), 80);
        assert_eq!(f.frame_count(), 1000);
        assert!(f.reseed_count() > 0);
    }

    #[test]
    fn test_out_of_bounds_particle_reseeds() {
        let mut f = field(800.0, 600.0, 3);
        f.particles[0].position = Vec2::new(-15.0, 50.0);
        f.particles[0].velocity = Vec2::ZERO;
        f.particles[0].age = 5;

        let reseeded = f.step();

        assert!(reseeded >= 1);
        assert_eq!(f.particles[0].age, 0);
        assert!(f.particles[0].position.x >= 0.0);
    }

    #[test]
    fn test_expired_by_age_reseeds() {
        let mut f = field(800.0, 600.0, 4);
        f.particles[0].age = f.particles[0].life;
        f.particles[0].position = Vec2::new(400.0, 300.0);
        f.particles[0].velocity = Vec2::ZERO;

        f.step();

        assert_eq!(f.particles[0].age, 0);
    }

    #[test]
    fn test_frame_draws_two_circles_per_particle() {
        let mut f = field(800.0, 600.0, 5);
        let mut surface = RecordingSurface::new(f.size());

        f.frame(&mut surface);

        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.circles().count(), f.len() * 2);
    }

    #[test]
    fn test_resize_does_not_reposition() {
        let mut f = field(800.0, 600.0, 6);
        let before: Vec<Vec2> = f.particles().iter().map(|p| p.position).collect();

        f.resize(SurfaceSize::new(400.0, 300.0));

        let after: Vec<Vec2> = f.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(f.size(), SurfaceSize::new(400.0, 300.0));
        assert_eq!(f.len(), 80);
    }
}
