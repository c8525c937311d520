//! Gold particle field for the Loot Goblins landing page
//!
//! This crate owns the animated background: a fixed-size collection of
//! twinkling point lights that drift slowly upward, fade in and out, and are
//! reseeded when they age out or leave the drawing surface.
//!
//! # Architecture
//!
//! - `Particle`: a single point light with position, drift, twinkle state and
//!   a frame budget
//! - `ParticleField`: owns all particles and the random source, advances and
//!   draws them once per frame
//! - `Surface`: the drawing surface the field renders onto
//! - `AnimationLoop`: drives a field against a `FrameScheduler` until the
//!   scheduler runs dry or its `StopHandle` is triggered
//!
//! # Usage
//!
//! ```rust
//! use goblin_particles::{
//!     AnimationLoop, FixedFrames, ParticleConfig, ParticleField, RecordingSurface, SurfaceSize,
//! };
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let size = SurfaceSize::new(1024.0, 768.0);
//! let field = ParticleField::new(ParticleConfig::default(), size, StdRng::seed_from_u64(7))
//!     .expect("default config is valid");
//! assert_eq!(field.len(), 80);
//!
//! let mut animation = AnimationLoop::new(field, RecordingSurface::new(size));
//! let stats = animation.run(&mut FixedFrames::new(3));
//! assert_eq!(stats.frames, 3);
//! ```

pub mod color;
pub mod config;
pub mod device;
pub mod error;
pub mod field;
pub mod frame;
pub mod particle;
pub mod surface;

pub use color::Hsla;
pub use config::{GlowConfig, LifeSpan, ParticleConfig, Span, TwinkleConfig};
pub use device::DeviceClass;
pub use error::{ParticleError, Result};
pub use field::ParticleField;
pub use frame::{
    AnimationLoop, FixedFrames, FrameScheduler, FrameTick, Interval, LoopStats, StopHandle,
};
pub use particle::{Particle, ParticleState};
pub use surface::{Bounds, DrawCommand, RecordingSurface, Surface, SurfaceSize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
