//! Property tests for the particle field lifecycle invariants

use goblin_particles::{ParticleConfig, ParticleField, SurfaceSize};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const EPSILON: f32 = 1e-5;

fn field(width: f32, height: f32, seed: u64) -> ParticleField {
    ParticleField::new(
        ParticleConfig::default(),
        SurfaceSize::new(width, height),
        StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn length_never_changes(seed in any::<u64>(), width in 1.0f32..2560.0, frames in 0usize..700) {
        let mut f = field(width, 720.0, seed);
        let initial = f.len();
        for _ in 0..frames {
            f.step();
            prop_assert_eq!(f.len(), initial);
        }
    }

    #[test]
    fn no_particle_outlives_its_budget(seed in any::<u64>(), frames in 1usize..700) {
        let mut f = field(1280.0, 720.0, seed);
        for _ in 0..frames {
            f.step();
            for p in f.particles() {
                prop_assert!(p.age <= p.life, "age {} past life {}", p.age, p.life);
            }
        }
    }

    #[test]
    fn opacity_stays_within_one_step_of_bounds(seed in any::<u64>(), frames in 1usize..700) {
        let mut f = field(1280.0, 720.0, seed);
        let twinkle = f.config().twinkle;
        for _ in 0..frames {
            f.step();
            for p in f.particles() {
                prop_assert!(p.opacity >= twinkle.floor() - EPSILON, "opacity {}", p.opacity);
                prop_assert!(p.opacity <= twinkle.ceiling() + EPSILON, "opacity {}", p.opacity);
            }
        }
    }

    #[test]
    fn every_particle_stays_inside_inflated_bounds(
        seed in any::<u64>(),
        width in 1.0f32..2560.0,
        height in 1.0f32..1440.0,
        frames in 1usize..300,
    ) {
        let mut f = field(width, height, seed);
        let bounds = f.size().inflated(f.config().margin);
        for _ in 0..frames {
            f.step();
            for p in f.particles() {
                prop_assert!(p.is_alive(&bounds));
            }
        }
    }

    #[test]
    fn identical_seeds_give_identical_runs(seed in any::<u64>(), frames in 0usize..500) {
        let mut a = field(1024.0, 768.0, seed);
        let mut b = field(1024.0, 768.0, seed);
        for _ in 0..frames {
            a.step();
            b.step();
        }
        prop_assert_eq!(a.particles(), b.particles());
        prop_assert_eq!(a.reseed_count(), b.reseed_count());
    }
}
