//! Frame scheduling and the animation loop
//!
//! A page runs its particle background for as long as the page is open. The
//! loop here does the same by default, but hands out a [`StopHandle`] so an
//! embedding application can end it between two frames.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::field::ParticleField;
use crate::surface::{Surface, SurfaceSize};

/// Frame period of a 60 Hz display
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_nanos(16_666_667);

/// Information about the frame about to be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Zero-based frame index within the scheduler
    pub index: u64,
    /// Time since the scheduler produced its first frame
    pub elapsed: Duration,
}

/// Source of frame callbacks
///
/// Each call blocks until the next frame is due and returns its tick, or
/// `None` once the scheduler has no more frames to give.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<FrameTick>;
}

/// Yields a fixed number of frames immediately
///
/// Elapsed time advances by a nominal period per frame, so timing-dependent
/// consumers behave as they would on a real display.
#[derive(Debug, Clone)]
pub struct FixedFrames {
    total: u64,
    index: u64,
    period: Duration,
}

impl FixedFrames {
    pub fn new(total: u64) -> Self {
        Self::with_period(total, DEFAULT_FRAME_PERIOD)
    }

    pub fn with_period(total: u64, period: Duration) -> Self {
        Self {
            total,
            index: 0,
            period,
        }
    }

    /// Frames not yet handed out
    pub fn remaining(&self) -> u64 {
        self.total - self.index
    }
}

impl FrameScheduler for FixedFrames {
    fn next_frame(&mut self) -> Option<FrameTick> {
        if self.index >= self.total {
            return None;
        }
        let tick = FrameTick {
            index: self.index,
            elapsed: self.period.saturating_mul(self.index.min(u32::MAX as u64) as u32),
        };
        self.index += 1;
        Some(tick)
    }
}

/// Real-time pacing at a fixed rate, never runs dry
///
/// A frame that finishes late does not cause a burst of catch-up frames: the
/// next deadline is measured from the late frame.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    start: Option<Instant>,
    next: Option<Instant>,
    index: u64,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            start: None,
            next: None,
            index: 0,
        }
    }

    /// Pace at the given frames per second; zero falls back to 60
    pub fn from_fps(fps: u32) -> Self {
        if fps == 0 {
            return Self::default();
        }
        Self::new(Duration::from_secs(1) / fps)
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_PERIOD)
    }
}

impl FrameScheduler for Interval {
    fn next_frame(&mut self) -> Option<FrameTick> {
        let now = Instant::now();
        let start = *self.start.get_or_insert(now);

        if let Some(deadline) = self.next {
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }

        let frame_time = Instant::now();
        self.next = Some(frame_time + self.period);

        let tick = FrameTick {
            index: self.index,
            elapsed: frame_time.duration_since(start),
        };
        self.index += 1;
        Some(tick)
    }
}

/// Shared flag that ends an [`AnimationLoop`]
///
/// Cloning gives another handle to the same flag. Triggering it from any
/// thread stops the loop before its next frame; the frame in progress always
/// completes.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Clear the flag so the loop can be run again
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::Release);
    }
}

/// Summary of one [`AnimationLoop::run`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    /// Frames rendered
    pub frames: u64,
    /// Particles reseeded across those frames
    pub reseeded: u64,
    /// Whether the loop ended through its stop handle
    pub stopped: bool,
}

/// Drives a particle field onto a surface, one frame per scheduler tick
#[derive(Debug)]
pub struct AnimationLoop<S, R> {
    field: ParticleField<R>,
    surface: S,
    stop: StopHandle,
}

impl<S: Surface, R: Rng> AnimationLoop<S, R> {
    /// Pair a field with the surface it renders onto
    ///
    /// The field adopts the surface dimensions if they differ.
    pub fn new(mut field: ParticleField<R>, surface: S) -> Self {
        let size = surface.size();
        if field.size() != size {
            field.resize(size);
        }
        Self {
            field,
            surface,
            stop: StopHandle::new(),
        }
    }

    /// Handle that stops this loop
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Take the field and surface back
    pub fn into_parts(self) -> (ParticleField<R>, S) {
        (self.field, self.surface)
    }

    /// Resize the surface and the field together
    pub fn resize(&mut self, size: SurfaceSize) {
        self.surface.resize(size);
        self.field.resize(size);
    }

    /// Render a single frame; returns particles reseeded
    pub fn render_frame(&mut self) -> usize {
        self.field.frame(&mut self.surface)
    }

    /// Run until the scheduler runs dry or the loop is stopped
    pub fn run<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> LoopStats {
        self.run_with(scheduler, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `after_frame` once each frame is drawn
    pub fn run_with<F, C>(&mut self, scheduler: &mut F, mut after_frame: C) -> LoopStats
    where
        F: FrameScheduler + ?Sized,
        C: FnMut(&FrameTick, &S),
    {
        let mut stats = LoopStats::default();
        info!(
            "Animation loop started with {} particles on {}x{}",
            self.field.len(),
            self.surface.size().width,
            self.surface.size().height
        );

        loop {
            if self.stop.is_stopped() {
                stats.stopped = true;
                break;
            }
            let Some(tick) = scheduler.next_frame() else {
                break;
            };
            // The stop may have arrived while waiting for the frame
            if self.stop.is_stopped() {
                stats.stopped = true;
                break;
            }

            stats.reseeded += self.render_frame() as u64;
            stats.frames += 1;
            after_frame(&tick, &self.surface);
        }

        info!(
            "Animation loop ended after {} frames ({} reseeds, stopped: {})",
            stats.frames, stats.reseeded, stats.stopped
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParticleConfig;
    use crate::surface::RecordingSurface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn animation(width: f32, height: f32) -> AnimationLoop<RecordingSurface, StdRng> {
        let size = SurfaceSize::new(width, height);
        let field =
            ParticleField::new(ParticleConfig::default(), size, StdRng::seed_from_u64(11)).unwrap();
        AnimationLoop::new(field, RecordingSurface::new(size))
    }

    #[test]
    fn test_fixed_frames_ticks() {
        let mut frames = FixedFrames::with_period(3, Duration::from_millis(10));
        assert_eq!(
            frames.next_frame(),
            Some(FrameTick {
                index: 0,
                elapsed: Duration::ZERO
            })
        );
        assert_eq!(frames.next_frame().map(|t| t.elapsed), Some(Duration::from_millis(10)));
        assert_eq!(frames.remaining(), 1);
        assert!(frames.next_frame().is_some());
        assert!(frames.next_frame().is_none());
    }

    #[test]
    fn test_interval_from_fps() {
        assert_eq!(Interval::from_fps(50).period(), Duration::from_millis(20));
        assert_eq!(Interval::from_fps(0).period(), DEFAULT_FRAME_PERIOD);
    }

    #[test]
    fn test_interval_paces_frames() {
        let mut interval = Interval::new(Duration::from_millis(5));
        let first = interval.next_frame().unwrap();
        let second = interval.next_frame().unwrap();
        let third = interval.next_frame().unwrap();

        assert_eq!(first.index, 0);
        assert_eq!(third.index, 2);
        assert!(second.elapsed >= Duration::from_millis(5));
        assert!(third.elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn test_run_to_exhaustion() {
        let mut anim = animation(800.0, 600.0);
        let stats = anim.run(&mut FixedFrames::new(10));

        assert_eq!(stats.frames, 10);
        assert!(!stats.stopped);
        assert_eq!(anim.surface().clear_count(), 10);
        assert_eq!(anim.field().frame_count(), 10);
    }

    #[test]
    fn test_stop_between_frames() {
        let mut anim = animation(800.0, 600.0);
        let stop = anim.stop_handle();

        let stats = anim.run_with(&mut FixedFrames::new(100), |tick, _| {
            if tick.index == 4 {
                stop.stop();
            }
        });

        assert_eq!(stats.frames, 5);
        assert!(stats.stopped);
    }

    #[test]
    fn test_stopped_loop_renders_nothing_until_reset() {
        let mut anim = animation(800.0, 600.0);
        let stop = anim.stop_handle();
        stop.stop();

        let stats = anim.run(&mut FixedFrames::new(10));
        assert_eq!(stats.frames, 0);
        assert!(stats.stopped);

        stop.reset();
        let stats = anim.run(&mut FixedFrames::new(10));
        assert_eq!(stats.frames, 10);
    }

    #[test]
    fn test_stop_from_another_thread() {
        let mut anim = animation(320.0, 480.0);
        let stop = anim.stop_handle();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            stop.stop();
        });

        let stats = anim.run(&mut Interval::new(Duration::from_millis(2)));
        stopper.join().unwrap();

        assert!(stats.stopped);
        assert!(stats.frames > 0);
    }

    #[test]
    fn test_new_adopts_surface_size() {
        let field = ParticleField::new(
            ParticleConfig::default(),
            SurfaceSize::new(1024.0, 768.0),
            StdRng::seed_from_u64(1),
        )
        .unwrap();
        let anim = AnimationLoop::new(field, RecordingSurface::new(SurfaceSize::new(640.0, 480.0)));

        assert_eq!(anim.field().size(), SurfaceSize::new(640.0, 480.0));
        // Count was fixed by the width the field was created with
        assert_eq!(anim.field().len(), 80);
    }

    #[test]
    fn test_resize_updates_both() {
        let mut anim = animation(800.0, 600.0);
        anim.resize(SurfaceSize::new(1200.0, 900.0));
        assert_eq!(anim.surface().size(), SurfaceSize::new(1200.0, 900.0));
        assert_eq!(anim.field().size(), SurfaceSize::new(1200.0, 900.0));
    }
}
