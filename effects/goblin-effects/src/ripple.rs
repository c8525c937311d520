//! Button click ripples
//!
//! A click drops a translucent white disc at the click point. The disc is as
//! large as the button's longest side, grows to 2.5x while fading out, and
//! is removed once the animation is over.

use std::time::Duration;

use glam::Vec2;
use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::easing::{CubicBezier, EASE_OUT};
use crate::error::{EffectsError, Result};
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RippleOptions {
    /// Animation length; the ripple is removed afterwards
    pub duration: Duration,
    /// Scale reached at the end of the animation
    pub max_scale: f32,
    /// Fill color as RGB
    pub color: [u8; 3],
    /// Fill alpha at the start of the animation
    pub alpha: f32,
}

impl Default for RippleOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            max_scale: 2.5,
            color: [255, 255, 255],
            alpha: 0.3,
        }
    }
}

impl RippleOptions {
    pub fn validate(&self) -> Result<()> {
        if self.duration.is_zero() {
            return Err(EffectsError::InvalidDuration {
                effect: "ripple",
                reason: "duration must be greater than zero".to_string(),
            });
        }
        if !(self.max_scale.is_finite() && self.max_scale > 0.0) {
            return Err(EffectsError::InvalidOption(format!(
                "ripple max scale must be positive, got {}",
                self.max_scale
            )));
        }
        Ok(())
    }

    /// CSS keyframes driving the ripple animation
    pub fn keyframes(&self) -> String {
        format!(
            "@keyframes rippleAnim {{ to {{ transform: scale({}); opacity: 0; }} }}",
            self.max_scale
        )
    }
}

/// Appearance of a ripple at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleFrame {
    pub scale: f32,
    pub opacity: f32,
}

/// A single ripple inside a button
#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    /// Diameter before scaling
    pub size: f32,
    /// Offset of the ripple box from the button's left edge
    pub left: f32,
    /// Offset of the ripple box from the button's top edge
    pub top: f32,
    /// Host time the click happened at
    pub started: Duration,
}

impl Ripple {
    /// Place a ripple for a click inside `button`
    ///
    /// `now` is any monotonically increasing host clock reading.
    pub fn spawn(button: &Rect, click: Vec2, now: Duration) -> Self {
        let size = button.width.max(button.height);
        Self {
            size,
            left: click.x - button.left() - size / 2.0,
            top: click.y - button.top() - size / 2.0,
            started: now,
        }
    }

    /// Centre of the ripple relative to the button
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.size / 2.0, self.top + self.size / 2.0)
    }

    /// Time since the click, zero if `now` is before it
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started)
    }

    pub fn is_expired(&self, now: Duration, options: &RippleOptions) -> bool {
        self.age(now) >= options.duration
    }

    /// Appearance at `now`, `None` once the animation has finished
    pub fn frame_at(&self, now: Duration, options: &RippleOptions) -> Option<RippleFrame> {
        self.frame_with(now, options, &EASE_OUT)
    }

    /// Appearance at `now` under a custom timing function
    pub fn frame_with(
        &self,
        now: Duration,
        options: &RippleOptions,
        timing: &CubicBezier,
    ) -> Option<RippleFrame> {
        if self.is_expired(now, options) {
            return None;
        }
        let t = self.age(now).as_secs_f32() / options.duration.as_secs_f32();
        let progress = timing.ease(t);
        Some(RippleFrame {
            scale: options.max_scale * progress,
            opacity: options.alpha * (1.0 - progress),
        })
    }

    /// Inline style of the ripple `<span>`
    pub fn css(&self, options: &RippleOptions) -> String {
        let [r, g, b] = options.color;
        format!(
            "position: absolute; border-radius: 50%; background: rgba({r},{g},{b},{}); \
             width: {size}px; height: {size}px; left: {}px; top: {}px; transform: scale(0); \
             animation: rippleAnim {}s ease-out; pointer-events: none;",
            options.alpha,
            self.left,
            self.top,
            options.duration.as_secs_f32(),
            size = self.size,
        )
    }
}

/// Live ripples across all buttons, pruned as they finish
#[derive(Debug, Clone, Default)]
pub struct RippleSet {
    options: RippleOptions,
    ripples: Vec<Ripple>,
}

impl RippleSet {
    pub fn new(options: RippleOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            ripples: Vec::new(),
        })
    }

    pub fn options(&self) -> &RippleOptions {
        &self.options
    }

    /// Spawn a ripple for a click and return it
    pub fn click(&mut self, button: &Rect, click: Vec2, now: Duration) -> &Ripple {
        let ripple = Ripple::spawn(button, click, now);
        trace!(
            "Ripple spawned: size {}px at ({}, {})",
            ripple.size, ripple.left, ripple.top
        );
        self.ripples.push(ripple);
        &self.ripples[self.ripples.len() - 1]
    }

    /// Drop every ripple whose animation has finished; returns how many
    pub fn prune(&mut self, now: Duration) -> usize {
        let before = self.ripples.len();
        let options = self.options;
        self.ripples.retain(|ripple| !ripple.is_expired(now, &options));
        before - self.ripples.len()
    }

    pub fn active(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: Rect = Rect::new(50.0, 20.0, 160.0, 48.0);

    #[test]
    fn test_spawn_centered_on_click() {
        let ripple = Ripple::spawn(&BUTTON, Vec2::new(90.0, 40.0), Duration::ZERO);
        assert_eq!(ripple.size, 160.0);
        assert_eq!(ripple.left, 90.0 - 50.0 - 80.0);
        assert_eq!(ripple.top, 40.0 - 20.0 - 80.0);
        assert_eq!(ripple.center(), Vec2::new(40.0, 20.0));
    }

    #[test]
    fn test_tall_button_uses_height() {
        let tall = Rect::new(0.0, 0.0, 40.0, 120.0);
        assert_eq!(Ripple::spawn(&tall, Vec2::ZERO, Duration::ZERO).size, 120.0);
    }

    #[test]
    fn test_animation_frames() {
        let options = RippleOptions::default();
        let ripple = Ripple::spawn(&BUTTON, Vec2::new(60.0, 30.0), Duration::from_millis(1000));

        let start = ripple.frame_at(Duration::from_millis(1000), &options).unwrap();
        assert_eq!(start.scale, 0.0);
        assert!((start.opacity - 0.3).abs() < 1e-6);

        let mid = ripple.frame_at(Duration::from_millis(1300), &options).unwrap();
        assert!(mid.scale > 1.25, "ease-out is past halfway at the midpoint");
        assert!(mid.opacity < 0.15);

        assert_eq!(ripple.frame_at(Duration::from_millis(1600), &options), None);
    }

    #[test]
    fn test_prune_after_duration() {
        let mut set = RippleSet::new(RippleOptions::default()).unwrap();
        set.click(&BUTTON, Vec2::new(60.0, 30.0), Duration::from_millis(0));
        set.click(&BUTTON, Vec2::new(70.0, 30.0), Duration::from_millis(400));
        assert_eq!(set.len(), 2);

        assert_eq!(set.prune(Duration::from_millis(599)), 0);
        assert_eq!(set.prune(Duration::from_millis(600)), 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.prune(Duration::from_millis(1000)), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn test_css() {
        let ripple = Ripple::spawn(&BUTTON, Vec2::new(130.0, 44.0), Duration::ZERO);
        let css = ripple.css(&RippleOptions::default());
        assert!(css.contains("background: rgba(255,255,255,0.3);"));
        assert!(css.contains("width: 160px; height: 160px;"));
        assert!(css.contains("left: 0px; top: -56px;"));
        assert!(css.contains("animation: rippleAnim 0.6s ease-out;"));
    }

    #[test]
    fn test_keyframes() {
        assert_eq!(
            RippleOptions::default().keyframes(),
            "@keyframes rippleAnim { to { transform: scale(2.5); opacity: 0; } }"
        );
    }

    #[test]
    fn test_zero_duration_rejected() {
        let options = RippleOptions {
            duration: Duration::ZERO,
            ..Default::default()
        };
        assert!(RippleSet::new(options).is_err());
    }
}
