//! 3D tilt of the showcase card
//!
//! While the pointer moves over the card, the card leans toward it: up to 8°
//! around the vertical axis and 6° around the horizontal axis, with a slight
//! zoom. Leaving the card snaps it back flat.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goblin_particles::DeviceClass;

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TiltOptions {
    /// Perspective distance in pixels
    pub perspective: f32,
    /// Rotation around Y per unit of horizontal offset, in degrees
    pub yaw_degrees: f32,
    /// Rotation around X per unit of vertical offset, in degrees
    pub pitch_degrees: f32,
    /// Scale while hovered
    pub hover_scale: f32,
}

impl Default for TiltOptions {
    fn default() -> Self {
        Self {
            perspective: 800.0,
            yaw_degrees: 8.0,
            pitch_degrees: 6.0,
            hover_scale: 1.02,
        }
    }
}

/// Card orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
}

impl Tilt {
    /// Flat, unscaled card
    pub const NEUTRAL: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// Tilt toward a pointer position
    ///
    /// The offset is measured from the card centre and normalized to
    /// `[-0.5, 0.5]` on each axis for a pointer inside the card. A card
    /// with no area stays neutral.
    pub fn toward(card: &Rect, pointer: Vec2, options: &TiltOptions) -> Tilt {
        if card.width <= 0.0 || card.height <= 0.0 {
            return Tilt::NEUTRAL;
        }
        let nx = (pointer.x - card.left()) / card.width - 0.5;
        let ny = (pointer.y - card.top()) / card.height - 0.5;

        Tilt {
            rotate_x: -ny * options.pitch_degrees,
            rotate_y: nx * options.yaw_degrees,
            scale: options.hover_scale,
        }
    }

    /// CSS transform for this orientation
    pub fn css(&self, perspective: f32) -> String {
        format!(
            "perspective({perspective}px) rotateY({}deg) rotateX({}deg) scale({})",
            self.rotate_y, self.rotate_x, self.scale
        )
    }
}

/// Pointer handlers for the tilting card
#[derive(Debug, Clone, PartialEq)]
pub struct CardTilt {
    options: TiltOptions,
    enabled: bool,
    current: Tilt,
}

impl CardTilt {
    /// Tilt is only wired up on desktop
    pub fn new(options: TiltOptions, device: DeviceClass) -> Self {
        Self {
            options,
            enabled: !device.is_mobile(),
            current: Tilt::NEUTRAL,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn current(&self) -> Tilt {
        self.current
    }

    /// Pointer moved over the card; returns the new transform
    pub fn pointer_move(&mut self, card: &Rect, pointer: Vec2) -> Option<String> {
        if !self.enabled {
            return None;
        }
        self.current = Tilt::toward(card, pointer, &self.options);
        Some(self.current.css(self.options.perspective))
    }

    /// Pointer left the card; returns the neutral transform
    pub fn pointer_leave(&mut self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        self.current = Tilt::NEUTRAL;
        Some(self.current.css(self.options.perspective))
    }
}
