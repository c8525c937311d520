//! Drawing surface abstraction
//!
//! The field only needs three things from whatever it draws on: its size, a
//! way to wipe it, and a way to fill a circle with a translucent color. A
//! browser canvas, a native window or an in-memory pixel buffer can all
//! provide that.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Hsla;

/// Width and height of a drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface rectangle grown by `margin` on every side
    pub fn inflated(&self, margin: f32) -> Bounds {
        Bounds {
            min: Vec2::splat(-margin),
            max: Vec2::new(self.width + margin, self.height + margin),
        }
    }
}

/// Axis-aligned rectangle, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Something the particle field can draw on
pub trait Surface {
    /// Current surface dimensions
    fn size(&self) -> SurfaceSize;

    /// Change the surface dimensions; previous contents may be discarded
    fn resize(&mut self, size: SurfaceSize);

    /// Erase the entire surface
    fn clear(&mut self);

    /// Fill a circle centred at `(x, y)`
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn resize(&mut self, size: SurfaceSize) {
        (**self).resize(size);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla) {
        (**self).fill_circle(x, y, radius, color);
    }
}

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Hsla,
    },
}

/// Surface that records draw calls instead of rasterizing them
///
/// `clear` drops everything recorded so far, so after a frame the command
/// list holds exactly what that frame drew.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    clears: u64,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Draw calls since the last clear, starting with that clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Circles drawn since the last clear
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Hsla)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            DrawCommand::Clear => None,
        })
    }

    /// Total number of clears over the surface lifetime
    pub fn clear_count(&self) -> u64 {
        self.clears
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla) {
        self.commands.push(DrawCommand::Circle {
            center: Vec2::new(x, y),
            radius,
            color,
        });
    }
}
