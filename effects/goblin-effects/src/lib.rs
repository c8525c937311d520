//! Peripheral page effects for the Loot Goblins landing page
//!
//! Each effect is expressed as the computation its event handler performs,
//! detached from any DOM: the host feeds in viewport, pointer and layout
//! data and applies the returned styles.
//!
//! - [`floating`]: randomized descriptors for the drifting loot images
//! - [`reveal`]: one-shot "visible" marking of elements scrolled into view
//! - [`scroll`]: scroll indicator fade and hero parallax
//! - [`tilt`]: 3D tilt of the showcase card under the pointer
//! - [`ripple`]: expanding click ripples on buttons
//!
//! Effects that only make sense with a mouse and a wide screen (parallax,
//! tilt) take a [`DeviceClass`] and do nothing on mobile.

pub mod easing;
pub mod error;
pub mod floating;
pub mod geometry;
pub mod reveal;
pub mod ripple;
pub mod scroll;
pub mod tilt;

pub use error::{EffectsError, Result};
pub use floating::{FloatingItem, FloatingOptions, LOOT_IMAGES, spawn_floating_items};
pub use geometry::{Margin, Rect};
pub use goblin_particles::DeviceClass;
pub use reveal::{RevealOptions, RevealTracker};
pub use ripple::{Ripple, RippleFrame, RippleOptions, RippleSet};
pub use scroll::{ScrollEffects, ScrollOptions, ScrollUpdate};
pub use tilt::{CardTilt, Tilt, TiltOptions};
