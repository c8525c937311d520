//! Floating loot decorations
//!
//! A handful of coin piles and pickaxes drift up behind the hero section.
//! The motion itself is a CSS keyframe loop; this module only rolls the dice
//! for each item: which image, where, how big, how fast, and how visible.

use log::{debug, warn};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use goblin_particles::{DeviceClass, Span};

use crate::error::{EffectsError, Result};

/// Images the floating items are drawn from
pub const LOOT_IMAGES: [&str; 9] = [
    "Assets/Images/coinsandbars/gold_coin_pile_r1_c1.png",
    "Assets/Images/coinsandbars/gold_coin_pile_r1_c2.png",
    "Assets/Images/coinsandbars/gold_coin_pile_r2_c1.png",
    "Assets/Images/coinsandbars/gold_coin_pile_r2_c2.png",
    "Assets/Images/coinsandbars/gold_coin_pile_r3_c1.png",
    "Assets/Images/items/bronze_pickaxe_r1_c1.png",
    "Assets/Images/items/bronze_pickaxe_r1_c2.png",
    "Assets/Images/items/bronze_pickaxe_r2_c1.png",
    "Assets/Images/chest_debris_from_mimic.png",
];

/// Class name the keyframe animation is attached to
pub const FLOATING_ITEM_CLASS: &str = "floating-item";

/// Randomization ranges for floating items
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FloatingOptions {
    pub mobile_count: usize,
    pub desktop_count: usize,
    /// Image catalog to pick from
    pub images: Vec<String>,
    /// Horizontal position in percent of the container width
    pub left_percent: Span,
    /// Rendered width in pixels
    pub width_px: Span,
    /// Scale fed to the keyframes through `--scale`
    pub scale: Span,
    /// Length of one float cycle in seconds
    pub duration_secs: Span,
    /// Peak opacity fed to the keyframes through `--max-opacity`
    pub max_opacity: Span,
}

impl Default for FloatingOptions {
    fn default() -> Self {
        Self {
            mobile_count: 5,
            desktop_count: 10,
            images: LOOT_IMAGES.iter().map(|s| (*s).to_string()).collect(),
            left_percent: Span::new(0.0, 100.0),
            width_px: Span::new(32.0, 60.0),
            scale: Span::new(0.4, 1.0),
            duration_secs: Span::new(18.0, 48.0),
            max_opacity: Span::new(0.25, 0.55),
        }
    }
}

impl FloatingOptions {
    pub fn count_for(&self, device: DeviceClass) -> usize {
        match device {
            DeviceClass::Mobile => self.mobile_count,
            DeviceClass::Desktop => self.desktop_count,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.duration_secs.min > 0.0 && self.duration_secs.min <= self.duration_secs.max) {
            return Err(EffectsError::InvalidDuration {
                effect: "floating",
                reason: format!(
                    "cycle length must be positive, got [{}, {})",
                    self.duration_secs.min, self.duration_secs.max
                ),
            });
        }
        for (name, span) in [
            ("left_percent", self.left_percent),
            ("width_px", self.width_px),
            ("scale", self.scale),
            ("max_opacity", self.max_opacity),
        ] {
            if !(span.min.is_finite() && span.max.is_finite()) || span.min > span.max {
                return Err(EffectsError::InvalidOption(format!(
                    "floating {name} range [{}, {}) is reversed or not finite",
                    span.min, span.max
                )));
            }
        }
        Ok(())
    }
}

/// One floating decoration, ready to be turned into an `<img>`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloatingItem {
    pub image: String,
    pub left_percent: f32,
    pub width_px: f32,
    pub scale: f32,
    pub duration_secs: f32,
    /// Negative, so the item starts part-way through its cycle
    pub delay_secs: f32,
    pub max_opacity: f32,
}

impl FloatingItem {
    /// Roll a single item
    ///
    /// Returns `None` if the image catalog is empty.
    pub fn random<R: Rng + ?Sized>(options: &FloatingOptions, rng: &mut R) -> Option<Self> {
        if options.images.is_empty() {
            return None;
        }
        let index = ((rng.random::<f32>() * options.images.len() as f32) as usize)
            .min(options.images.len() - 1);
        let image = options.images[index].clone();

        let scale = options.scale.sample(rng);
        let duration_secs = options.duration_secs.sample(rng);
        let delay_secs = -(rng.random::<f32>() * duration_secs);
        let left_percent = options.left_percent.sample(rng);
        let max_opacity = options.max_opacity.sample(rng);
        let width_px = options.width_px.sample(rng);

        Some(Self {
            image,
            left_percent,
            width_px,
            scale,
            duration_secs,
            delay_secs,
            max_opacity,
        })
    }

    /// Inline style for the image element
    pub fn css(&self) -> String {
        format!(
            "left: {}%; width: {}px; --scale: {}; --max-opacity: {}; \
             animation-duration: {}s; animation-delay: {}s;",
            self.left_percent,
            self.width_px,
            self.scale,
            self.max_opacity,
            self.duration_secs,
            self.delay_secs
        )
    }

    /// Complete decorative `<img>` element
    pub fn html(&self) -> String {
        format!(
            r#"<img src="{}" class="{FLOATING_ITEM_CLASS}" alt="" aria-hidden="true" style="{}">"#,
            self.image,
            self.css()
        )
    }
}

/// Roll the floating items for a device class
///
/// Fails if `options` does not validate.
pub fn spawn_floating_items<R: Rng + ?Sized>(
    device: DeviceClass,
    options: &FloatingOptions,
    rng: &mut R,
) -> Result<Vec<FloatingItem>> {
    options.validate()?;
    if options.images.is_empty() {
        warn!("No floating loot images configured, skipping floating items");
        return Ok(Vec::new());
    }

    let count = options.count_for(device);
    debug!("Spawning {count} floating loot items ({device})");
    Ok((0..count)
        .filter_map(|_| FloatingItem::random(options, rng))
        .collect())
}
