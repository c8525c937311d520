//! In-memory raster surface for previews

use std::path::Path;

use anyhow::{Context, Result, bail};
use goblin_particles::{Hsla, Surface, SurfaceSize};
use image::{ImageFormat, Rgba, RgbaImage};

/// RGBA pixel buffer that composites circles with source-over blending
///
/// Circle edges are anti-aliased over one pixel, so sub-pixel particles still
/// leave a faint mark the way they do on a canvas.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    size: SurfaceSize,
    image: RgbaImage,
    background: Rgba<u8>,
}

impl RasterSurface {
    /// Create a surface cleared to `background`
    pub fn new(size: SurfaceSize, background: [u8; 4]) -> Self {
        let background = Rgba(background);
        let (width, height) = pixel_dimensions(size);
        Self {
            size,
            image: RgbaImage::from_pixel(width, height, background),
            background,
        }
    }

    /// Create a transparent surface, like a freshly created canvas
    pub fn transparent(size: SurfaceSize) -> Self {
        Self::new(size, [0, 0, 0, 0])
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Write the current contents as PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("Failed to write PNG: {}", path.display()))
    }

    fn blend(&mut self, x: u32, y: u32, rgb: [u8; 3], alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let da = dst[3] as f32 / 255.0;
        let out_a = alpha + da * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }

        for channel in 0..3 {
            let sc = rgb[channel] as f32;
            let dc = dst[channel] as f32;
            let value = (sc * alpha + dc * da * (1.0 - alpha)) / out_a;
            dst[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        let (width, height) = pixel_dimensions(size);
        self.size = size;
        self.image = RgbaImage::from_pixel(width, height, self.background);
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = self.background;
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla) {
        let alpha = color.clamped_alpha();
        if radius <= 0.0 || alpha <= 0.0 || !x.is_finite() || !y.is_finite() {
            return;
        }
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let reach = radius + 0.5;
        if x + reach < 0.0 || y + reach < 0.0 {
            return;
        }

        let [r, g, b, _] = color.to_rgba8();
        let min_x = (x - reach).floor().max(0.0) as u32;
        let min_y = (y - reach).floor().max(0.0) as u32;
        let max_x = ((x + reach).ceil().max(0.0) as u32).min(width - 1);
        let max_y = ((y + reach).ceil().max(0.0) as u32).min(height - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f32 + 0.5 - x;
                let dy = py as f32 + 0.5 - y;
                let distance = (dx * dx + dy * dy).sqrt();
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, [r, g, b], alpha * coverage);
                }
            }
        }
    }
}

/// Largest width or height accepted for a raster surface
pub const MAX_RASTER_DIMENSION: f32 = 16_384.0;

/// Check that a raster of this size can be allocated
pub fn check_raster_size(size: SurfaceSize) -> Result<()> {
    if !(size.width <= MAX_RASTER_DIMENSION && size.height <= MAX_RASTER_DIMENSION) {
        bail!(
            "Raster dimensions {}x{} exceed the {MAX_RASTER_DIMENSION}px limit per side",
            size.width,
            size.height
        );
    }
    Ok(())
}

fn pixel_dimensions(size: SurfaceSize) -> (u32, u32) {
    (
        size.width.max(0.0).round() as u32,
        size.height.max(0.0).round() as u32,
    )
}
