//! 2D drawing surfaces.
//!
//! The effect only ever paints circles, so the [`Canvas`] trait is small.
//! Two implementations ship with the crate:
//!
//! - [`DrawList`] records commands. The windowed renderer uploads it as
//!   instance data, and tests use it to count paint operations.
//! - [`RasterCanvas`] rasterizes on the CPU into an [`image::RgbaImage`] for
//!   headless snapshots.

use crate::visuals::Color;
use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// A raster surface the effect paints onto.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> Vec2;

    /// Change the surface size. Content may be discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Paint a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Paint a circle outline of the given stroke width, centered on `radius`.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
}

/// A single recorded paint operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Stroke {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
}

/// Canvas that records what was painted since the last clear.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    clears: u64,
    paints: u64,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Commands recorded since the last [`Canvas::clear`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Total clears over the lifetime of this list.
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    /// Total fill and stroke operations over the lifetime of this list.
    pub fn paint_count(&self) -> u64 {
        self.paints
    }
}

impl Canvas for DrawList {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Fill {
            center,
            radius,
            color,
        });
        self.paints += 1;
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            center,
            radius,
            width,
            color,
        });
        self.paints += 1;
    }
}

/// CPU rasterizer with source-over alpha blending.
pub struct RasterCanvas {
    image: RgbaImage,
    background: Color,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut canvas = Self {
            image: RgbaImage::new(width, height),
            background,
        };
        canvas.clear();
        canvas
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write the current contents as a PNG.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.image.save(path)
    }

    /// Blend `color` into every pixel whose center passes `inside`.
    fn paint_where(&mut self, center: Vec2, extent: f32, color: Color, inside: impl Fn(f32) -> bool) {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 || color.a <= 0.0 {
            return;
        }

        let x0 = (center.x - extent).floor().max(0.0) as u32;
        let y0 = (center.y - extent).floor().max(0.0) as u32;
        let x1 = (center.x + extent).ceil().min(w as f32 - 1.0);
        let y1 = (center.y + extent).ceil().min(h as f32 - 1.0);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }

        for y in y0..=y1 as u32 {
            for x in x0..=x1 as u32 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                if inside(d) {
                    let px = self.image.get_pixel_mut(x, y);
                    *px = blend(*px, color);
                }
            }
        }
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> Vec2 {
        let (w, h) = self.image.dimensions();
        Vec2::new(w as f32, h as f32)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
        self.clear();
    }

    fn clear(&mut self) {
        let bg = Rgba(self.background.to_rgba8());
        for px in self.image.pixels_mut() {
            *px = bg;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.paint_where(center, radius, color, |d| d <= radius);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        let half = width * 0.5;
        self.paint_where(center, radius + half, color, |d| (d - radius).abs() <= half);
    }
}

fn blend(dst: Rgba<u8>, src: Color) -> Rgba<u8> {
    let a = src.a.clamp(0.0, 1.0);
    let [sr, sg, sb, _] = src.to_rgba8();
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    let out_a = (a * 255.0 + dst[3] as f32 * (1.0 - a)).round() as u8;
    Rgba([mix(sr, dst[0]), mix(sg, dst[1]), mix(sb, dst[2]), out_a])
}
