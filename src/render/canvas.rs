use image::{DynamicImage, Rgba, RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::{ImageSize, RectPx},
    error::{MontageError, MontageResult},
};

/// RGBA8 drawing surface. Every draw replaces destination pixels; nothing is blended.
#[derive(Clone, Debug)]
pub struct Canvas {
    buf: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas of `size`.
    pub fn allocate(size: ImageSize) -> MontageResult<Self> {
        if size.is_empty() {
            return Err(MontageError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                size.width, size.height
            )));
        }
        Ok(Self {
            buf: RgbaImage::new(size.width, size.height),
        })
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.buf.width(), self.buf.height())
    }

    /// Resample `src` to exactly `dest` (Catmull-Rom) and copy it in, clipped to the canvas.
    pub fn draw_scaled(&mut self, src: &DynamicImage, dest: RectPx) {
        if dest.w == 0 || dest.h == 0 {
            return;
        }
        let scaled = if src.width() == dest.w && src.height() == dest.h {
            src.to_rgba8()
        } else {
            image::imageops::resize(&src.to_rgba8(), dest.w, dest.h, FilterType::CatmullRom)
        };
        image::imageops::replace(&mut self.buf, &scaled, dest.x, dest.y);
    }

    /// Fill `dest` (clipped) with a solid straight-alpha colour.
    pub fn fill_rect(&mut self, dest: RectPx, rgba: [u8; 4]) {
        let x0 = dest.x.clamp(0, i64::from(self.buf.width())) as u32;
        let y0 = dest.y.clamp(0, i64::from(self.buf.height())) as u32;
        let x1 = dest.right().clamp(0, i64::from(self.buf.width())) as u32;
        let y1 = dest.bottom().clamp(0, i64::from(self.buf.height())) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.buf.put_pixel(x, y, Rgba(rgba));
            }
        }
    }

    pub fn into_image(self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
