//! Drawing surface, composition, and the rendered result type.

use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::{
        core::{CollageStyle, ImageSize},
        error::MontageResult,
    },
    select::candidates::ImageCandidate,
};

pub(crate) mod canvas;
pub(crate) mod compositor;

/// What to render: a collage style and the already rotated candidate list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub style: CollageStyle,
    pub candidates: Vec<ImageCandidate>,
}

/// Encoded output formats supported by [`CompositeImage::encode`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Png,
    /// Alpha is dropped.
    Jpeg,
}

/// A finished collage. Never mutated after it is returned; the caller owns it.
#[derive(Clone, Debug)]
pub struct CompositeImage {
    image: image::DynamicImage,
}

impl CompositeImage {
    pub(crate) fn new(image: image::DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width(), self.height())
    }

    pub fn image(&self) -> &image::DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> image::DynamicImage {
        self.image
    }

    /// Encode into an in-memory buffer.
    pub fn encode(&self, format: OutputFormat) -> MontageResult<Vec<u8>> {
        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);
        match format {
            OutputFormat::Png => self
                .image
                .write_to(&mut cursor, image::ImageFormat::Png)
                .context("encode collage as png")?,
            OutputFormat::Jpeg => image::DynamicImage::ImageRgb8(self.image.to_rgb8())
                .write_to(&mut cursor, image::ImageFormat::Jpeg)
                .context("encode collage as jpeg")?,
        }
        Ok(buf)
    }
}
