use chrono::{Datelike, NaiveDate};

use crate::foundation::error::{MontageError, MontageResult};

/// Pixel dimensions of an image or canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Integer placement rectangle in canvas pixels.
///
/// `x`/`y` may place the rectangle partly outside the canvas; drawing clips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RectPx {
    pub x: i64,
    pub y: i64,
    pub w: u32,
    pub h: u32,
}

impl RectPx {
    pub const fn new(x: i64, y: i64, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(self) -> i64 {
        self.x + i64::from(self.w)
    }

    pub fn bottom(self) -> i64 {
        self.y + i64::from(self.h)
    }

    pub fn size(self) -> ImageSize {
        ImageSize::new(self.w, self.h)
    }
}

/// Artwork slots a host may ask an enhancer about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Primary,
    Thumb,
    Backdrop,
    Banner,
    Logo,
    Art,
    Disc,
    Box,
    Screenshot,
    Menu,
    Chapter,
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Thumb => "thumb",
            Self::Backdrop => "backdrop",
            Self::Banner => "banner",
            Self::Logo => "logo",
            Self::Art => "art",
            Self::Disc => "disc",
            Self::Box => "box",
            Self::Screenshot => "screenshot",
            Self::Menu => "menu",
            Self::Chapter => "chapter",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite shape rendered for a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollageStyle {
    /// Wide 16:9 strip of overlapping panels.
    Thumb,
    /// Square poster grid.
    Square,
}

impl CollageStyle {
    /// Map a requested artwork slot to the collage shape drawn for it.
    pub fn for_kind(kind: ImageKind) -> MontageResult<Self> {
        match kind {
            ImageKind::Thumb => Ok(Self::Thumb),
            ImageKind::Primary => Ok(Self::Square),
            other => Err(MontageError::unsupported(format!(
                "no collage style for image kind '{other}'"
            ))),
        }
    }
}

/// Calendar day-of-year in `1..=366`; the unit the daily rotation is keyed on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DayOfYear(u16);

impl DayOfYear {
    pub fn new(day: u16) -> MontageResult<Self> {
        if !(1..=366).contains(&day) {
            return Err(MontageError::validation(format!(
                "day of year must be in 1..=366, got {day}"
            )));
        }
        Ok(Self(day))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        // ordinal() is always 1..=366
        Self(date.ordinal() as u16)
    }

    pub fn today() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
