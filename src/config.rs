use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{
    enhance::DaySource,
    foundation::{
        core::DayOfYear,
        error::{MontageError, MontageResult},
    },
    render::{
        OutputFormat,
        compositor::{CompositorOpts, PanelFailurePolicy},
    },
    select::rotation::RotationMode,
};

/// Tunables for the playlist collage enhancer, loadable from JSON.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageConfig {
    pub rotation: RotationMode,
    pub on_panel_error: PanelFailurePolicy,
    pub parallel_decode: bool,
    pub output_format: OutputFormat,
    /// Pin the rotation to one day-of-year instead of the local calendar.
    pub fixed_day: Option<u16>,
}

impl CollageConfig {
    pub fn from_path(path: impl AsRef<Path>) -> MontageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MontageError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader(r: impl Read) -> MontageResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MontageError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MontageResult<()> {
        self.day_source().map(|_| ())
    }

    pub fn day_source(&self) -> MontageResult<DaySource> {
        match self.fixed_day {
            Some(d) => Ok(DaySource::Fixed(DayOfYear::new(d)?)),
            None => Ok(DaySource::System),
        }
    }

    pub fn compositor_opts(&self) -> CompositorOpts {
        CompositorOpts {
            on_panel_error: self.on_panel_error,
            parallel_decode: self.parallel_decode,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
