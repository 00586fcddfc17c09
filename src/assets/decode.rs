use std::{fs::File, io::Read, path::Path};

use anyhow::Context;

use crate::foundation::error::{MontageError, MontageResult};

/// Decode encoded image bytes (format sniffed from content).
pub fn decode_image(bytes: &[u8]) -> MontageResult<image::DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img)
}

/// Read a source file fully into memory. The handle is closed before returning.
pub fn read_source(path: &Path) -> MontageResult<Vec<u8>> {
    let mut f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    let mut bytes = Vec::new();
    if let Ok(meta) = f.metadata() {
        bytes.reserve(usize::try_from(meta.len()).unwrap_or(0));
    }
    f.read_to_end(&mut bytes)
        .with_context(|| format!("read '{}'", path.display()))?;
    Ok(bytes)
}

/// Read and decode one source image, reporting any failure as [`MontageError::Source`].
pub fn load_source_image(path: &Path) -> MontageResult<image::DynamicImage> {
    read_source(path)
        .and_then(|bytes| decode_image(&bytes))
        .map_err(|e| match e {
            MontageError::Other(inner) => MontageError::source(path, format!("{inner:#}")),
            other => MontageError::source(path, other),
        })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
