/// Bundled frame artwork
///
/// The decorative frames ship inside the binary. Each one is decoded the
/// first time it is needed and then shared by preview and export.

use image::{ImageFormat, RgbaImage};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{FrameError, Result};
use crate::state::data::FrameId;

#[derive(RustEmbed)]
#[folder = "assets/frames/"]
struct FrameAssets;

/// Lazily decoded cache of the bundled frames
#[derive(Clone, Default)]
pub struct FrameCatalog {
    cache: Arc<Mutex<HashMap<FrameId, Arc<RgbaImage>>>>,
}

impl FrameCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the decoded pixels for a frame, decoding on first use
    pub fn get(&self, id: FrameId) -> Result<Arc<RgbaImage>> {
        let mut cache = self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(frame) = cache.get(&id) {
            return Ok(Arc::clone(frame));
        }

        let frame = Arc::new(decode_asset(id)?);
        log::info!(
            "🖼️  Loaded frame '{}' ({}x{})",
            id.key(),
            frame.width(),
            frame.height()
        );
        cache.insert(id, Arc::clone(&frame));
        Ok(frame)
    }

    /// Number of frames decoded so far
    pub fn cached(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for FrameCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCatalog")
            .field("cached", &self.cached())
            .finish()
    }
}

fn decode_asset(id: FrameId) -> Result<RgbaImage> {
    let asset = FrameAssets::get(id.asset_name())
        .ok_or_else(|| FrameError::MissingAsset(id.asset_name().to_string()))?;
    let image = image::load_from_memory_with_format(&asset.data, ImageFormat::Png)?;
    Ok(image.to_rgba8())
}

/// Load a frame from a file on disk (command line `--frame-file`)
pub fn load_frame_file(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| FrameError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bundled_frame_decodes() {
        let catalog = FrameCatalog::new();
        for id in FrameId::ALL {
            let frame = catalog.get(id).unwrap();
            assert!(frame.width() > 0 && frame.height() > 0, "{:?} is empty", id);
        }
        assert_eq!(catalog.cached(), FrameId::ALL.len());
    }

    #[test]
    fn test_frames_have_transparent_window() {
        // Photos sit behind the frame, so every frame needs a see-through area
        let catalog = FrameCatalog::new();
        for id in FrameId::ALL {
            let frame = catalog.get(id).unwrap();
            let center = frame.get_pixel(frame.width() / 2, frame.height() / 2);
            assert_eq!(center.0[3], 0, "{:?} is opaque in the middle", id);
        }
    }

    #[test]
    fn test_cache_shares_pixels() {
        let catalog = FrameCatalog::new();
        let a = catalog.get(FrameId::Mahdiyya).unwrap();
        let b = catalog.clone().get(FrameId::Mahdiyya).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_load_frame_file_reports_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = load_frame_file(&path).unwrap_err();
        assert!(matches!(err, FrameError::Decode { .. }));
    }
}
