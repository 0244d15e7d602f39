/// Export of the composited image
///
/// An `ExportJob` is a snapshot of everything the compositor needs,
/// taken from the session at the moment the user asks for a file.
/// Rendering and encoding happen later, usually on a worker thread.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::path::{Path, PathBuf};

use super::{compose, Layering};
use crate::error::Result;
use crate::frames::FrameCatalog;
use crate::state::data::{FrameId, Photo};
use crate::state::edit::Adjustments;

/// File name used when a photo was placed in the frame
pub const FRAMED_FILE_NAME: &str = "mahdiyya-meet-framed.png";

/// File name used when only the frame is exported
pub const FRAME_ONLY_FILE_NAME: &str = "mahdiyya-meet-frame.png";

/// Suggested download name for an export
pub fn suggested_file_name(has_photo: bool) -> &'static str {
    if has_photo {
        FRAMED_FILE_NAME
    } else {
        FRAME_ONLY_FILE_NAME
    }
}

/// Everything needed to render one export
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub photo: Option<Photo>,
    pub frame: FrameId,
    pub adjustments: Adjustments,
    pub layering: Layering,
}

impl ExportJob {
    pub fn file_name(&self) -> &'static str {
        suggested_file_name(self.photo.is_some())
    }

    /// Composite the snapshot into a new image
    pub fn render(&self, catalog: &FrameCatalog) -> Result<RgbaImage> {
        let frame = catalog.get(self.frame)?;
        let photo = self.photo.as_ref().map(|p| p.pixels.as_ref());
        Ok(compose(photo, &frame, &self.adjustments, self.layering))
    }

    /// Render, encode and write the PNG to `path`
    pub fn write_to(&self, catalog: &FrameCatalog, path: &Path) -> Result<PathBuf> {
        let image = self.render(catalog)?;
        write_png(&image, path)?;
        log::info!(
            "💾 Exported {}x{} {} to {}",
            image.width(),
            image.height(),
            if self.photo.is_some() { "framed photo" } else { "frame" },
            path.display()
        );
        Ok(path.to_path_buf())
    }
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Encode an image as PNG and write it to disk
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let bytes = encode_png(image)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Save a job on a blocking worker thread
pub async fn export_async(job: ExportJob, catalog: FrameCatalog, path: PathBuf) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || job.write_to(&catalog, &path)).await?
}
