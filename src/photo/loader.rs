/// Photo loader
///
/// Decodes the user's photo into RGBA pixels. Decoding is CPU heavy for
/// large camera JPEGs, so the async entry point runs it on a blocking
/// worker and the UI thread only receives the finished bitmap.

use image::{DynamicImage, ImageDecoder, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{FrameError, Result};
use crate::state::data::Photo;

/// File extensions offered by the photo picker
pub const PHOTO_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "bmp", "gif", "webp", "tif", "tiff"];

/// Load and decode a photo from disk
///
/// # Returns
/// * `Ok(Photo)` - Decoded RGBA pixels and the file name
/// * `Err(FrameError::Decode)` - The file is missing or not an image
pub async fn load_photo(path: PathBuf) -> Result<Photo> {
    // Spawn blocking because image decoding is CPU-intensive
    task::spawn_blocking(move || load_photo_blocking(&path)).await?
}

/// Blocking implementation of photo loading
///
/// The EXIF orientation tag is applied, so portrait phone shots come out
/// upright with their width and height swapped accordingly.
pub fn load_photo_blocking(path: &Path) -> Result<Photo> {
    let decode_error = |message: String| FrameError::Decode {
        path: path.to_path_buf(),
        message,
    };

    if !path.exists() {
        return Err(decode_error("file not found".to_string()));
    }

    let bytes = std::fs::read(path)?;
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| decode_error(e.to_string()))?;
    let orientation = decoder.orientation().map_err(|e| decode_error(e.to_string()))?;
    let mut image = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(e.to_string()))?;
    image.apply_orientation(orientation);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    log::info!("📷 Loaded photo {}: {}x{}", name, image.width(), image.height());

    Ok(Photo::new(name, image.to_rgba8()))
}

/// Check if a path looks like a supported photo by extension
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| PHOTO_EXTENSIONS.contains(&ext.as_str()))
}
