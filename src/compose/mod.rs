/// Photo + frame compositing
///
/// This module layers the user's photo with a decorative frame:
/// - `layout.rs` - placement and clip rectangle math
/// - `export.rs` - PNG encoding and suggested file names
///
/// `compose` is the single rendering path. The live preview and the
/// exported file both come out of it, so they always agree.

pub mod export;
pub mod layout;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::state::edit::Adjustments;
use layout::Placement;

/// Resampling filter used when the photo is scaled
const PHOTO_FILTER: FilterType = FilterType::Triangle;

/// How the photo and the frame are stacked
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Layering {
    /// Photo centered on the whole canvas, frame drawn on top of it
    #[default]
    Underlay,
    /// Frame drawn first, photo drawn over it clipped to the content area
    ClippedOverlay,
}

/// Layer `photo` and `frame` into a new image the size of the frame
///
/// With no photo the result is an exact copy of the frame.
pub fn compose(
    photo: Option<&RgbaImage>,
    frame: &RgbaImage,
    adj: &Adjustments,
    layering: Layering,
) -> RgbaImage {
    let Some(photo) = photo else {
        return frame.clone();
    };

    match layering {
        Layering::Underlay => underlay(photo, frame, adj),
        Layering::ClippedOverlay => clipped_overlay(photo, frame, adj),
    }
}

fn underlay(photo: &RgbaImage, frame: &RgbaImage, adj: &Adjustments) -> RgbaImage {
    let (width, height) = frame.dimensions();
    let placement = layout::place(photo.dimensions(), (width, height), adj);

    // Start from a fully transparent canvas
    let mut canvas = RgbaImage::new(width, height);
    draw_photo(&mut canvas, photo, &placement);
    imageops::overlay(&mut canvas, frame, 0, 0);
    canvas
}

fn clipped_overlay(photo: &RgbaImage, frame: &RgbaImage, adj: &Adjustments) -> RgbaImage {
    let (width, height) = frame.dimensions();
    let clip = layout::content_rect(width, height);
    let placement = layout::place(photo.dimensions(), (clip.width, clip.height), adj);

    let mut canvas = frame.clone();

    // Draw into a copy of the clip region so nothing leaks outside it
    let mut region = imageops::crop_imm(&canvas, clip.x, clip.y, clip.width, clip.height).to_image();
    draw_photo(&mut region, photo, &placement);
    imageops::replace(&mut canvas, &region, i64::from(clip.x), i64::from(clip.y));
    canvas
}

/// Draw the photo scaled to `placement` over `canvas`.
///
/// Only the part of the photo that lands on the canvas is resampled, so
/// the cost follows the canvas size rather than the photo size.
fn draw_photo(canvas: &mut RgbaImage, photo: &RgbaImage, placement: &Placement) {
    if photo.dimensions() == (placement.width, placement.height) {
        imageops::overlay(canvas, photo, placement.x, placement.y);
        return;
    }

    let Some(window) = layout::source_window(placement, photo.dimensions(), canvas.dimensions()) else {
        return;
    };
    let src = window.src;
    let crop = imageops::crop_imm(photo, src.x, src.y, src.width, src.height).to_image();
    let scaled = imageops::resize(&crop, window.width, window.height, PHOTO_FILTER);
    imageops::overlay(canvas, &scaled, window.x, window.y);
}
