/// Placement math shared by preview and export
///
/// All coordinates are in canvas pixels with the origin at the top-left
/// corner of the frame. Fractional results are rounded to the nearest
/// whole pixel only at the very end.

use crate::state::edit::Adjustments;

/// Content area used by the clipped layering, as fractions of the canvas
const CONTENT_X: f64 = 0.05;
const CONTENT_Y: f64 = 0.20;
const CONTENT_WIDTH: f64 = 0.90;
const CONTENT_HEIGHT: f64 = 0.50;

/// Where and how large the photo is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left edge, may be negative or past the container
    pub x: i64,
    /// Top edge, may be negative or past the container
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned pixel rectangle inside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Photo size after applying the scale factor, never smaller than 1x1
pub fn scaled_size(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let scale = f64::from(scale);
    let w = (f64::from(width) * scale).round().max(1.0) as u32;
    let h = (f64::from(height) * scale).round().max(1.0) as u32;
    (w, h)
}

/// Center the scaled photo inside a container and apply the offsets
///
/// The returned position is relative to the container's top-left corner.
pub fn place(photo: (u32, u32), container: (u32, u32), adj: &Adjustments) -> Placement {
    let (width, height) = scaled_size(photo.0, photo.1, adj.scale);

    let x = f64::from(container.0) / 2.0 - f64::from(width) / 2.0 + f64::from(adj.offset_x);
    let y = f64::from(container.1) / 2.0 - f64::from(height) / 2.0 + f64::from(adj.offset_y);

    Placement {
        x: x.round() as i64,
        y: y.round() as i64,
        width,
        height,
    }
}

/// The clip rectangle for a canvas of the given size
pub fn content_rect(canvas_width: u32, canvas_height: u32) -> ContentRect {
    let w = f64::from(canvas_width);
    let h = f64::from(canvas_height);

    let left = (w * CONTENT_X).round() as u32;
    let top = (h * CONTENT_Y).round() as u32;
    let right = (w * (CONTENT_X + CONTENT_WIDTH)).round() as u32;
    let bottom = (h * (CONTENT_Y + CONTENT_HEIGHT)).round() as u32;

    ContentRect {
        x: left,
        y: top,
        width: right.saturating_sub(left).max(1).min(canvas_width.max(1)),
        height: bottom.saturating_sub(top).max(1).min(canvas_height.max(1)),
    }
}

/// The part of the photo that ends up inside the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    /// Region of the unscaled photo to resample
    pub src: ContentRect,
    /// Where the resampled region is drawn, relative to the container
    pub x: i64,
    pub y: i64,
    /// Size of the resampled region
    pub width: u32,
    pub height: u32,
}

/// Crop window for drawing `placement` into a container of `container` size.
///
/// Only the visible part of the scaled photo, plus a few pixels of filter
/// support, is taken from the source. `None` when the photo is entirely
/// outside the container.
pub fn source_window(placement: &Placement, photo: (u32, u32), container: (u32, u32)) -> Option<SourceWindow> {
    let (sx, sw, x, width) = window_axis(placement.x, placement.width, photo.0, container.0)?;
    let (sy, sh, y, height) = window_axis(placement.y, placement.height, photo.1, container.1)?;
    Some(SourceWindow {
        src: ContentRect {
            x: sx,
            y: sy,
            width: sw,
            height: sh,
        },
        x,
        y,
        width,
        height,
    })
}

/// One axis of `source_window`: (source start, source length, draw position, draw length)
fn window_axis(pos: i64, scaled: u32, source: u32, container: u32) -> Option<(u32, u32, i64, u32)> {
    let start = pos.max(0);
    let end = (pos + i64::from(scaled)).min(i64::from(container));
    if start >= end || source == 0 {
        return None;
    }

    // Visible span in scaled-photo coordinates, mapped back to the source
    let ratio = f64::from(source) / f64::from(scaled);
    let pad = ratio.ceil() + 1.0;
    let s0 = (((start - pos) as f64 * ratio).floor() - pad).max(0.0);
    let s1 = (((end - pos) as f64 * ratio).ceil() + pad).min(f64::from(source));

    let offset = (s0 / ratio).round() as i64;
    let length = ((s1 - s0) / ratio).round().max(1.0) as u32;
    Some((s0 as u32, (s1 - s0) as u32, pos + offset, length))
}
