/// Photo placement adjustments
///
/// Scale and offset applied to the photo before it is layered with
/// the frame. Values are stored exactly as the controls deliver them;
/// the controls themselves enforce the ranges below.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{FrameError, Result};

/// Allowed scale factors
pub const SCALE_RANGE: RangeInclusive<f32> = 0.5..=2.0;

/// Slider step for the scale factor
pub const SCALE_STEP: f32 = 0.1;

/// Allowed offsets in pixels, for both axes
pub const OFFSET_RANGE: RangeInclusive<i32> = -100..=100;

/// Placement of the photo relative to the centre of its container
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    /// Scale factor (0.5 to 2.0)
    /// - 1.0 = native photo size
    pub scale: f32,

    /// Horizontal offset in pixels (-100 to +100)
    /// - Negative values move the photo left
    pub offset_x: i32,

    /// Vertical offset in pixels (-100 to +100)
    /// - Negative values move the photo up
    pub offset_y: i32,
}

impl Default for Adjustments {
    /// Centered at native size
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0,
            offset_y: 0,
        }
    }
}

impl Adjustments {
    /// Build adjustments from untrusted input (command line, settings)
    pub fn checked(scale: f32, offset_x: i32, offset_y: i32) -> Result<Self> {
        if !scale.is_finite() || !SCALE_RANGE.contains(&scale) {
            return Err(FrameError::InvalidAdjustment(format!(
                "scale {} outside {}..={}",
                scale,
                SCALE_RANGE.start(),
                SCALE_RANGE.end()
            )));
        }
        for (axis, value) in [("offset-x", offset_x), ("offset-y", offset_y)] {
            if !OFFSET_RANGE.contains(&value) {
                return Err(FrameError::InvalidAdjustment(format!(
                    "{} {} outside {}..={}",
                    axis,
                    value,
                    OFFSET_RANGE.start(),
                    OFFSET_RANGE.end()
                )));
            }
        }
        Ok(Self {
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Snap a scale value onto the slider grid and into range
    pub fn snap_scale(scale: f32) -> f32 {
        let snapped = (scale / SCALE_STEP).round() * SCALE_STEP;
        // Keep one decimal so 0.1 steps compare cleanly
        ((snapped * 10.0).round() / 10.0).clamp(*SCALE_RANGE.start(), *SCALE_RANGE.end())
    }

    /// Clamp an offset into the slider range
    pub fn clamp_offset(offset: i32) -> i32 {
        offset.clamp(*OFFSET_RANGE.start(), *OFFSET_RANGE.end())
    }

    /// Check if this is the untouched placement
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Reset to centered at native size
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
