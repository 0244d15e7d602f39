/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the loaders, the session and the compositor.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::FrameError;

/// A decoded photo chosen by the user
#[derive(Debug, Clone)]
pub struct Photo {
    /// Filename only (e.g., "IMG_0001.jpg")
    pub name: String,
    /// Decoded pixels, shared between preview and export
    pub pixels: Arc<RgbaImage>,
}

impl Photo {
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            name: name.into(),
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

impl PartialEq for Photo {
    /// Two photos are the same upload when they share pixel storage
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// Identifier of one of the bundled decorative frames
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrameId {
    /// The Mahdiyya Meet frame
    #[default]
    Mahdiyya,
    /// Round window with a petal border
    Blossom,
    /// Gold and walnut picture frame
    Classic,
}

impl FrameId {
    /// Every bundled frame, in display order
    pub const ALL: [FrameId; 3] = [FrameId::Mahdiyya, FrameId::Blossom, FrameId::Classic];

    /// Stable key used on the command line and in settings
    pub fn key(self) -> &'static str {
        match self {
            FrameId::Mahdiyya => "mahdiyya",
            FrameId::Blossom => "blossom",
            FrameId::Classic => "classic",
        }
    }

    /// File name of the bundled asset
    pub fn asset_name(self) -> &'static str {
        match self {
            FrameId::Mahdiyya => "mahdiyya.png",
            FrameId::Blossom => "blossom.png",
            FrameId::Classic => "classic.png",
        }
    }

    /// Human readable label for pickers
    pub fn label(self) -> &'static str {
        match self {
            FrameId::Mahdiyya => "Mahdiyya Meet",
            FrameId::Blossom => "Blossom",
            FrameId::Classic => "Classic",
        }
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FrameId {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FrameId::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .ok_or_else(|| FrameError::UnknownFrame(s.to_string()))
    }
}
