//! Parameter types for engine requests.
//!
//! These structs describe *what* to ask the engine for, not *how* it is
//! produced. They are the interface between the [`resolve`](super::resolve)
//! module (which decides which variants a page needs) and the
//! [`engine`](super::engine) (which scales, crops and stores the files).
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100). Clamped on construction.
//! - [`AssetKind`]: Whether a request is for a full image or a thumbnail.
//! - [`SizeRequest`]: Size and crop rectangle for a custom-sized image.
//! - [`SizeSpec`] / [`BreakpointSizes`]: Per-breakpoint sizing, as a theme declares it.
//! - [`CustomImageParams`]: Size request, quality and effects of a custom image.
//! - [`ThumbParams`]: Size, crop and quality of a default thumbnail.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Which configured quality pair applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetKind {
    #[default]
    Image,
    Thumb,
}

impl AssetKind {
    pub fn from_thumb_flag(thumb: bool) -> Self {
        if thumb { AssetKind::Thumb } else { AssetKind::Image }
    }

    pub fn is_thumb(self) -> bool {
        self == AssetKind::Thumb
    }
}

/// Size and crop parameters of a custom-sized image.
///
/// All fields are optional; the engine interprets whichever are present.
/// `size` bounds the longer edge, `width`/`height` fix one or both edges, and
/// the `crop_*` fields select the portion of the original to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizeRequest {
    pub size: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop_width: Option<u32>,
    pub crop_height: Option<u32>,
    pub crop_x: Option<u32>,
    pub crop_y: Option<u32>,
}

impl SizeRequest {
    /// Request bounded on the longer edge only.
    pub fn sized(size: u32) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// Request with fixed width and height.
    pub fn dimensions(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Add a crop rectangle.
    pub fn with_crop(mut self, width: u32, height: u32, x: u32, y: u32) -> Self {
        self.crop_width = Some(width);
        self.crop_height = Some(height);
        self.crop_x = Some(x);
        self.crop_y = Some(y);
        self
    }
}

/// How one breakpoint's image is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SizeSpec {
    /// Explicit size/crop parameters.
    Custom(SizeRequest),
    /// Fit uncropped within the bounds.
    MaxSpace { width: u32, height: u32 },
}

/// Sizing for the standard, medium and small breakpoints.
///
/// Always set at least `standard`; missing breakpoints render nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakpointSizes {
    pub standard: Option<SizeSpec>,
    pub medium: Option<SizeSpec>,
    pub small: Option<SizeSpec>,
}

impl BreakpointSizes {
    /// Parse sizes a theme declares inline, e.g.
    /// `{"standard": {"mode": "custom", "width": 800, "height": 600}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Parameters for a custom-sized image request.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomImageParams {
    pub request: SizeRequest,
    /// Treat the image as a thumbnail (the engine may apply thumb watermarks/effects).
    pub thumb: bool,
    /// Engine-specific effects, e.g. `"gray"`.
    pub effects: Option<String>,
    pub quality: Quality,
}

/// Parameters for a default thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbParams {
    pub size: u32,
    pub crop_width: u32,
    pub crop_height: u32,
    pub quality: Quality,
}
