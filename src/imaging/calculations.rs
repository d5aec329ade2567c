//! Pure calculation functions for high-density requests.
//!
//! All functions here are pure and testable without an engine. A high-density
//! request is the standard request with every numeric parameter doubled; the
//! doubling is exact on integers and overflow is rejected rather than wrapped.

use super::params::{SizeRequest, ThumbParams};
use crate::imaging::resolve::ResolveError;

/// Double one dimension, rejecting overflow.
pub fn double(value: u32, field: &str) -> Result<u32, ResolveError> {
    value
        .checked_mul(2)
        .ok_or_else(|| ResolveError::InvalidRequest(format!("{field} {value} overflows when doubled")))
}

fn double_opt(value: Option<u32>, field: &str) -> Result<Option<u32>, ResolveError> {
    value.map(|v| double(v, field)).transpose()
}

impl SizeRequest {
    /// Check the request can be sent to the engine.
    ///
    /// At least one of `size`, `width`, `height` must be present, and none of
    /// the size or crop-size fields may be zero. Crop offsets may be zero.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.size.is_none() && self.width.is_none() && self.height.is_none() {
            return Err(ResolveError::InvalidRequest(
                "one of size, width or height is required".into(),
            ));
        }
        let sized_fields = [
            ("size", self.size),
            ("width", self.width),
            ("height", self.height),
            ("crop_width", self.crop_width),
            ("crop_height", self.crop_height),
        ];
        for (field, value) in sized_fields {
            if value == Some(0) {
                return Err(ResolveError::InvalidRequest(format!(
                    "{field} must be non-zero"
                )));
            }
        }
        Ok(())
    }

    /// The high-density counterpart: every present field multiplied by 2.
    pub fn doubled(&self) -> Result<SizeRequest, ResolveError> {
        Ok(SizeRequest {
            size: double_opt(self.size, "size")?,
            width: double_opt(self.width, "width")?,
            height: double_opt(self.height, "height")?,
            crop_width: double_opt(self.crop_width, "crop_width")?,
            crop_height: double_opt(self.crop_height, "crop_height")?,
            crop_x: double_opt(self.crop_x, "crop_x")?,
            crop_y: double_opt(self.crop_y, "crop_y")?,
        })
    }
}

/// Double the geometry of a default thumbnail. Quality is left to the caller.
pub fn double_thumb(params: &ThumbParams) -> Result<ThumbParams, ResolveError> {
    Ok(ThumbParams {
        size: double(params.size, "thumb size")?,
        crop_width: double(params.crop_width, "thumb crop_width")?,
        crop_height: double(params.crop_height, "thumb crop_height")?,
        quality: params.quality,
    })
}
