//! Image engine trait and shared types.
//!
//! The [`ImageEngine`] trait is the contract with the gallery platform that
//! owns scaling, cropping, compression and the image cache. This crate never
//! touches pixels; it only asks the engine for URLs and dimensions.
//!
//! Every generating call receives its [`Quality`](super::Quality) explicitly.
//! Nothing in the request path reads or writes a shared quality setting, so
//! standard and high-density requests can't leak settings into each other.

use super::params::{CustomImageParams, Quality, SizeRequest, ThumbParams};
use crate::types::ImageRef;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Width and height reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for the external image engine.
///
/// Size queries must be idempotent for identical parameters: the resolver
/// asks for the URL and the dimensions of the same request separately.
pub trait ImageEngine: Sync {
    /// URL of the image scaled to `size` on its longer edge.
    fn sized_image(
        &self,
        image: &ImageRef,
        size: u32,
        quality: Quality,
    ) -> Result<String, EngineError>;

    /// Dimensions of [`sized_image`](Self::sized_image) for the same `size`.
    fn default_size(&self, image: &ImageRef, size: u32) -> Result<Dimensions, EngineError>;

    /// URL of the default thumbnail with the given geometry.
    fn thumb(&self, image: &ImageRef, params: &ThumbParams) -> Result<String, EngineError>;

    /// Dimensions of [`thumb`](Self::thumb) for the same geometry.
    fn thumb_size(&self, image: &ImageRef, params: &ThumbParams)
    -> Result<Dimensions, EngineError>;

    /// URL of a custom-sized (optionally cropped) image.
    fn custom_image(
        &self,
        image: &ImageRef,
        params: &CustomImageParams,
    ) -> Result<String, EngineError>;

    /// Dimensions of [`custom_image`](Self::custom_image) for the same request.
    fn custom_size(
        &self,
        image: &ImageRef,
        request: &SizeRequest,
    ) -> Result<Dimensions, EngineError>;

    /// Largest size with the image's aspect ratio that fits within `width` × `height`.
    fn max_space_container(
        &self,
        image: &ImageRef,
        width: u32,
        height: u32,
    ) -> Result<Dimensions, EngineError>;
}
