//! Standard and high-density variant resolution.
//!
//! These functions combine the pure doubling calculations with engine calls.
//! Each one asks the engine for the standard-density variant first and then,
//! when requested, for the doubled high-density variant at the configured
//! high-density quality. The two requests are sequential; engine errors
//! propagate unchanged.

use super::calculations::{double, double_thumb};
use super::engine::{Dimensions, EngineError, ImageEngine};
use super::params::{
    AssetKind, BreakpointSizes, CustomImageParams, Quality, SizeRequest, SizeSpec, ThumbParams,
};
use crate::config::RenderConfig;
use crate::types::{Breakpoint, BreakpointSet, DensityPair, ImageRef, ImageVariant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result type for variant resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// A standard-density variant and its optional high-density counterpart.
pub type Resolved = (ImageVariant, Option<ImageVariant>);

/// Variants are rendered with their width and height, so an empty size from
/// the engine is rejected before its URL is requested.
fn non_empty(image: &ImageRef, dims: Dimensions) -> Result<Dimensions> {
    if dims.width == 0 || dims.height == 0 {
        return Err(ResolveError::InvalidRequest(format!(
            "engine reported {}x{} for {}",
            dims.width, dims.height, image.filename
        )));
    }
    Ok(dims)
}

/// Resolves image variants through an engine, using qualities and default
/// geometry from a [`RenderConfig`].
pub struct VariantResolver<'a, E: ImageEngine + ?Sized> {
    engine: &'a E,
    config: &'a RenderConfig,
}

impl<'a, E: ImageEngine + ?Sized> VariantResolver<'a, E> {
    pub fn new(engine: &'a E, config: &'a RenderConfig) -> Self {
        Self { engine, config }
    }

    /// Custom-sized image, optionally with its high-density counterpart.
    ///
    /// The request is validated before any engine call. The high-density
    /// request doubles every present field and uses the high-density quality
    /// for `asset`.
    pub fn resolve_variant(
        &self,
        image: &ImageRef,
        request: &SizeRequest,
        want_hd: bool,
        asset: AssetKind,
        effects: Option<&str>,
    ) -> Result<Resolved> {
        request.validate()?;

        let sd = self.custom_variant(image, request, asset, self.config.quality(asset), effects)?;
        if !want_hd {
            return Ok((sd, None));
        }

        let doubled = request.doubled()?;
        let quality = self.config.hd_quality(asset);
        tracing::debug!(
            image = %image.filename,
            quality = quality.value(),
            "requesting high-density custom image"
        );
        let hd = self.custom_variant(image, &doubled, asset, quality, effects)?;
        Ok((sd, Some(hd)))
    }

    fn custom_variant(
        &self,
        image: &ImageRef,
        request: &SizeRequest,
        asset: AssetKind,
        quality: Quality,
        effects: Option<&str>,
    ) -> Result<ImageVariant> {
        let dims = non_empty(image, self.engine.custom_size(image, request)?)?;
        let url = self.engine.custom_image(
            image,
            &CustomImageParams {
                request: *request,
                thumb: asset.is_thumb(),
                effects: effects.map(str::to_string),
                quality,
            },
        )?;
        Ok(ImageVariant::new(url, dims.width, dims.height))
    }

    /// Image fitted uncropped within `width` × `height`.
    ///
    /// The high-density pass doubles the fitted width and height and fits
    /// again, so rounding in the first fit can't skew the aspect ratio.
    pub fn resolve_max_space(
        &self,
        image: &ImageRef,
        width: u32,
        height: u32,
        want_hd: bool,
        asset: AssetKind,
        effects: Option<&str>,
    ) -> Result<Resolved> {
        if width == 0 || height == 0 {
            return Err(ResolveError::InvalidRequest(
                "max-space bounds must be non-zero".into(),
            ));
        }

        let fitted = non_empty(image, self.engine.max_space_container(image, width, height)?)?;
        let sd = self.fitted_variant(
            image,
            fitted.width,
            fitted.height,
            asset,
            self.config.quality(asset),
            effects,
        )?;
        if !want_hd {
            return Ok((sd, None));
        }

        let fitted_hd = non_empty(
            image,
            self.engine.max_space_container(
                image,
                double(fitted.width, "width")?,
                double(fitted.height, "height")?,
            )?,
        )?;
        let quality = self.config.hd_quality(asset);
        tracing::debug!(
            image = %image.filename,
            quality = quality.value(),
            "requesting high-density max-space image"
        );
        let hd = self.fitted_variant(
            image,
            fitted_hd.width,
            fitted_hd.height,
            asset,
            quality,
            effects,
        )?;
        Ok((sd, Some(hd)))
    }

    fn fitted_variant(
        &self,
        image: &ImageRef,
        width: u32,
        height: u32,
        asset: AssetKind,
        quality: Quality,
        effects: Option<&str>,
    ) -> Result<ImageVariant> {
        let url = self.engine.custom_image(
            image,
            &CustomImageParams {
                request: SizeRequest::dimensions(width, height),
                thumb: asset.is_thumb(),
                effects: effects.map(str::to_string),
                quality,
            },
        )?;
        Ok(ImageVariant::new(url, width, height))
    }

    /// Default sized image (`images.size`), HD at twice the size.
    pub fn resolve_default_sized(&self, image: &ImageRef, want_hd: bool) -> Result<Resolved> {
        let size = self.config.images.size;
        let sd = self.sized_variant(image, size, self.config.quality(AssetKind::Image))?;
        if !want_hd {
            return Ok((sd, None));
        }

        let hd = self.sized_variant(
            image,
            double(size, "size")?,
            self.config.hd_quality(AssetKind::Image),
        )?;
        Ok((sd, Some(hd)))
    }

    fn sized_variant(
        &self,
        image: &ImageRef,
        size: u32,
        quality: Quality,
    ) -> Result<ImageVariant> {
        let dims = non_empty(image, self.engine.default_size(image, size)?)?;
        let url = self.engine.sized_image(image, size, quality)?;
        Ok(ImageVariant::new(url, dims.width, dims.height))
    }

    /// Default thumbnail; HD doubles size and crop at the thumb HD quality.
    pub fn resolve_thumb(&self, image: &ImageRef, want_hd: bool) -> Result<Resolved> {
        let params = self.config.thumb_params();
        let sd = self.thumb_variant(image, &params)?;
        if !want_hd {
            return Ok((sd, None));
        }

        let mut hd_params = double_thumb(&params)?;
        hd_params.quality = self.config.hd_quality(AssetKind::Thumb);
        let hd = self.thumb_variant(image, &hd_params)?;
        Ok((sd, Some(hd)))
    }

    fn thumb_variant(
        &self,
        image: &ImageRef,
        params: &ThumbParams,
    ) -> Result<ImageVariant> {
        let dims = non_empty(image, self.engine.thumb_size(image, params)?)?;
        let url = self.engine.thumb(image, params)?;
        Ok(ImageVariant::new(url, dims.width, dims.height))
    }

    /// Resolve every configured breakpoint. Breakpoints without sizing stay empty.
    pub fn resolve_breakpoints(
        &self,
        image: &ImageRef,
        sizes: &BreakpointSizes,
        want_hd: bool,
        asset: AssetKind,
        effects: Option<&str>,
    ) -> Result<BreakpointSet> {
        let mut set = BreakpointSet::default();
        let specs = [
            (Breakpoint::Standard, sizes.standard),
            (Breakpoint::Medium, sizes.medium),
            (Breakpoint::Small, sizes.small),
        ];
        for (breakpoint, spec) in specs {
            let Some(spec) = spec else { continue };
            let resolved = match spec {
                SizeSpec::Custom(request) => {
                    self.resolve_variant(image, &request, want_hd, asset, effects)?
                }
                SizeSpec::MaxSpace { width, height } => {
                    self.resolve_max_space(image, width, height, want_hd, asset, effects)?
                }
            };
            *set.get_mut(breakpoint) = DensityPair::from(resolved);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::engine::tests::{EngineCall, MockEngine};

    fn image() -> ImageRef {
        ImageRef::new("travel", "tokyo.jpg")
    }

    #[test]
    fn resolve_variant_without_hd_makes_one_request() {
        let engine = MockEngine::new();
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);

        let (sd, hd) = resolver
            .resolve_variant(&image(), &SizeRequest::dimensions(300, 200), false, AssetKind::Image, None)
            .unwrap();

        assert_eq!(sd, ImageVariant::new("travel/tokyo_w300_h200.jpg", 300, 200));
        assert!(hd.is_none());
        assert_eq!(engine.qualities(), vec![85]);
    }

    #[test]
    fn resolve_variant_hd_doubles_every_field() {
        let engine = MockEngine::new();
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);
        let request = SizeRequest {
            size: Some(400),
            ..SizeRequest::dimensions(300, 200).with_crop(150, 100, 10, 20)
        };

        resolver
            .resolve_variant(&image(), &request, true, AssetKind::Image, None)
            .unwrap();

        let custom_requests: Vec<SizeRequest> = engine
            .get_calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::CustomImage { request, .. } => Some(request),
                _ => None,
            })
            .collect();
        assert_eq!(custom_requests.len(), 2);
        assert_eq!(custom_requests[0], request);
        assert_eq!(
            custom_requests[1],
            SizeRequest {
                size: Some(800),
                width: Some(600),
                height: Some(400),
                crop_width: Some(300),
                crop_height: Some(200),
                crop_x: Some(20),
                crop_y: Some(40),
            }
        );
    }

    #[test]
    fn resolve_variant_hd_uses_quality_for_asset_kind() {
        let engine = MockEngine::new();
        let mut config = RenderConfig::default();
        config.images.hd_quality = 40;
        config.thumbs.hd_quality = 30;
        let resolver = VariantResolver::new(&engine, &config);
        let request = SizeRequest::sized(200);

        resolver
            .resolve_variant(&image(), &request, true, AssetKind::Image, None)
            .unwrap();
        resolver
            .resolve_variant(&image(), &request, true, AssetKind::Thumb, None)
            .unwrap();

        assert_eq!(engine.qualities(), vec![85, 40, 75, 30]);
    }

    #[test]
    fn resolve_variant_rejects_missing_dimension_before_engine_call() {
        let engine = MockEngine::new();
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);
        let request = SizeRequest {
            crop_width: Some(100),
            ..SizeRequest::default()
        };

        let result = resolver.resolve_variant(&image(), &request, true, AssetKind::Image, None);
        assert!(matches!(result, Err(ResolveError::InvalidRequest(_))));
        assert!(engine.get_calls().is_empty());
    }

    #[test]
    fn engine_failure_propagates_and_leaves_no_quality_behind() {
        let engine = MockEngine::failing_at_quality(35);
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);
        let request = SizeRequest::sized(300);

        let result = resolver.resolve_variant(&image(), &request, true, AssetKind::Image, None);
        assert!(matches!(result, Err(ResolveError::Engine(_))));

        // The next standard request is made at the configured quality again.
        resolver
            .resolve_variant(&image(), &request, false, AssetKind::Image, None)
            .unwrap();
        assert_eq!(engine.qualities(), vec![85, 35, 85]);
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn resolve_variant_passes_effects_and_thumb_flag() {
        let engine = MockEngine::new();
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);

        let (sd, _) = resolver
            .resolve_variant(&image(), &SizeRequest::sized(100), false, AssetKind::Thumb, Some("gray"))
            .unwrap();

        assert!(sd.url.ends_with("_thumb.jpg"));
        assert!(matches!(
            &engine.get_calls()[1],
            EngineCall::CustomImage { thumb: true, quality: 75, .. }
        ));
    }

    #[test]
    fn resolve_max_space_fits_then_doubles_fitted_bounds() {
        let engine = MockEngine::new();
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);

        // 1600x1200 original in a 400x400 box → 400x300
        let (sd, hd) = resolver
            .resolve_max_space(&image(), 400, 400, true, AssetKind::Image, None)
            .unwrap();

        assert_eq!((sd.width, sd.height), (400, 300));
        let hd = hd.unwrap();
        assert_eq!((hd.width, hd.height), (800, 600));

        let calls = engine.get_calls();
        assert!(calls.contains(&EngineCall::MaxSpace { width: 400, height: 400 }));
        assert!(calls.contains(&EngineCall::MaxSpace { width: 800, height: 600 }));
    }

    #[test]
    fn resolve_max_space_thumb_uses_thumb_hd_quality() {
        let engine = MockEngine::new();
        let mut config = RenderConfig::default();
        config.thumbs.hd_quality = 20;
        let resolver = VariantResolver::new(&engine, &config);

        resolver
            .resolve_max_space(&image(), 200, 200, true, AssetKind::Thumb, None)
            .unwrap();

        assert_eq!(engine.qualities(), vec![75, 20]);
    }

    #[test]
    fn resolve_max_space_rejects_zero_bounds() {
        let engine = MockEngine::new();
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);

        let result = resolver.resolve_max_space(&image(), 0, 300, false, AssetKind::Image, None);
        assert!(matches!(result, Err(ResolveError::InvalidRequest(_))));
    }

    #[test]
    fn resolve_default_sized_doubles_configured_size() {
        let engine = MockEngine::new();
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);

        let (sd, hd) = resolver.resolve_default_sized(&image(), true).unwrap();

        assert_eq!(sd.url, "travel/tokyo_595.jpg");
        assert_eq!(hd.unwrap().url, "travel/tokyo_1190.jpg");
        assert_eq!(engine.qualities(), vec![85, 35]);
    }

    #[test]
    fn resolve_thumb_doubles_size_and_crop() {
        let engine = MockEngine::new();
        let mut config = RenderConfig::default();
        config.thumbs.crop_width = 120;
        config.thumbs.crop_height = 80;
        let resolver = VariantResolver::new(&engine, &config);

        let (sd, hd) = resolver.resolve_thumb(&image(), true).unwrap();
        let hd = hd.unwrap();

        assert_eq!((sd.width, sd.height), (120, 80));
        assert_eq!((hd.width, hd.height), (240, 160));
        assert_eq!(hd.url, "travel/tokyo_200_cw240_ch160_thumb.jpg");
        assert_eq!(engine.qualities(), vec![75, 35]);
    }

    #[test]
    fn resolve_breakpoints_fills_only_configured_tiers() {
        let engine = MockEngine::new();
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);
        let sizes = BreakpointSizes {
            standard: Some(SizeSpec::Custom(SizeRequest::dimensions(800, 600))),
            medium: None,
            small: Some(SizeSpec::MaxSpace {
                width: 320,
                height: 320,
            }),
        };

        let set = resolver
            .resolve_breakpoints(&image(), &sizes, true, AssetKind::Image, None)
            .unwrap();

        assert_eq!(set.standard.sd.as_ref().unwrap().width, 800);
        assert_eq!(set.standard.hd.as_ref().unwrap().width, 1600);
        assert!(set.medium.is_empty());
        assert_eq!(set.small.sd.as_ref().unwrap().width, 320);
        assert_eq!(set.small.hd.as_ref().unwrap().height, 480);
    }

    #[test]
    fn zero_dimensions_from_engine_are_rejected_before_url_request() {
        let engine = MockEngine::reporting(Dimensions { width: 0, height: 300 });
        let config = RenderConfig::default();
        let resolver = VariantResolver::new(&engine, &config);

        let result = resolver.resolve_default_sized(&image(), true);
        assert!(matches!(result, Err(ResolveError::InvalidRequest(_))));
        assert_eq!(engine.get_calls(), vec![EngineCall::DefaultSize { size: 595 }]);

        for result in [
            resolver.resolve_thumb(&image(), false),
            resolver.resolve_variant(&image(), &SizeRequest::sized(100), false, AssetKind::Image, None),
            resolver.resolve_max_space(&image(), 400, 400, false, AssetKind::Image, None),
        ] {
            assert!(matches!(result, Err(ResolveError::InvalidRequest(_))));
        }
        assert!(engine.qualities().is_empty());
    }
}
