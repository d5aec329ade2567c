//! Template-level helpers.
//!
//! A [`ThemeContext`] bundles the engine, the render config and the output
//! hooks a page template needs. Each helper resolves the variants it needs,
//! applies the album gate where relevant, and returns the final markup string.
//!
//! | Helper | Sizing | Output kind |
//! |---|---|---|
//! | [`responsive_image`](ThemeContext::responsive_image) | caller-supplied variants | caller-chosen |
//! | [`hd_default_sized_image`](ThemeContext::hd_default_sized_image) | `images.size` | `StandardImage` |
//! | [`hd_image_thumb`](ThemeContext::hd_image_thumb) | `thumbs.*` | `StandardImageThumb` |
//! | [`hd_album_thumb`](ThemeContext::hd_album_thumb) | `thumbs.*`, gated | `StandardAlbumThumb` |
//! | [`hd_custom_album_thumb`](ThemeContext::hd_custom_album_thumb) | custom request, gated | `CustomAlbumThumb` |
//! | [`responsive_custom_sized_image`](ThemeContext::responsive_custom_sized_image) | per breakpoint | `CustomImage` / `CustomImageThumb` / `CustomAlbumThumb` |
//!
//! [`head_markup`](ThemeContext::head_markup) goes into the page `<head>` once
//! per page so consumers without `<picture>` support still get a usable image.

use crate::access::{Album, GateDecision, album_thumb_class, gate};
use crate::config::RenderConfig;
use crate::filters::{HtmlHooks, OutputKind};
use crate::imaging::{
    AssetKind, BreakpointSizes, ImageEngine, ResolveError, SizeRequest, VariantResolver,
};
use crate::markup::{MarkupAttrs, build_markup, render_lock_image, render_polyfill_head};
use crate::types::{BreakpointSet, ImageRef};

/// Options for custom-sized images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomImageOptions {
    /// Also request the high-density counterparts.
    pub hd: bool,
    /// Treat the image as a thumbnail.
    pub thumb: bool,
    /// Engine-specific effects, e.g. `"gray"`.
    pub effects: Option<String>,
}

/// Everything a template needs to render responsive images.
pub struct ThemeContext<'a, E: ImageEngine + ?Sized> {
    engine: &'a E,
    config: &'a RenderConfig,
    hooks: &'a HtmlHooks,
}

impl<'a, E: ImageEngine + ?Sized> ThemeContext<'a, E> {
    pub fn new(engine: &'a E, config: &'a RenderConfig, hooks: &'a HtmlHooks) -> Self {
        Self {
            engine,
            config,
            hooks,
        }
    }

    fn resolver(&self) -> VariantResolver<'a, E> {
        VariantResolver::new(self.engine, self.config)
    }

    /// `<head>` fragment with the `<picture>` shiv and polyfill script, as
    /// configured under `[head]`.
    pub fn head_markup(&self) -> String {
        let head = &self.config.head;
        let script = Some(head.polyfill_script.trim()).filter(|src| !src.is_empty());
        render_polyfill_head(head.picture_shiv, script).into_string()
    }

    /// Markup for variants the caller already has, e.g. static theme images.
    pub fn responsive_image(
        &self,
        set: &BreakpointSet,
        attrs: &MarkupAttrs,
        kind: OutputKind,
    ) -> String {
        build_markup(set, attrs, kind, self.hooks)
    }

    /// Default sized image with optional high-density counterpart.
    pub fn hd_default_sized_image(
        &self,
        image: &ImageRef,
        hd: bool,
        attrs: &MarkupAttrs,
    ) -> Result<String, ResolveError> {
        let resolved = self.resolver().resolve_default_sized(image, hd)?;
        Ok(self.responsive_image(
            &BreakpointSet::standard_only(resolved),
            attrs,
            OutputKind::StandardImage,
        ))
    }

    /// Default thumbnail with optional high-density counterpart.
    pub fn hd_image_thumb(
        &self,
        image: &ImageRef,
        hd: bool,
        attrs: &MarkupAttrs,
    ) -> Result<String, ResolveError> {
        let resolved = self.resolver().resolve_thumb(image, hd)?;
        Ok(self.responsive_image(
            &BreakpointSet::standard_only(resolved),
            attrs,
            OutputKind::StandardImageThumb,
        ))
    }

    /// Default thumbnail of an album, or the lock image when the gate denies.
    pub fn hd_album_thumb<A: Album + ?Sized>(
        &self,
        album: &A,
        hd: bool,
        attrs: &MarkupAttrs,
    ) -> Result<String, ResolveError> {
        self.gated(album, attrs, OutputKind::StandardAlbumThumb, || {
            let resolved = self.resolver().resolve_thumb(&album.thumb_image(), hd)?;
            Ok(BreakpointSet::standard_only(resolved))
        })
    }

    /// Custom-sized album thumbnail, or the lock image when the gate denies.
    pub fn hd_custom_album_thumb<A: Album + ?Sized>(
        &self,
        album: &A,
        hd: bool,
        request: &SizeRequest,
        attrs: &MarkupAttrs,
    ) -> Result<String, ResolveError> {
        self.gated(album, attrs, OutputKind::CustomAlbumThumb, || {
            let resolved = self.resolver().resolve_variant(
                &album.thumb_image(),
                request,
                hd,
                AssetKind::Thumb,
                None,
            )?;
            Ok(BreakpointSet::standard_only(resolved))
        })
    }

    /// Custom-sized image with per-breakpoint sizes.
    ///
    /// When `album` is given the image is rendered as that album's thumbnail:
    /// the gate applies and the album class flags are added.
    pub fn responsive_custom_sized_image(
        &self,
        image: &ImageRef,
        sizes: &BreakpointSizes,
        options: &CustomImageOptions,
        attrs: &MarkupAttrs,
        album: Option<&dyn Album>,
    ) -> Result<String, ResolveError> {
        let asset = AssetKind::from_thumb_flag(options.thumb);
        let resolve = || {
            self.resolver().resolve_breakpoints(
                image,
                sizes,
                options.hd,
                asset,
                options.effects.as_deref(),
            )
        };

        match album {
            Some(album) => self.gated(album, attrs, OutputKind::CustomAlbumThumb, resolve),
            None => {
                let kind = if options.thumb {
                    OutputKind::CustomImageThumb
                } else {
                    OutputKind::CustomImage
                };
                Ok(self.responsive_image(&resolve()?, attrs, kind))
            }
        }
    }

    fn gated<A, F>(
        &self,
        album: &A,
        attrs: &MarkupAttrs,
        kind: OutputKind,
        resolve: F,
    ) -> Result<String, ResolveError>
    where
        A: Album + ?Sized,
        F: FnOnce() -> Result<BreakpointSet, ResolveError>,
    {
        match gate(album, self.config.albums.use_lock_image) {
            GateDecision::Deny => {
                tracing::debug!(kind = kind.hook_name(), "album locked, rendering lock image");
                Ok(render_lock_image(&self.config.albums.lock_image).into_string())
            }
            GateDecision::Allow => {
                let attrs = MarkupAttrs {
                    class: album_thumb_class(attrs.class.as_deref(), album),
                    ..attrs.clone()
                };
                Ok(self.responsive_image(&resolve()?, &attrs, kind))
            }
        }
    }
}
