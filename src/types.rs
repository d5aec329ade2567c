//! Shared types passed between the resolver and the markup builder.
//!
//! A [`BreakpointSet`] is what [`imaging::resolve`](crate::imaging::resolve)
//! produces and what [`markup`](crate::markup) consumes. Every slot is
//! optional: an absent variant means "don't render that candidate", never an
//! error.

use serde::{Deserialize, Serialize};

/// Identifies an image to the external engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Album path the image lives in, e.g. `"travel/japan"`.
    pub album: String,
    /// Filename within the album, e.g. `"tokyo.jpg"`.
    pub filename: String,
}

impl ImageRef {
    pub fn new(album: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            album: album.into(),
            filename: filename.into(),
        }
    }
}

/// A generated image as reported by the engine: where it lives and how big it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageVariant {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }
}

/// Standard-density and high-density (2x) variant of one breakpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sd: Option<ImageVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd: Option<ImageVariant>,
}

impl DensityPair {
    pub fn new(sd: Option<ImageVariant>, hd: Option<ImageVariant>) -> Self {
        Self { sd, hd }
    }

    pub fn is_empty(&self) -> bool {
        self.sd.is_none() && self.hd.is_none()
    }
}

impl From<(ImageVariant, Option<ImageVariant>)> for DensityPair {
    fn from((sd, hd): (ImageVariant, Option<ImageVariant>)) -> Self {
        Self { sd: Some(sd), hd }
    }
}

/// Named screen-width tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    /// Desktop ("large") screens. No media condition.
    Standard,
    /// Tablet screens, `max-width: 767px`.
    Medium,
    /// Phone screens, `max-width: 479px`.
    Small,
}

impl Breakpoint {
    /// Order in which `<source>` elements are emitted.
    ///
    /// `<picture>` picks the first matching source, so the narrowest media
    /// condition has to come first and the unconditional one last.
    pub const RENDER_ORDER: [Breakpoint; 3] =
        [Breakpoint::Small, Breakpoint::Medium, Breakpoint::Standard];

    pub fn media(self) -> Option<&'static str> {
        match self {
            Breakpoint::Standard => None,
            Breakpoint::Medium => Some("(max-width: 767px)"),
            Breakpoint::Small => Some("(max-width: 479px)"),
        }
    }

    /// CSS class put on the `<source>` element.
    pub fn class_name(self) -> &'static str {
        match self {
            Breakpoint::Standard => "image_standard",
            Breakpoint::Medium => "image_medium",
            Breakpoint::Small => "image_small",
        }
    }
}

/// Variants for all three breakpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakpointSet {
    pub standard: DensityPair,
    pub medium: DensityPair,
    pub small: DensityPair,
}

impl BreakpointSet {
    /// A set with only the standard breakpoint filled in.
    pub fn standard_only(pair: impl Into<DensityPair>) -> Self {
        Self {
            standard: pair.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> &DensityPair {
        match breakpoint {
            Breakpoint::Standard => &self.standard,
            Breakpoint::Medium => &self.medium,
            Breakpoint::Small => &self.small,
        }
    }

    pub fn get_mut(&mut self, breakpoint: Breakpoint) -> &mut DensityPair {
        match breakpoint {
            Breakpoint::Standard => &mut self.standard,
            Breakpoint::Medium => &mut self.medium,
            Breakpoint::Small => &mut self.small,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_order_is_narrowest_first() {
        let media: Vec<_> = Breakpoint::RENDER_ORDER
            .iter()
            .map(|b| b.media())
            .collect();
        assert_eq!(
            media,
            vec![Some("(max-width: 479px)"), Some("(max-width: 767px)"), None]
        );
    }

    #[test]
    fn density_pair_from_resolved_tuple() {
        let pair: DensityPair = (ImageVariant::new("a.jpg", 800, 600), None).into();
        assert!(pair.sd.is_some());
        assert!(pair.hd.is_none());
        assert!(!pair.is_empty());
        assert!(DensityPair::default().is_empty());
    }

    #[test]
    fn breakpoint_set_deserializes_sparse_json() {
        let json = r#"{"standard": {"sd": {"url": "a.jpg", "width": 800, "height": 600}}}"#;
        let set: BreakpointSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.standard.sd.as_ref().unwrap().width, 800);
        assert!(set.standard.hd.is_none());
        assert!(set.medium.is_empty());
        assert!(set.small.is_empty());
    }

    #[test]
    fn get_mut_targets_the_right_slot() {
        let mut set = BreakpointSet::default();
        set.get_mut(Breakpoint::Medium).hd = Some(ImageVariant::new("m@2x.jpg", 800, 600));
        assert!(set.get(Breakpoint::Medium).hd.is_some());
        assert!(set.get(Breakpoint::Small).is_empty());
    }
}
