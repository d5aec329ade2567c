//! Shared test utilities for the hidpi-gal test suite.
//!
//! Provides variant constructors, a configurable [`MockAlbum`], and markup
//! inspectors that pull attributes out of rendered `<source>` tags without
//! depending on attribute order.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let html = render_picture(&set, &MarkupAttrs::new()).into_string();
//! assert_eq!(source_count(&html), 2);
//! assert_eq!(source_srcset(&html, "image_standard").as_deref(), Some("a.jpg, a@2x.jpg 2x"));
//! ```

use crate::access::Album;
use crate::types::{ImageRef, ImageVariant};

// =========================================================================
// Fixtures
// =========================================================================

pub fn variant(url: &str, width: u32, height: u32) -> ImageVariant {
    ImageVariant::new(url, width, height)
}

/// Album with builder-style setters. Defaults: visible, no password, no rights.
#[derive(Debug, Clone)]
pub struct MockAlbum {
    pub visible: bool,
    pub password: String,
    pub list_rights: bool,
    pub thumb: ImageRef,
}

impl MockAlbum {
    pub fn new() -> Self {
        Self {
            visible: true,
            password: String::new(),
            list_rights: false,
            thumb: ImageRef::new("travel", "tokyo.jpg"),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub fn list_rights(mut self, rights: bool) -> Self {
        self.list_rights = rights;
        self
    }
}

impl Album for MockAlbum {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn has_list_rights(&self) -> bool {
        self.list_rights
    }

    fn thumb_image(&self) -> ImageRef {
        self.thumb.clone()
    }
}

// =========================================================================
// Markup inspectors
// =========================================================================

/// Number of `<source>` elements in the markup.
pub fn source_count(html: &str) -> usize {
    html.matches("<source ").count()
}

/// Raw (still attribute-escaped) value of `attr` on the `<source>` with `class`.
pub fn source_attr(html: &str, class: &str, attr: &str) -> Option<String> {
    let class_attr = format!(r#"class="{class}""#);
    let tag = html
        .split('<')
        .find(|tag| tag.starts_with("source ") && tag.contains(&class_attr))?;
    let needle = format!(r#" {attr}=""#);
    let start = tag.find(&needle)? + needle.len();
    let end = tag[start..].find('"')? + start;
    Some(tag[start..end].to_string())
}

/// `srcset` of the `<source>` with `class`.
pub fn source_srcset(html: &str, class: &str) -> Option<String> {
    source_attr(html, class, "srcset")
}

/// Undo maud's attribute escaping.
pub fn html_unescape(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
