//! Responsive `<picture>` markup.
//!
//! Turns a [`BreakpointSet`] into a `<picture>` element with one `<source>`
//! per breakpoint that has data and a plain `<img>` fallback for consumers
//! without `<picture>` support.
//!
//! ## Output
//!
//! ```html
//! <picture class="..." id="..." data-alt="Alt text">
//!   <source class="image_small" srcset="s.jpg, s@2x.jpg 2x" media="(max-width: 479px)">
//!   <source class="image_medium" srcset="m.jpg, m@2x.jpg 2x" media="(max-width: 767px)">
//!   <source class="image_standard" srcset="a.jpg, a@2x.jpg 2x">
//!   <img src="a.jpg" width="800" height="600" alt="Alt text">
//! </picture>
//! ```
//!
//! (Rendered without whitespace between elements.)
//!
//! ## srcset candidates
//!
//! | standard density | high density | candidate |
//! |---|---|---|
//! | present | present | `sd, hd 2x` |
//! | present | absent | `sd` |
//! | absent | present | `hd 2x` |
//! | absent | absent | no `<source>` |
//!
//! URLs are path-encoded with [`encode_url`] and then attribute-escaped by maud.

use crate::filters::{HtmlHooks, OutputKind};
use crate::types::{Breakpoint, BreakpointSet, DensityPair};
use maud::{Markup, PreEscaped, html};
use std::borrow::Cow;

/// Optional attributes of the `<picture>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupAttrs {
    pub class: Option<String>,
    pub id: Option<String>,
    pub alt: Option<String>,
}

impl MarkupAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// Percent-encode the path and query of an image URL.
///
/// Each path segment is encoded on its own so `/` survives. `@` is kept as
/// well (it is a legal path character and names `@2x` files). Query keys and
/// values are decoded then re-encoded so already-encoded queries don't get
/// double-encoded; a `+` in the query is read as a space, the way form-encoded
/// query strings spell it. Scheme and authority are left untouched.
///
/// The first raw `?` starts the query and the first raw `#` the fragment, even
/// inside what was meant as a file name, so files named with either character
/// can't be addressed.
pub fn encode_url(url: &str) -> String {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, Some(query)),
        None => (rest, None),
    };
    let (origin, path) = split_origin(rest);

    let mut encoded = String::with_capacity(url.len());
    encoded.push_str(origin);
    encoded.push_str(
        &path
            .split('/')
            .map(encode_segment)
            .collect::<Vec<_>>()
            .join("/"),
    );
    if let Some(query) = query {
        encoded.push('?');
        encoded.push_str(&encode_query(query));
    }
    if let Some(fragment) = fragment {
        encoded.push('#');
        encoded.push_str(&urlencoding::encode(fragment));
    }
    encoded
}

/// Split `scheme://host[:port]` off the front of an absolute URL.
fn split_origin(url: &str) -> (&str, &str) {
    let Some(scheme_end) = url.find("://") else {
        return ("", url);
    };
    let authority_start = scheme_end + 3;
    match url[authority_start..].find('/') {
        Some(path_start) => url.split_at(authority_start + path_start),
        None => (url, ""),
    }
}

fn encode_segment(segment: &str) -> String {
    segment
        .split('@')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("@")
}

fn encode_query(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => format!("{}={}", reencode(key), reencode(value)),
            None => reencode(pair),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn reencode(part: &str) -> String {
    let spaced = part.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).unwrap_or(Cow::Borrowed(spaced.as_str()));
    urlencoding::encode(&decoded).into_owned()
}

/// Attribute text with control characters can't be represented safely;
/// the field degrades to empty instead of failing the render.
fn attr_text(field: &str, value: &str) -> String {
    if value
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        tracing::warn!(field, "dropping attribute text containing control characters");
        return String::new();
    }
    value.to_string()
}

fn non_empty_attr(field: &str, value: Option<&str>) -> Option<String> {
    value
        .map(|v| attr_text(field, v.trim()))
        .filter(|v| !v.is_empty())
}

/// The `srcset` candidate list of one breakpoint, or `None` if it has no data.
pub fn srcset(pair: &DensityPair) -> Option<String> {
    match (&pair.sd, &pair.hd) {
        (Some(sd), Some(hd)) => Some(format!(
            "{}, {} 2x",
            encode_url(&sd.url),
            encode_url(&hd.url)
        )),
        (Some(sd), None) => Some(encode_url(&sd.url)),
        (None, Some(hd)) => Some(format!("{} 2x", encode_url(&hd.url))),
        (None, None) => None,
    }
}

/// Render the `<picture>` element for a breakpoint set.
///
/// A missing standard-density variant is not an error: the fallback `<img>`
/// is emitted with only its `alt` attribute.
pub fn render_picture(set: &BreakpointSet, attrs: &MarkupAttrs) -> Markup {
    let alt = attr_text("alt", attrs.alt.as_deref().unwrap_or_default());
    let class = non_empty_attr("class", attrs.class.as_deref());
    let id = non_empty_attr("id", attrs.id.as_deref());

    let fallback = set.standard.sd.as_ref();
    if fallback.is_none() {
        tracing::debug!("no standard-density variant, fallback img has no src");
    }

    html! {
        picture class=[class] id=[id] data-alt=(alt) {
            @for breakpoint in Breakpoint::RENDER_ORDER {
                @if let Some(candidates) = srcset(set.get(breakpoint)) {
                    source class=(breakpoint.class_name()) srcset=(candidates) media=[breakpoint.media()];
                }
            }
            img src=[fallback.map(|v| encode_url(&v.url))]
                width=[fallback.map(|v| v.width)]
                height=[fallback.map(|v| v.height)]
                alt=(alt);
        }
    }
}

/// Render a breakpoint set and run it through the hooks for `kind`.
pub fn build_markup(
    set: &BreakpointSet,
    attrs: &MarkupAttrs,
    kind: OutputKind,
    hooks: &HtmlHooks,
) -> String {
    hooks.apply(kind, render_picture(set, attrs).into_string())
}

const PICTURE_SHIV: &str = r#"document.createElement("picture");"#;

/// Page head fragment for consumers without native `<picture>` support: the
/// element shiv and, when `script` is given, the Picturefill polyfill.
pub fn render_polyfill_head(picture_shiv: bool, script: Option<&str>) -> Markup {
    html! {
        @if picture_shiv {
            script { (PreEscaped(PICTURE_SHIV)) }
        }
        @if let Some(src) = script {
            script src=(encode_url(src)) {}
        }
    }
}

/// Placeholder shown instead of a protected album's thumbnail.
pub fn render_lock_image(src: &str) -> Markup {
    html! {
        img class="password_protected" src=(encode_url(src)) alt="protected";
    }
}
