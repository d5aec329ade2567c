//! # HiDPI Gal
//!
//! Responsive, high-density image markup for photo gallery themes.
//! Given an image and a size, the crate asks the gallery's image engine for a
//! standard-density variant and a doubled high-density variant, then renders a
//! `<picture>` element whose `srcset` lets the browser pick the sharper one on
//! 2x displays.
//!
//! # Request Flow
//!
//! ```text
//! 1. Resolve   ImageRef + size  →  (sd, hd) variants   (engine calls, explicit quality)
//! 2. Gate      Album            →  allow / lock image   (album thumbnails only)
//! 3. Render    BreakpointSet    →  <picture> markup     (maud, then output hooks)
//! ```
//!
//! The crate never touches pixels. Scaling, cropping, compression and caching
//! belong to the [`ImageEngine`](imaging::ImageEngine) implementation supplied by
//! the platform; this crate only decides *which* variants to ask for and how to
//! describe them in HTML.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Template-level helpers tying resolution, gating and rendering together |
//! | [`imaging`] | Engine trait, request parameters, doubling math, variant resolution |
//! | [`markup`] | `<picture>` / `srcset` rendering and URL encoding |
//! | [`filters`] | Output kinds and the post-processing hooks registered per kind |
//! | [`access`] | Album trait and the lock-image gate for protected albums |
//! | [`config`] | `config.toml` loading, stock defaults, and validation |
//! | [`types`] | Shared value types: image references, variants, breakpoints |
//!
//! # Design Decisions
//!
//! ## Quality Is a Parameter
//!
//! High-density variants are requested at a lower compression quality than
//! standard ones; at twice the pixel density the artifacts are far less
//! visible and the files stay small. Every engine call receives its
//! [`Quality`](imaging::Quality) explicitly, so a failed high-density request
//! can never leave a modified quality behind for the next request.
//!
//! ## Narrowest Breakpoint First
//!
//! Browsers use the first `<source>` whose media condition matches. Sources
//! are emitted small, medium, then standard, so the unconditioned standard
//! source only wins when nothing narrower applies.
//!
//! ## Closed Set of Output Kinds
//!
//! Hooks are registered against an [`OutputKind`](filters::OutputKind) enum
//! rather than free-form filter names. A typo is a compile error, and every
//! helper in [`theme`] declares exactly which kind it renders.

pub mod access;
pub mod config;
pub mod filters;
pub mod imaging;
pub mod markup;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
