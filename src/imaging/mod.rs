//! Variant resolution against an external image engine.
//!
//! | Operation | Function |
//! |---|---|
//! | **Custom size / crop** | [`VariantResolver::resolve_variant`] |
//! | **Fit within bounds** | [`VariantResolver::resolve_max_space`] |
//! | **Default sized image** | [`VariantResolver::resolve_default_sized`] |
//! | **Default thumbnail** | [`VariantResolver::resolve_thumb`] |
//! | **All breakpoints** | [`VariantResolver::resolve_breakpoints`] |
//!
//! The module is split into:
//! - **Calculations**: Pure request doubling and validation (unit testable)
//! - **Parameters**: Data structures describing engine requests
//! - **Engine**: [`ImageEngine`] trait implemented by the gallery platform
//! - **Resolve**: High-level functions combining calculations + engine

mod calculations;
pub mod engine;
mod params;
pub mod resolve;

pub use engine::{Dimensions, EngineError, ImageEngine};
pub use params::{
    AssetKind, BreakpointSizes, CustomImageParams, Quality, SizeRequest, SizeSpec, ThumbParams,
};
pub use resolve::{ResolveError, Resolved, VariantResolver};
