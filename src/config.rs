//! Render configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. This replaces the
//! gallery platform's option store for the settings this crate reads: default
//! image and thumbnail geometry, standard and high-density qualities, the
//! album lock image, and the page head polyfill.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [images]
//! size = 595                # Default sized image, longer edge in px
//! quality = 85              # Standard-density quality (1-100)
//! hd_quality = 35           # High-density quality (0 = use 35)
//!
//! [thumbs]
//! size = 100                # Default thumbnail size
//! crop_width = 100          # Default thumbnail crop width
//! crop_height = 100         # Default thumbnail crop height
//! quality = 75
//! hd_quality = 35
//!
//! [albums]
//! use_lock_image = true     # Show lock image for protected albums
//! lock_image = "/zp-core/images/err-passwordprotected.png"
//!
//! [head]
//! picture_shiv = true       # document.createElement("picture") shiv
//! polyfill_script = "/plugins/zp_picturefill/picturefill.min.js"
//! ```
//!
//! High-density images are rendered at twice the linear resolution, so a
//! much lower quality keeps their file size close to the standard image
//! without a visible loss on dense screens.
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [thumbs]
//! hd_quality = 50
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Layers
//!
//! [`load_config`] merges one `config.toml` per layer directory over the
//! stock defaults, lowest precedence first. A theme directory followed by the
//! site directory lets a theme ship its own image sizes while the site keeps
//! the last word.

use crate::imaging::{AssetKind, Quality, ThumbParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Quality used for high-density variants when none is configured.
pub const DEFAULT_HD_QUALITY: u32 = 35;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Render configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Default sized image settings.
    pub images: ImagesConfig,
    /// Default thumbnail settings.
    pub thumbs: ThumbsConfig,
    /// Album thumbnail access settings.
    pub albums: AlbumsConfig,
    /// Page head output for browsers without `<picture>` support.
    pub head: HeadConfig,
}

impl RenderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let qualities = [
            ("images.quality", self.images.quality),
            ("images.hd_quality", self.images.hd_quality),
            ("thumbs.quality", self.thumbs.quality),
            ("thumbs.hd_quality", self.thumbs.hd_quality),
        ];
        for (key, value) in qualities {
            if value > 100 {
                return Err(ConfigError::Validation(format!("{key} must be 0-100")));
            }
        }
        let sizes = [
            ("images.size", self.images.size),
            ("thumbs.size", self.thumbs.size),
            ("thumbs.crop_width", self.thumbs.crop_width),
            ("thumbs.crop_height", self.thumbs.crop_height),
        ];
        for (key, value) in sizes {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{key} must be non-zero")));
            }
        }
        Ok(())
    }

    /// Standard-density quality for an asset kind.
    pub fn quality(&self, asset: AssetKind) -> Quality {
        match asset {
            AssetKind::Image => Quality::new(self.images.quality),
            AssetKind::Thumb => Quality::new(self.thumbs.quality),
        }
    }

    /// High-density quality for an asset kind. Zero means "unset" and falls
    /// back to [`DEFAULT_HD_QUALITY`].
    pub fn hd_quality(&self, asset: AssetKind) -> Quality {
        let configured = match asset {
            AssetKind::Image => self.images.hd_quality,
            AssetKind::Thumb => self.thumbs.hd_quality,
        };
        if configured == 0 {
            Quality::new(DEFAULT_HD_QUALITY)
        } else {
            Quality::new(configured)
        }
    }

    /// Geometry and quality of the default standard-density thumbnail.
    pub fn thumb_params(&self) -> ThumbParams {
        ThumbParams {
            size: self.thumbs.size,
            crop_width: self.thumbs.crop_width,
            crop_height: self.thumbs.crop_height,
            quality: self.quality(AssetKind::Thumb),
        }
    }
}

/// Default sized image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Longer edge of the default sized image, in pixels.
    pub size: u32,
    /// Standard-density encoding quality.
    pub quality: u32,
    /// High-density encoding quality (0 = default of 35).
    pub hd_quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            size: 595,
            quality: 85,
            hd_quality: DEFAULT_HD_QUALITY,
        }
    }
}

/// Default thumbnail settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbsConfig {
    pub size: u32,
    pub crop_width: u32,
    pub crop_height: u32,
    pub quality: u32,
    pub hd_quality: u32,
}

impl Default for ThumbsConfig {
    fn default() -> Self {
        Self {
            size: 100,
            crop_width: 100,
            crop_height: 100,
            quality: 75,
            hd_quality: DEFAULT_HD_QUALITY,
        }
    }
}

/// Album thumbnail access settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlbumsConfig {
    /// Replace thumbnails of password-protected albums with the lock image
    /// for viewers without list rights.
    pub use_lock_image: bool,
    /// URL of the lock placeholder image.
    pub lock_image: String,
}

impl Default for AlbumsConfig {
    fn default() -> Self {
        Self {
            use_lock_image: true,
            lock_image: "/zp-core/images/err-passwordprotected.png".to_string(),
        }
    }
}

/// Page head output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadConfig {
    /// Emit the `document.createElement("picture")` shiv.
    pub picture_shiv: bool,
    /// URL of the Picturefill script. Empty omits the script tag.
    pub polyfill_script: String,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            picture_shiv: true,
            polyfill_script: "/plugins/zp_picturefill/picturefill.min.js".to_string(),
        }
    }
}

// =============================================================================
// Layered loading
// =============================================================================

/// File name looked up in every config layer directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Stock defaults as a TOML table, the bottom layer of every merge.
pub fn stock_defaults() -> Result<toml::Table, ConfigError> {
    match toml::Value::try_from(RenderConfig::default())? {
        toml::Value::Table(table) => Ok(table),
        other => Err(ConfigError::Validation(format!(
            "stock defaults serialized to a {}, expected a table",
            other.type_str()
        ))),
    }
}

/// Deep-merge `overlay` into `base`. Nested tables merge key by key; any
/// other overlay value replaces what `base` had.
pub fn merge_toml(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(overlay_table) => match base.get_mut(&key) {
                Some(toml::Value::Table(base_table)) => merge_toml(base_table, overlay_table),
                _ => {
                    base.insert(key, toml::Value::Table(overlay_table));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Parse the `config.toml` of one layer directory. A missing file is an
/// empty layer.
pub fn read_layer(dir: &Path) -> Result<Option<toml::Table>, ConfigError> {
    let content = match fs::read_to_string(dir.join(CONFIG_FILE)) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(content.parse::<toml::Table>()?))
}

/// Load the render config from a stack of layer directories.
///
/// Layers are given lowest precedence first. A theme ships its preferred
/// sizes and qualities in its own directory and the site directory
/// overrides them:
///
/// ```text
/// stock defaults  <  themes/basic/config.toml  <  site/config.toml
/// ```
///
/// Unknown keys in any layer are rejected and the merged result is validated.
pub fn load_config(layers: &[&Path]) -> Result<RenderConfig, ConfigError> {
    let mut merged = stock_defaults()?;
    for dir in layers {
        if let Some(layer) = read_layer(dir)? {
            tracing::debug!(dir = %dir.display(), "merging config layer");
            merge_toml(&mut merged, layer);
        }
    }
    let config: RenderConfig = toml::Value::Table(merged).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# hidpi-gal Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Default sized images
# ---------------------------------------------------------------------------
[images]
# Longer edge of the default sized image, in pixels.
size = 595

# Standard-density encoding quality (1 = worst, 100 = best).
quality = 85

# High-density (2x) encoding quality. The doubled resolution hides the
# stronger compression on dense screens. 0 means the default of 35.
hd_quality = 35

# ---------------------------------------------------------------------------
# Default thumbnails
# ---------------------------------------------------------------------------
[thumbs]
size = 100
crop_width = 100
crop_height = 100
quality = 75
hd_quality = 35

# ---------------------------------------------------------------------------
# Album thumbnails
# ---------------------------------------------------------------------------
[albums]
# Show the lock image instead of the real thumbnail of a password-protected
# album to viewers without list rights.
use_lock_image = true
lock_image = "/zp-core/images/err-passwordprotected.png"

# ---------------------------------------------------------------------------
# Page head
# ---------------------------------------------------------------------------
[head]
# Register <picture> with legacy browsers so it can be styled.
picture_shiv = true

# Picturefill polyfill loaded in the page head. Empty disables the tag.
polyfill_script = "/plugins/zp_picturefill/picturefill.min.js"
"##
}
