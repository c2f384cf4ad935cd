use crate::foundation::error::{MergeError, MergeResult};
use crate::render::raster::SvgRasterizer;
use crate::render::surface::Surface;
use crate::render::vega_cli::{VegaCliEngine, VegaCliOpts};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Top-level configuration, usually loaded from a JSON file.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: VegaCliOpts,
    pub raster: RasterOpts,
}

/// Raster output options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RasterOpts {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// SVG units to pixels.
    pub scale: f32,
    /// Surface clear color (straight RGBA8).
    pub background: [u8; 4],
    /// Load the system font database for text in rasterized charts.
    pub system_fonts: bool,
    /// Additional directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            scale: 1.0,
            background: [255, 255, 255, 255],
            system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

impl RasterOpts {
    pub fn validate(&self) -> MergeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MergeError::validation(
                "raster width/height must be non-zero",
            ));
        }
        if self.width > Surface::MAX_DIM || self.height > Surface::MAX_DIM {
            return Err(MergeError::validation(format!(
                "raster size too large: {}x{} (max {max}x{max})",
                self.width,
                self.height,
                max = Surface::MAX_DIM
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(MergeError::validation(format!(
                "raster scale must be finite and positive, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    /// Allocate a fresh surface with these dimensions and background.
    pub fn surface(&self) -> MergeResult<Surface> {
        Surface::with_background(self.width, self.height, self.background)
    }

    pub fn rasterizer(&self) -> MergeResult<SvgRasterizer> {
        Ok(SvgRasterizer::new(self.scale)?.with_fonts(self.system_fonts, &self.font_dirs))
    }
}

impl Config {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MergeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MergeError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MergeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MergeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> MergeResult<()> {
        self.engine.validate()?;
        self.raster.validate()
    }

    /// Build the `vg2svg` engine described by this configuration.
    pub fn build_engine(&self) -> MergeResult<VegaCliEngine> {
        self.validate()?;
        let rasterizer = self
            .raster
            .rasterizer()?
            .with_resources_dir(self.engine.base_dir.clone());
        VegaCliEngine::new(self.engine.clone(), rasterizer)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
