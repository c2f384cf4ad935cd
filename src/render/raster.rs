use crate::foundation::error::{MergeError, MergeResult};
use crate::render::surface::Surface;
use resvg::tiny_skia;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rasterizes engine SVG output onto a [`Surface`] with `resvg`.
///
/// The font database is built once and shared by every render.
#[derive(Clone)]
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    resources_dir: Option<PathBuf>,
    scale: f32,
}

impl SvgRasterizer {
    /// Build a rasterizer drawing at `scale` (1.0 = one SVG unit per pixel).
    pub fn new(scale: f32) -> MergeResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MergeError::validation(format!(
                "raster scale must be finite and positive, got {scale}"
            )));
        }
        Ok(Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
            resources_dir: None,
            scale,
        })
    }

    /// Load system fonts plus every font file found directly inside `font_dirs`.
    pub fn with_fonts(mut self, system_fonts: bool, font_dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if system_fonts {
            db.load_system_fonts();
        }
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "built raster font database");
        self.fontdb = Arc::new(db);
        self
    }

    /// Resolve relative `href`s inside the SVG against `dir`.
    pub fn with_resources_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.resources_dir = dir;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Draw `svg` onto `surface` from the origin. Content past the surface edge is clipped.
    pub fn rasterize(&self, svg: &str, surface: &mut Surface) -> MergeResult<()> {
        let opts = usvg::Options {
            resources_dir: self.resources_dir.clone(),
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| MergeError::render(format!("parse engine svg: {e}")))?;

        let xform = tiny_skia::Transform::from_scale(self.scale, self.scale);
        resvg::render(&tree, xform, &mut surface.pixmap_mut());
        Ok(())
    }
}

impl std::fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("font_faces", &self.fontdb.len())
            .field("resources_dir", &self.resources_dir)
            .field("scale", &self.scale)
            .finish()
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
