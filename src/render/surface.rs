use crate::foundation::error::{MergeError, MergeResult};
use crate::foundation::math::{premultiply_rgba8, unpremultiply_rgba8_in_place};
use resvg::tiny_skia;

/// Raster drawing surface handed to the raster render path.
///
/// Pixels are RGBA8 with premultiplied alpha. [`Surface::new`] clears to opaque white.
pub struct Surface {
    pixmap: tiny_skia::Pixmap,
}

impl Surface {
    /// Largest accepted width or height.
    pub const MAX_DIM: u32 = 16_384;

    /// Allocate a `width x height` surface cleared to opaque white.
    pub fn new(width: u32, height: u32) -> MergeResult<Self> {
        Self::with_background(width, height, [255, 255, 255, 255])
    }

    /// Allocate a surface cleared to `rgba` (straight alpha).
    pub fn with_background(width: u32, height: u32, rgba: [u8; 4]) -> MergeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MergeError::validation(
                "surface width/height must be non-zero",
            ));
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(MergeError::validation(format!(
                "surface size too large: {width}x{height} (max {max}x{max})",
                max = Self::MAX_DIM
            )));
        }
        let pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| MergeError::validation("failed to allocate surface pixmap"))?;
        let mut surface = Self { pixmap };
        surface.clear(rgba);
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill every pixel with `rgba` (straight alpha).
    pub fn clear(&mut self, rgba: [u8; 4]) {
        let px = premultiply_rgba8(rgba);
        for dst in self.pixmap.data_mut().chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub(crate) fn pixmap_mut(&mut self) -> tiny_skia::PixmapMut<'_> {
        self.pixmap.as_mut()
    }

    /// Copy the current pixels out.
    pub fn snapshot(&self) -> RasterFrame {
        RasterFrame {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data().to_vec(),
            premultiplied: true,
        }
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// Rendered raster pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl RasterFrame {
    /// RGBA8 bytes with straight alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Encode as a PNG image.
    pub fn encode_png(&self) -> MergeResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| MergeError::validation("frame data size mismatch with width*height*4"))?;

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| MergeError::render(format!("encode png: {e}")))?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
