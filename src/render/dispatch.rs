use crate::foundation::error::MergeResult;
use crate::merge::merge;
use crate::render::engine::{EngineView, RenderEngine, ViewGuard};
use crate::render::sink::ResultSink;
use crate::render::surface::{RasterFrame, Surface};
use crate::spec::input::{PayloadInput, SpecInput};

/// Per-invocation collaborators supplied by the caller.
#[derive(Debug, Default)]
pub struct RenderContext<'a> {
    /// When set, selects the raster path and receives the drawing.
    pub surface: Option<&'a mut Surface>,
}

impl<'a> RenderContext<'a> {
    /// Vector output.
    pub fn svg() -> Self {
        Self { surface: None }
    }

    /// Raster output onto `surface`.
    pub fn raster(surface: &'a mut Surface) -> Self {
        Self {
            surface: Some(surface),
        }
    }
}

/// Successful render output.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered {
    /// Vector path result.
    Svg(String),
    /// Raster path result: a copy of the surface after drawing.
    Raster(RasterFrame),
}

impl Rendered {
    pub fn as_svg(&self) -> Option<&str> {
        match self {
            Self::Svg(svg) => Some(svg),
            Self::Raster(_) => None,
        }
    }

    pub fn as_raster(&self) -> Option<&RasterFrame> {
        match self {
            Self::Raster(frame) => Some(frame),
            Self::Svg(_) => None,
        }
    }
}

/// Merge `payload` into `spec` and render it with `engine`.
///
/// Merge failures return before the engine is touched. Once the engine produced a view, the view
/// is finalized after the render attempt whether it succeeded or not.
#[tracing::instrument(skip_all, fields(raster = ctx.surface.is_some()))]
pub fn render<E: RenderEngine>(
    engine: &E,
    spec: impl Into<SpecInput>,
    payload: impl Into<PayloadInput>,
    ctx: RenderContext<'_>,
) -> MergeResult<Rendered> {
    let spec = merge(spec, payload)?;
    tracing::debug!(tables = spec.data.as_ref().map_or(0, Vec::len), "spec merged");

    let mut guard = ViewGuard::new(engine.parse(&spec)?);
    drop(spec);

    let out = match ctx.surface {
        Some(surface) => {
            guard.view_mut().to_surface(surface)?;
            Rendered::Raster(surface.snapshot())
        }
        None => Rendered::Svg(guard.view_mut().to_svg()?),
    };
    tracing::debug!("render complete");
    Ok(out)
}

/// Run one invocation and deliver its outcome to `sink`.
///
/// Every failure, parse or engine, is converted to its display string. Exactly one of
/// [`ResultSink::success`] / [`ResultSink::failure`] is called.
pub fn invoke<E: RenderEngine, S: ResultSink + ?Sized>(
    engine: &E,
    spec: impl Into<SpecInput>,
    payload: impl Into<PayloadInput>,
    ctx: RenderContext<'_>,
    sink: &mut S,
) {
    match render(engine, spec, payload, ctx) {
        Ok(out) => sink.success(out),
        Err(err) => {
            tracing::warn!(error = %err, "render invocation failed");
            sink.failure(err.to_string())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/dispatch.rs"]
mod tests;
