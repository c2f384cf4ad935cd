use crate::foundation::error::MergeResult;
use crate::render::surface::Surface;
use crate::spec::model::Specification;

/// An external rendering engine.
///
/// The engine owns layout and drawing. This crate only hands it a merged specification and picks
/// the output path.
pub trait RenderEngine: Send + Sync {
    /// Per-invocation compiled view. Owns the engine's transient resources until finalized.
    type View: EngineView;

    /// Compile a merged specification into a view.
    fn parse(&self, spec: &Specification) -> MergeResult<Self::View>;
}

/// A compiled specification, ready to render once.
pub trait EngineView {
    /// Vector path: render to an SVG document.
    fn to_svg(&mut self) -> MergeResult<String>;

    /// Raster path: draw onto a caller-supplied surface.
    fn to_surface(&mut self, surface: &mut Surface) -> MergeResult<()>;

    /// Release the engine resources held by this view. Called exactly once per view.
    fn finalize(&mut self);
}

/// Finalizes the wrapped view when dropped, whatever the render outcome was.
pub(crate) struct ViewGuard<V: EngineView> {
    view: V,
}

impl<V: EngineView> ViewGuard<V> {
    pub(crate) fn new(view: V) -> Self {
        Self { view }
    }

    pub(crate) fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

impl<V: EngineView> Drop for ViewGuard<V> {
    fn drop(&mut self) {
        self.view.finalize();
    }
}
