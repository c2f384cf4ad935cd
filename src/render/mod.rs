/// Merge-then-render invocation and its outcome types.
pub mod dispatch;
/// Engine trait boundary.
pub mod engine;
/// SVG rasterization onto surfaces.
pub mod raster;
/// Outcome delivery.
pub mod sink;
/// Raster surfaces and frames.
pub mod surface;
/// `vg2svg` process engine.
pub mod vega_cli;
