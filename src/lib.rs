//! Merge runtime data tables into a Vega specification and render it.
//!
//! The crate owns one piece of logic, the data merge: a specification's declared `data` tables
//! are reconciled with a caller-supplied `name -> rows` payload. Layout and drawing are delegated
//! to an external [`RenderEngine`] (by default the `vg2svg` binary from `vega-cli`).
//!
//! - [`merge`] a specification with a payload
//! - [`render`] the merged specification to SVG, or to a raster [`Surface`]
//! - [`invoke`] the same, delivering exactly one outcome to a [`ResultSink`]
#![forbid(unsafe_code)]

mod foundation;

/// JSON configuration for the engine and raster output.
pub mod config;
/// The data merge.
pub mod merge;
/// Engine boundary, render dispatch and raster output.
pub mod render;
/// Specification model and inputs.
pub mod spec;

pub use crate::config::{Config, RasterOpts};
pub use crate::foundation::error::{InputKind, MergeError, MergeResult};
pub use crate::merge::merge;
pub use crate::render::dispatch::{RenderContext, Rendered, invoke, render};
pub use crate::render::engine::{EngineView, RenderEngine};
pub use crate::render::raster::SvgRasterizer;
pub use crate::render::sink::{InMemorySink, Outcome, ResultSink};
pub use crate::render::surface::{RasterFrame, Surface};
pub use crate::render::vega_cli::{VegaCliEngine, VegaCliOpts, VegaCliView};
pub use crate::spec::input::{DataPayload, PayloadInput, SpecInput};
pub use crate::spec::model::{Specification, TableDescriptor};
