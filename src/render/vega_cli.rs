use crate::foundation::error::{MergeError, MergeResult};
use crate::render::engine::{EngineView, RenderEngine};
use crate::render::raster::SvgRasterizer;
use crate::render::surface::Surface;
use crate::spec::model::Specification;
use serde::{Deserialize, Serialize};
use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Options for [`VegaCliEngine`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VegaCliOpts {
    /// The Vega CLI SVG renderer (from the `vega-cli` npm package).
    pub program: PathBuf,
    /// Base directory for relative data URLs inside the specification (`--base`).
    pub base_dir: Option<PathBuf>,
    /// Extra arguments appended after the built-in ones.
    pub extra_args: Vec<String>,
}

impl Default for VegaCliOpts {
    fn default() -> Self {
        Self {
            program: PathBuf::from("vg2svg"),
            base_dir: None,
            extra_args: Vec::new(),
        }
    }
}

impl VegaCliOpts {
    pub fn validate(&self) -> MergeResult<()> {
        if self.program.as_os_str().is_empty() {
            return Err(MergeError::validation("engine program must not be empty"));
        }
        Ok(())
    }
}

/// Rendering engine backed by the system `vg2svg` binary.
///
/// Each render spawns one process: the merged specification is streamed to its stdin and the SVG
/// document is read from its stdout. The raster path rasterizes that SVG onto the surface.
/// The engine keeps no per-invocation state, so one instance serves concurrent callers.
#[derive(Clone, Debug)]
pub struct VegaCliEngine {
    opts: VegaCliOpts,
    rasterizer: SvgRasterizer,
}

impl VegaCliEngine {
    pub fn new(opts: VegaCliOpts, rasterizer: SvgRasterizer) -> MergeResult<Self> {
        opts.validate()?;
        Ok(Self { opts, rasterizer })
    }

    pub fn opts(&self) -> &VegaCliOpts {
        &self.opts
    }

    /// Whether the configured program can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.opts.program)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.opts.program);
        if let Some(base) = &self.opts.base_dir {
            cmd.arg("--base").arg(base);
        }
        cmd.args(&self.opts.extra_args);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl RenderEngine for VegaCliEngine {
    type View = VegaCliView;

    fn parse(&self, spec: &Specification) -> MergeResult<Self::View> {
        let spec_json = serde_json::to_vec(spec)
            .map_err(|e| MergeError::render(format!("serialize merged spec: {e}")))?;
        Ok(VegaCliView {
            command: self.command(),
            program: self.opts.program.display().to_string(),
            rasterizer: self.rasterizer.clone(),
            spec_json: Some(spec_json),
        })
    }
}

/// One pending `vg2svg` run.
pub struct VegaCliView {
    command: Command,
    program: String,
    rasterizer: SvgRasterizer,
    spec_json: Option<Vec<u8>>,
}

impl VegaCliView {
    fn run(&mut self) -> MergeResult<String> {
        let Some(spec_json) = self.spec_json.as_deref() else {
            return Err(MergeError::render("vega view is already finalized"));
        };

        let mut child = self.command.spawn().map_err(|e| {
            MergeError::render(format!(
                "failed to spawn '{}' (is vega-cli installed and on PATH?): {e}",
                self.program
            ))
        })?;
        tracing::debug!(program = %self.program, pid = child.id(), "spawned vega renderer");

        let Some(mut stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(MergeError::render("failed to open renderer stdin (unexpected)"));
        };

        // stdin is written concurrently with draining stdout/stderr.
        let (write_res, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(spec_json));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output =
            output.map_err(|e| MergeError::render(format!("failed to wait for renderer: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MergeError::render(format!(
                "{} exited with status {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        match write_res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(MergeError::render(format!("write spec to renderer: {e}")));
            }
            Err(_) => return Err(MergeError::render("renderer stdin writer panicked")),
        }

        String::from_utf8(output.stdout)
            .map_err(|e| MergeError::render(format!("renderer produced non-UTF-8 output: {e}")))
    }
}

impl EngineView for VegaCliView {
    fn to_svg(&mut self) -> MergeResult<String> {
        self.run()
    }

    fn to_surface(&mut self, surface: &mut Surface) -> MergeResult<()> {
        let svg = self.run()?;
        self.rasterizer.rasterize(&svg, surface)
    }

    fn finalize(&mut self) {
        if self.spec_json.take().is_some() {
            tracing::trace!(program = %self.program, "vega view finalized");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/vega_cli.rs"]
mod tests;
