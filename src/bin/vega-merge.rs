use std::{
    fs::File,
    io::{self, Read as _, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "vega-merge", version)]
#[command(about = "Merge JSON data tables into a Vega spec and render it as SVG or PNG")]
struct Cli {
    /// Vega specification JSON file, or `-` for stdin.
    #[arg(long, default_value = "-")]
    spec: String,

    /// Optional data JSON file: an object mapping table names to row arrays.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output image format.
    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Output path (stdout when omitted).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Configuration JSON file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raster width in pixels (png only).
    #[arg(long)]
    width: Option<u32>,

    /// Raster height in pixels (png only).
    #[arg(long)]
    height: Option<u32>,

    /// Raster scale factor (png only).
    #[arg(long)]
    scale: Option<f32>,

    /// Path to the `vg2svg` renderer.
    #[arg(long)]
    vg2svg: Option<PathBuf>,

    /// Base directory for relative data URLs in the Vega specification.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Png,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = load_config(&cli)?;
    let engine = cfg.build_engine().context("configure renderer")?;

    let spec = read_spec(&cli.spec)?;
    let payload = match &cli.data {
        Some(path) => vega_merge::PayloadInput::from_path(path)?,
        None => vega_merge::PayloadInput::Absent,
    };

    let bytes = match cli.format {
        Format::Svg => {
            let out = vega_merge::render(&engine, spec, payload, vega_merge::RenderContext::svg())
                .context("render vega spec as SVG")?;
            let vega_merge::Rendered::Svg(svg) = out else {
                anyhow::bail!("vector render returned pixels (bug)");
            };
            svg.into_bytes()
        }
        Format::Png => {
            let mut surface = cfg.raster.surface()?;
            let out = vega_merge::render(
                &engine,
                spec,
                payload,
                vega_merge::RenderContext::raster(&mut surface),
            )
            .context("render vega spec as PNG")?;
            let vega_merge::Rendered::Raster(frame) = out else {
                anyhow::bail!("raster render returned SVG (bug)");
            };
            frame.encode_png()?
        }
    };

    write_output(cli.output.as_ref(), &bytes)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<vega_merge::Config> {
    let mut cfg = match &cli.config {
        Some(path) => vega_merge::Config::from_path(path)?,
        None => vega_merge::Config::default(),
    };
    if let Some(w) = cli.width {
        cfg.raster.width = w;
    }
    if let Some(h) = cli.height {
        cfg.raster.height = h;
    }
    if let Some(s) = cli.scale {
        cfg.raster.scale = s;
    }
    if let Some(p) = &cli.vg2svg {
        cfg.engine.program = p.clone();
    }
    if let Some(dir) = &cli.base_dir {
        cfg.engine.base_dir = Some(dir.clone());
    }
    if cli.format == Format::Svg {
        // Fonts only matter when rasterizing.
        cfg.raster.system_fonts = false;
    }
    Ok(cfg)
}

fn read_spec(arg: &str) -> anyhow::Result<vega_merge::SpecInput> {
    match arg {
        "" => anyhow::bail!("missing --spec value"),
        "-" => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("read vega spec from stdin")?;
            Ok(vega_merge::SpecInput::Text(text))
        }
        path => Ok(vega_merge::SpecInput::from_path(path)?),
    }
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let mut f = File::create(path)
                .with_context(|| format!("open output file '{}'", path.display()))?;
            f.write_all(bytes)
                .with_context(|| format!("write '{}'", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote output");
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(bytes).context("write output to stdout")?;
            out.flush().context("flush stdout")?;
        }
    }
    Ok(())
}
