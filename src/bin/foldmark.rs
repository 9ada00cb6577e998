use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use foldmark::{
    CpuGlyphSurface, CpuShapeCanvas, CpuShapeCanvasOpts, FitSolver, FoldmarkConfig, FontSpec,
    GlyphSurface, LoopAnimator, ManualScheduler, Rasterizer, RenderOutcome,
    ResponsiveTextRenderer, ShapeMorphEngine, StaticTextHost, Wakeup,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "foldmark", version)]
struct Cli {
    /// JSON configuration file; missing fields take defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print text as ASCII art.
    Ascii(AsciiArgs),
    /// Render frames of the animated mark as PNGs.
    Mark(MarkArgs),
    /// Print the three shape states at one point of the loop as JSON.
    State(StateArgs),
}

#[derive(Args, Debug)]
struct AsciiArgs {
    /// Text to render.
    #[arg(long, default_value = foldmark::DEFAULT_TEXT)]
    text: String,

    /// Render at this font size in pixels.
    #[arg(long, conflicts_with = "width")]
    size: Option<f64>,

    /// Fit the art to a container this many pixels wide.
    #[arg(long)]
    width: Option<f64>,

    /// Font file (defaults to $FOLDMARK_FONT).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct MarkArgs {
    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames, spread evenly over one loop.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Logical canvas size in pixels.
    #[arg(long)]
    size: Option<f64>,

    /// Device pixel ratio.
    #[arg(long)]
    dpr: Option<f64>,
}

#[derive(Args, Debug)]
struct StateArgs {
    /// Loop progress in [0, 1).
    #[arg(long)]
    p: f64,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => FoldmarkConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => FoldmarkConfig::default(),
    };
    match cli.cmd {
        Command::Ascii(args) => cmd_ascii(&cfg, args),
        Command::Mark(args) => cmd_mark(&cfg, args),
        Command::State(args) => cmd_state(&cfg, args),
    }
}

fn cmd_ascii(cfg: &FoldmarkConfig, args: AsciiArgs) -> anyhow::Result<()> {
    let font = args
        .font
        .or_else(foldmark::font_path_from_env)
        .with_context(|| format!("no font given: pass --font or set {}", foldmark::FONT_ENV))?;
    let mut surface = CpuGlyphSurface::from_font_path(&font)
        .with_context(|| format!("load font '{}'", font.display()))?;
    let rasterizer = Rasterizer::new(cfg.ascii.clone())?;

    let Some(width) = args.width else {
        let size = args.size.unwrap_or(cfg.fit.reference_size);
        let art = rasterizer.rasterize(&mut surface, &args.text, size)?;
        println!("{art}");
        return Ok(());
    };

    // terminal cells are treated as probe-width characters at the reference size
    surface.set_font(&FontSpec::bold_monospace(cfg.fit.reference_size))?;
    let char_width = surface.measure_text(&cfg.fit.char_probe)?;
    let mut host = StaticTextHost::new(width, char_width);
    let solver = FitSolver::new(cfg.fit.clone(), rasterizer)?;
    let mut renderer = ResponsiveTextRenderer::with_solver(surface, args.text, solver);

    match renderer.render_now(&mut host)? {
        RenderOutcome::Rendered { font_size, .. } => {
            tracing::info!(font_size, char_width, "fitted ascii art");
            println!("{}", host.text().unwrap_or_default());
        }
        RenderOutcome::Skipped(reason) => {
            anyhow::bail!("nothing rendered: {reason:?} (width {width}, char width {char_width})");
        }
    }
    Ok(())
}

fn cmd_mark(cfg: &FoldmarkConfig, args: MarkArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frames > 0, "--frames must be at least 1");
    let mut mark = cfg.mark.clone();
    if let Some(size) = args.size {
        mark.size = size;
    }
    if let Some(dpr) = args.dpr {
        mark.device_pixel_ratio = dpr;
    }

    let canvas = CpuShapeCanvas::new(CpuShapeCanvasOpts {
        size: mark.size,
        device_pixel_ratio: mark.device_pixel_ratio,
        background: mark.background,
    })?;
    let mut anim = LoopAnimator::from_config(&mark, canvas)?;
    let interval = mark.period_ms / f64::from(args.frames);
    let mut sched = ManualScheduler::with_interval(interval, 0.0)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    anim.start(&mut sched);
    let mut written = 0u32;
    while written < args.frames {
        let Some(wakeup) = sched.next_due(f64::INFINITY) else {
            anyhow::bail!("frame loop ended after {written} frames");
        };
        let Wakeup::Frame {
            handle,
            timestamp_ms,
        } = wakeup
        else {
            continue;
        };
        if !anim.on_frame(handle, timestamp_ms, &mut sched)? {
            continue;
        }
        let path = args.out.join(format!("frame_{written:04}.png"));
        write_png(&path, anim.canvas_mut())?;
        written += 1;
    }
    anim.stop(&mut sched);

    eprintln!("wrote {written} frames to {}", args.out.display());
    Ok(())
}

fn write_png(path: &Path, canvas: &mut CpuShapeCanvas) -> anyhow::Result<()> {
    let mut frame = canvas.snapshot();
    frame.unpremultiply();
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_state(cfg: &FoldmarkConfig, args: StateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.p.is_finite(), "--p must be finite");
    let engine = ShapeMorphEngine::new(&cfg.mark)?;
    let states = engine.states(args.p);
    let json = serde_json::to_string_pretty(&states).context("serialize shape states")?;
    println!("{json}");
    Ok(())
}
