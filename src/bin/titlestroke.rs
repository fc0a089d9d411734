use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use titlestroke::{
    AnimationContext, AnimationDriver, CpuSurface, Ease, FfmpegSink, FontSource, Fps, FrameClock,
    OutlineDump, PngSequenceSink, TitleConfig,
};

#[derive(Parser, Debug)]
#[command(name = "titlestroke", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame at one output timestamp as a PNG.
    Frame(FrameArgs),
    /// Render the whole animation as numbered PNG files.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print canvas size and per-glyph step tables as JSON.
    Inspect(SourceArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Title config JSON; defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file path or http(s) URL (overrides the config).
    #[arg(long)]
    font: Option<String>,

    /// Pre-extracted outline JSON instead of a font.
    #[arg(long, conflicts_with = "font")]
    outlines: Option<PathBuf>,

    /// Title text.
    #[arg(long)]
    text: Option<String>,

    /// Font size in pixels.
    #[arg(long)]
    font_size: Option<f64>,

    /// Stroke width in pixels.
    #[arg(long)]
    stroke_width: Option<f64>,

    /// Exponent of the ease-out curve.
    #[arg(long)]
    easing_exponent: Option<f64>,

    /// Output frames per second.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output timestamp in seconds (the startup delay counts).
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output duration in seconds; defaults to the animation length plus the hold time.
    #[arg(long)]
    duration: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Output duration in seconds; defaults to the animation length plus the hold time.
    #[arg(long)]
    duration: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn load_config(args: &SourceArgs) -> anyhow::Result<TitleConfig> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => TitleConfig::from_path(path)?,
        None => TitleConfig::default(),
    };
    if let Some(font) = args.font.as_deref() {
        cfg.font = FontSource::parse(font);
    }
    if let Some(text) = args.text.clone() {
        cfg.text = text;
    }
    if let Some(v) = args.font_size {
        cfg.font_size = v;
    }
    if let Some(v) = args.stroke_width {
        cfg.stroke_width = v;
    }
    if let Some(exponent) = args.easing_exponent {
        cfg.easing = Ease::OutPow { exponent };
    }
    if let Some(fps) = args.fps {
        cfg.fps = Fps::new(fps, 1)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn make_driver(args: &SourceArgs) -> anyhow::Result<(AnimationDriver, TitleConfig)> {
    let cfg = load_config(args)?;
    let driver = match args.outlines.as_deref() {
        Some(path) => {
            let dump = OutlineDump::from_path(path)?;
            let outlines = dump
                .to_outlines()
                .with_context(|| format!("validate outlines in '{}'", path.display()))?;
            AnimationDriver::new(AnimationContext::from_outlines(outlines, dump.canvas, &cfg)?)
        }
        None => AnimationDriver::bootstrap(&cfg.font, &cfg)
            .with_context(|| format!("load font '{}'", cfg.font))?,
    };
    Ok((driver, cfg))
}

fn make_surface(ctx: &AnimationContext) -> anyhow::Result<CpuSurface> {
    Ok(CpuSurface::new(ctx.canvas(), ctx.background())?)
}

fn clock_for(cfg: &TitleConfig, ctx: &AnimationContext, duration: Option<f64>) -> FrameClock {
    let secs = duration.unwrap_or_else(|| ctx.total_duration(cfg.hold));
    FrameClock::for_duration(ctx.fps(), secs)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (driver, _cfg) = make_driver(&args.source)?;
    let mut surface = make_surface(driver.context())?;
    let frame = driver.render_at(args.at, &mut surface)?;
    titlestroke::write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (mut driver, cfg) = make_driver(&args.source)?;
    let mut surface = make_surface(driver.context())?;
    let clock = clock_for(&cfg, driver.context(), args.duration);
    let mut sink = PngSequenceSink::new(&args.out_dir, "frame_");
    let stats = driver.render_range(clock, &mut surface, &mut sink)?;
    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (driver, cfg) = make_driver(&args.source)?;
    let mut ctx = driver.context().clone();
    ctx.pad_to_even();
    let mut driver = AnimationDriver::new(ctx);
    let mut surface = make_surface(driver.context())?;
    let clock = clock_for(&cfg, driver.context(), args.duration);

    let mut sink = FfmpegSink::from_config(&args.out, &cfg);
    let stats = driver.render_range(clock, &mut surface, &mut sink)?;
    eprintln!("wrote {} frames to {}", stats.frames, args.out.display());
    Ok(())
}

#[derive(serde::Serialize)]
struct Inspection<'a> {
    canvas: titlestroke::Canvas,
    completion_time: f64,
    glyphs: &'a [titlestroke::StepTable],
}

fn cmd_inspect(args: SourceArgs) -> anyhow::Result<()> {
    let (driver, _cfg) = make_driver(&args)?;
    let ctx = driver.context();
    let report = Inspection {
        canvas: ctx.canvas(),
        completion_time: ctx.completion_time(),
        glyphs: ctx.step_tables(),
    };
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &report).context("write inspection JSON")?;
    println!();
    Ok(())
}
