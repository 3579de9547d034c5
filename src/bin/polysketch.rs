use std::io::{BufReader, Cursor};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use polysketch::{
    CircleScene, ClockHandle, CpuCanvas, DiscardSink, FfmpegSink, FfmpegSinkOpts, Fps,
    FrameIndex, FrameSink, PngSequenceSink, Scene, SceneEngine, SceneKind, SessionOpts,
    SketchConfig, TinkerbellScene,
};

#[derive(Parser, Debug)]
#[command(name = "polysketch", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a live session, optionally recording frames.
    Run(RunArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene to run. Overrides the scene named in `--config`.
    #[arg(long, value_enum)]
    scene: Option<SceneKind>,

    /// Session configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Key script, e.g. "w w f sleep:500 S quit".
    #[arg(long)]
    keys: Option<String>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Pace frames to the wall clock.
    #[arg(long, conflicts_with = "unthrottled")]
    realtime: bool,

    /// Render frames back to back without pacing.
    #[arg(long)]
    unthrottled: bool,

    /// Read key tokens from stdin while the session runs.
    #[arg(long)]
    stdin: bool,

    /// Frames between status log lines (0 disables).
    #[arg(long)]
    status_every: Option<u64>,

    /// Write every frame as `frame_NNNNNN.png` into this directory.
    #[arg(long, conflicts_with = "mp4")]
    out_dir: Option<PathBuf>,

    /// Record the session to an MP4 (requires `ffmpeg` on PATH).
    #[arg(long)]
    mp4: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,polysketch=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn load_config(args: &SceneArgs) -> anyhow::Result<SketchConfig> {
    let mut cfg = match (&args.config, args.scene) {
        (Some(path), scene) => {
            let mut cfg = SketchConfig::from_path(path)?;
            if let Some(scene) = scene {
                cfg.scene = scene;
            }
            cfg
        }
        (None, Some(scene)) => SketchConfig::for_scene(scene),
        (None, None) => anyhow::bail!("either --scene or --config is required"),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    Ok(cfg)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.scene)?;
    if args.frames.is_some() {
        cfg.frames = args.frames;
    }
    if let Some(fps) = args.fps {
        cfg.fps = Fps::per_second(fps)?;
    }
    if args.realtime {
        cfg.realtime = true;
    }
    if args.unthrottled {
        cfg.realtime = false;
    }
    if let Some(n) = args.status_every {
        cfg.status_every = n;
    }
    cfg.validate()?;

    let mut sink: Box<dyn FrameSink> = match (&args.out_dir, &args.mp4) {
        (Some(dir), _) => Box::new(PngSequenceSink::new(dir)),
        (None, Some(mp4)) => Box::new(FfmpegSink::new(FfmpegSinkOpts {
            bg_rgba: cfg.clear_rgba,
            ..FfmpegSinkOpts::new(mp4)
        })),
        (None, None) => Box::new(DiscardSink::new()),
    };
    if cfg.frames.is_none() && !args.stdin && !script_quits(args.scene.keys.as_deref()) {
        tracing::warn!("no frame limit and no quit source; the session runs until killed");
    }

    match cfg.scene {
        SceneKind::Circle => run_live(CircleScene, &cfg, &args, sink.as_mut()),
        SceneKind::Tinkerbell => {
            run_live(TinkerbellScene::default(), &cfg, &args, sink.as_mut())
        }
    }
}

fn script_quits(keys: Option<&str>) -> bool {
    keys.is_some_and(|k| {
        k.split(|c: char| c.is_whitespace() || c == ',')
            .any(|t| t.eq_ignore_ascii_case("quit") || t.eq_ignore_ascii_case("exit"))
    })
}

fn run_live<S: Scene + 'static>(
    scene: S,
    cfg: &SketchConfig,
    args: &RunArgs,
    sink: &mut dyn FrameSink,
) -> anyhow::Result<()> {
    let engine = SceneEngine::new(scene);
    let mut canvas = CpuCanvas::new(cfg.canvas_size()?, cfg.canvas_opts())?;
    let stop = ClockHandle::default();

    let script = args.scene.keys.clone().map(|keys| {
        polysketch::spawn_key_reader(
            Cursor::new(keys.into_bytes()),
            engine.input_router(),
            stop.clone(),
        )
    });
    if args.stdin {
        // Detached: a blocked stdin read must not hold up shutdown.
        let _ = polysketch::spawn_key_reader(
            BufReader::new(std::io::stdin()),
            engine.input_router(),
            stop.clone(),
        );
    }

    let report = polysketch::run_session(
        engine,
        &mut canvas,
        sink,
        SessionOpts::from_config(cfg),
        stop.clone(),
    )?;
    stop.stop();

    if let Some(handle) = script {
        let input = handle
            .join()
            .map_err(|_| anyhow::anyhow!("key script thread panicked"))??;
        tracing::debug!(
            keys = input.keys,
            routed = input.routed,
            rejected = input.rejected,
            "key script finished"
        );
    }

    eprintln!(
        "rendered {} frames ({} dropped, {} mutations)",
        report.stats.frames_rendered, report.stats.frames_dropped, report.stats.mutations_applied
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    cfg.validate()?;
    match cfg.scene {
        SceneKind::Circle => write_frame(CircleScene, &cfg, &args),
        SceneKind::Tinkerbell => write_frame(TinkerbellScene::default(), &cfg, &args),
    }
}

fn write_frame<S: Scene>(scene: S, cfg: &SketchConfig, args: &FrameArgs) -> anyhow::Result<()> {
    let mut engine = SceneEngine::new(scene);
    if let Some(keys) = &args.scene.keys {
        // Keys land before frame 0, so the frame is deterministic.
        polysketch::read_keys(
            Cursor::new(keys.as_bytes()),
            &engine.input_router(),
            &ClockHandle::default(),
        )?;
    }
    let mut canvas = CpuCanvas::new(cfg.canvas_size()?, cfg.canvas_opts())?;
    let frame = polysketch::render_frame_at(&mut engine, &mut canvas, FrameIndex(args.frame))?;
    for line in engine.status_lines() {
        tracing::info!(frame = args.frame, "{line}");
    }

    polysketch::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
