use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blossom", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single stage frame as a PNG.
    Frame(FrameArgs),
    /// Render every k-th frame of the stage into a directory of PNGs.
    Sequence(SequenceArgs),
    /// Print per-frame population sizes as JSON lines.
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input stage JSON.
    #[arg(long)]
    config: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Input stage JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output directory (created if missing).
    #[arg(long)]
    out_dir: PathBuf,

    /// Write one frame out of every `every`.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Input stage JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(serde::Serialize)]
struct FrameStats {
    frame: u64,
    petals: usize,
    confetti: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn load_stage(path: &Path) -> anyhow::Result<blossom::Stage> {
    let config = blossom::StageConfig::from_path(path)
        .with_context(|| format!("load stage config '{}'", path.display()))?;
    Ok(blossom::Stage::new(config)?)
}

fn write_png(stage: &blossom::Stage, out: &Path) -> anyhow::Result<()> {
    let mut frame = stage.compose()?;
    frame.unpremultiply();

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut stage = load_stage(&args.config)?;
    let duration = stage.config().duration;
    if args.frame >= duration {
        anyhow::bail!("frame {} is out of range (duration {duration})", args.frame);
    }
    stage.advance_to(blossom::FrameIndex(args.frame))?;
    write_png(&stage, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut stage = load_stage(&args.config)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let duration = stage.config().duration;
    let mut written = 0u64;
    for _ in 0..duration {
        let frame = stage.advance()?;
        if frame.0 % args.every != 0 {
            continue;
        }
        let out = args.out_dir.join(format!("frame_{:05}.png", frame.0));
        write_png(&stage, &out)?;
        written += 1;
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let mut stage = load_stage(&args.config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for _ in 0..stage.config().duration {
        let frame = stage.advance()?;
        let line = FrameStats {
            frame: frame.0,
            petals: stage.petal_count(),
            confetti: stage.confetti_count(),
        };
        serde_json::to_writer(&mut out, &line).context("serialize stats line")?;
        writeln!(out).context("write stats line")?;
    }
    Ok(())
}
