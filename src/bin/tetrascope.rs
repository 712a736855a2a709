use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tetrascope::{
    ComposeOptions, Compositor, FrameSink, OccupancyGrid, PieceGrid, RawStreamSink,
    SequenceOptions, Sequencer, grid,
    solver::{self, DriveOptions},
};

#[derive(Parser, Debug)]
#[command(name = "tetrascope", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a solved frame sequence in a preview window or as a raw stream.
    Play(PlayArgs),
    /// Render a single solved frame to a PNG.
    Frame(FrameArgs),
    /// Run an external solver over every unsolved frame in a directory.
    Drive(DriveArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Working directory holding `{i:04}.npz` / `{i:04}_out.npz` files.
    dir: PathBuf,

    /// Start from frame #n.
    #[arg(short, long, default_value_t = 0)]
    from: u64,

    /// Block size in pixels.
    #[arg(short, long, default_value_t = 24)]
    scale: u32,

    /// Stroke width in pixels.
    #[arg(short = 'w', long, default_value_t = 2)]
    stroke_width: u32,

    /// Paint unfilled blocks.
    #[arg(short, long)]
    unfilled: bool,

    /// Show the frame index on every frame.
    #[arg(short, long)]
    info: bool,

    /// Emit raw bgr24 video to stdout instead of opening a preview window.
    #[arg(short, long)]
    output: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Working directory holding `{i:04}.npz` / `{i:04}_out.npz` files.
    dir: PathBuf,

    /// Frame index to render.
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Block size in pixels.
    #[arg(short, long, default_value_t = 24)]
    scale: u32,

    /// Stroke width in pixels.
    #[arg(short = 'w', long, default_value_t = 2)]
    stroke_width: u32,

    /// Paint unfilled blocks.
    #[arg(short, long)]
    unfilled: bool,
}

#[derive(Parser, Debug)]
struct DriveArgs {
    /// Working directory holding `{i:04}.npz` files.
    dir: PathBuf,

    /// Solver executable, invoked as `solver <in> [<prev_out>] -o <out>`.
    #[arg(long)]
    solver: PathBuf,

    /// Start from frame #n.
    #[arg(short, long, default_value_t = 0)]
    from: u64,
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout stays reserved for raw frame bytes.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Drive(args) => cmd_drive(args),
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let compositor = Compositor::new(ComposeOptions {
        scale: args.scale,
        stroke_width: args.stroke_width,
        paint_unfilled: args.unfilled,
    })?;
    let sequencer = Sequencer::new(
        &args.dir,
        SequenceOptions {
            start: args.from,
            show_info: args.info,
        },
        compositor,
    );
    let mut sink = make_sink(args.output)?;
    sequencer.run(sink.as_mut())?;
    Ok(())
}

fn make_sink(raw_stream: bool) -> anyhow::Result<Box<dyn FrameSink>> {
    if raw_stream {
        return Ok(Box::new(RawStreamSink::stdout()));
    }
    preview_sink()
}

#[cfg(feature = "preview")]
fn preview_sink() -> anyhow::Result<Box<dyn FrameSink>> {
    Ok(Box::new(tetrascope::preview::PreviewSink::new()))
}

#[cfg(not(feature = "preview"))]
fn preview_sink() -> anyhow::Result<Box<dyn FrameSink>> {
    anyhow::bail!("this build has no preview window support; use --output to stream raw video")
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let compositor = Compositor::new(ComposeOptions {
        scale: args.scale,
        stroke_width: args.stroke_width,
        paint_unfilled: args.unfilled,
    })?;

    let pieces = PieceGrid::load(&grid::piece_path(&args.dir, args.frame))?;
    let occupancy = if args.unfilled {
        Some(OccupancyGrid::load(&grid::occupancy_path(
            &args.dir, args.frame,
        ))?)
    } else {
        None
    };
    let frame = compositor.composite(&pieces, occupancy.as_ref(), None);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.to_rgb_bytes(),
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_drive(args: DriveArgs) -> anyhow::Result<()> {
    solver::drive(
        &args.dir,
        &DriveOptions {
            solver: args.solver,
            start: args.from,
        },
    )?;
    Ok(())
}
