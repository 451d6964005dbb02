use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "overlay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one image over another and write a PNG.
    Composite(CompositeArgs),
    /// Run a composite described by a JSON job file.
    Job(JobArgs),
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Background image (any format the `image` crate decodes).
    #[arg(long)]
    bg: PathBuf,

    /// Foreground image.
    #[arg(long)]
    fg: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Foreground alpha multiplier; <= 0 leaves the background unchanged.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    opacity: f64,

    /// Foreground left edge in background pixels.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    x: i64,

    /// Foreground top edge in background pixels.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    y: i64,

    #[command(flatten)]
    threading: ThreadingArgs,
}

#[derive(Parser, Debug)]
struct JobArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    threading: ThreadingArgs,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Split rows across worker threads.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

impl ThreadingArgs {
    fn opts(&self) -> overlay::CompositeOpts {
        overlay::CompositeOpts {
            parallel: self.parallel,
            threads: self.threads,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Composite(args) => cmd_composite(args),
        Command::Job(args) => cmd_job(args),
    }
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let job = overlay::CompositeJob {
        background: args.bg,
        foreground: args.fg,
        out: args.out,
        opacity: args.opacity,
        placement: overlay::Placement::new(args.x, args.y),
    };
    job.validate()?;
    run(&job, &args.threading.opts())
}

fn cmd_job(args: JobArgs) -> anyhow::Result<()> {
    let job = overlay::CompositeJob::from_path(&args.in_path)?;
    run(&job, &args.threading.opts())
}

fn run(job: &overlay::CompositeJob, opts: &overlay::CompositeOpts) -> anyhow::Result<()> {
    let mut bg = load_rgba8(&job.background)?;
    let fg = load_rgba8(&job.foreground)?;

    let stats =
        overlay::composite_with_opts(Some(&mut bg), Some(&fg), job.opacity, job.placement, opts)?;

    if let Some(parent) = job.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let (width, height) = (bg.width(), bg.height());
    image::save_buffer_with_format(
        &job.out,
        &bg.into_data(),
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", job.out.display()))?;

    eprintln!(
        "wrote {} ({} pixels blended, {} cleared)",
        job.out.display(),
        stats.pixels_blended,
        stats.pixels_cleared
    );
    Ok(())
}

fn load_rgba8(path: &Path) -> anyhow::Result<overlay::RasterRgba8> {
    let rgba = image::open(path)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    let raster = overlay::RasterRgba8::new(width, height, rgba.into_raw())
        .with_context(|| format!("load raster '{}'", path.display()))?;
    Ok(raster)
}
