mod executor;
mod output;
mod progress;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use executor::Executor;
use output::{FileOutput, FinalOutput};
use raycast::{
    camera::Dimensions,
    loader,
    renderer::{ExecutionMode, RendererBuilder},
    utils::timer::timed_scope_log,
};

#[derive(Parser, Debug)]
#[command(version, about = "Render a JSON scene description with a recursive ray tracer")]
pub struct Args {
    /// Width of the image, in pixel
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Height of the image, in pixel
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Scene description file
    input: PathBuf,

    /// Output image. The format follows the extension: ppm/pnm, exr, or any
    /// other format `image` can write (png, jpg, bmp, ...)
    output: PathBuf,

    /// Number of reflection/refraction bounces
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// Specular exponent
    #[arg(long, default_value_t = 20.0)]
    shininess: f32,

    #[arg(short, long, default_value_t)]
    execution_mode: ExecutionMode,

    /// Size of the worker pool, defaults to one thread per core
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !(args.shininess.is_finite() && args.shininess >= 0.0) {
        anyhow::bail!("shininess must be a non negative number, got {}", args.shininess);
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to build the worker pool")?;
    }

    log::info!("loading scene");
    let scene = timed_scope_log("load scene", || loader::load_scene(&args.input))
        .res
        .with_context(|| format!("failed to load scene {:?}", args.input))?;

    let renderer = RendererBuilder::default()
        .dimensions(Dimensions::new(args.width, args.height))
        .max_depth(args.depth)
        .shininess(args.shininess)
        .execution_mode(args.execution_mode)
        .build();

    let output = Executor::new(renderer).run(&scene);
    output.stats.report();

    FileOutput::new(args.output).commit(&output)?;

    Ok(())
}
