use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::scenes::{random_scene, reference_camera_settings, DEFAULT_GRID_EXTENT};
use ember_renderer::{render_parallel, render_with_progress, RenderConfig};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

mod cli;
mod output;

use cli::Args;

const ASPECT_RATIO: f64 = 16.0 / 9.0;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    // Fail on an unusable path before spending time rendering
    let format = output::output_format(&args.output)?;

    let config = RenderConfig::from_aspect(args.width, ASPECT_RATIO).with_quality(args.samples, args.max_depth);
    config.validate().context("invalid render settings")?;

    let camera = reference_camera_settings()
        .with_aspect_ratio(ASPECT_RATIO as f32)
        .build()
        .context("invalid camera settings")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Random seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let world = random_scene(DEFAULT_GRID_EXTENT, &mut rng);
    info!("Scene has {} objects", world.len());
    info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width, config.image_height, config.samples_per_pixel, config.max_depth
    );

    let start = Instant::now();
    let image = if args.parallel {
        info!("Using {} threads", rayon::current_num_threads());
        let buckets = ember_renderer::generate_buckets(
            config.image_width,
            config.image_height,
            ember_renderer::DEFAULT_BUCKET_SIZE,
        );
        let pb = progress_bar(buckets.len() as u64, "buckets")?;
        let image = render_parallel(&camera, &world, &config, seed, |_| pb.inc(1));
        pb.finish();
        image
    } else {
        let pb = progress_bar(u64::from(config.image_height), "rows")?;
        let image = render_with_progress(&camera, &world, &config, &mut rng, |_| pb.inc(1));
        pb.finish();
        image
    };
    info!("Rendered in {:.2?}", start.elapsed());

    output::save_image(&image, &args.output, format)?;
    info!("Image saved as {}", args.output.display());

    Ok(())
}

fn progress_bar(len: u64, unit: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(ProgressStyle::default_bar().template(&format!("[{{bar:50}}] {{pos}}/{{len}} {unit} ETA: {{eta}}"))?);
    Ok(pb)
}
