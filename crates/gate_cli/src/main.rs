use anyhow::{Context, Result};
use clap::Parser;
use gate_renderer::{Camera, ImageBuffer, Point3, Vec3};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::Path;
use std::time::Instant;

mod cli;
mod demo;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    info!("Gate path tracer v{}", env!("CARGO_PKG_VERSION"));

    let start = Instant::now();
    let mut scene_rng = StdRng::seed_from_u64(args.scene_seed);
    let scene = demo::build_scene(&mut scene_rng)?;
    info!("Scene built in {:?} ({} objects)", start.elapsed(), scene.len());

    let mut camera = Camera::new()
        .with_image(args.width, args.aspect_ratio)
        .with_quality(args.samples_per_pixel, args.max_depth)
        .with_position(
            Point3::new(0.0, 3.0, -15.0), // look_from
            Point3::new(0.0, 0.0, 1.0),   // look_at
            Vec3::new(0.0, 1.0, 0.0),     // vup
        )
        .with_lens(args.vfov, args.defocus_angle, args.focus_dist)
        .with_threads(args.threads)
        .with_seed(args.seed);
    camera.initialize();

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(u64::from(camera.image_height()))
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {msg} ETA: {eta}")
            .context("invalid progress template")?,
    );

    let height = camera.image_height();
    let image = camera.render_with_progress(&scene, |remaining| {
        progress.set_position(u64::from(height - remaining));
        progress.set_message(format!("Scanlines remaining: {remaining}"));
    })?;
    progress.finish_with_message("Done.");

    write_image(&image, &args.output)?;
    Ok(())
}

fn write_image(image: &ImageBuffer, output: &str) -> Result<()> {
    if output == "-" {
        return image
            .write_ppm(io::stdout().lock())
            .context("failed to write image to stdout");
    }

    let path = Path::new(output);
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    let saved = if is_png {
        image.save_png(path)
    } else {
        image.save_ppm(path)
    };
    saved.with_context(|| format!("failed to save {}", path.display()))?;

    info!("Saved to {}", path.display());
    Ok(())
}
