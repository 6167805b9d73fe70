//! Headless benchmark: renders the demo scene without a window.
//!
//! ```bash
//! cargo run --release --bin bench -- --frames 500
//! ```

use std::time::{Duration, Instant};

use clap::Parser;
use log::info;

use fxraster::{RasterMode, RenderConfig, RenderContext, demo::Scene, raster::MAX_DIM};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    #[arg(long, default_value_t = 320)]
    width: usize,

    #[arg(long, default_value_t = 200)]
    height: usize,

    #[arg(long, default_value_t = 8)]
    fov: u32,

    /// Ignore textures
    #[arg(long)]
    flat: bool,

    #[arg(long, default_value_t = 300)]
    frames: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let mut ctx = RenderContext::new(RenderConfig {
        width: opts.width.min(MAX_DIM),
        height: opts.height.min(MAX_DIM),
        ..Default::default()
    })?;
    let mut scene = Scene::new()?;
    scene.configure(&mut ctx)?;
    ctx.set_fov(opts.fov)?;
    if opts.flat {
        ctx.set_raster_mode(RasterMode::Flat);
    }

    let mut total = Duration::ZERO;
    let mut worst = Duration::ZERO;
    let mut pixels = 0usize;
    for _ in 0..opts.frames {
        scene.tick();
        let t0 = Instant::now();
        let stats = scene.draw(&mut ctx);
        let dt = t0.elapsed();
        total += dt;
        worst = worst.max(dt);
        pixels += stats.pixels;
    }

    let frames = opts.frames.max(1);
    info!(
        "{} frames {}x{}: avg {:.3} ms, worst {:.3} ms, {} px/frame",
        opts.frames,
        ctx.frame().width(),
        ctx.frame().height(),
        total.as_secs_f64() * 1000.0 / frames as f64,
        worst.as_secs_f64() * 1000.0,
        pixels / frames as usize
    );
    Ok(())
}
