//! Windowed demo: a textured box spinning above a floor grid.
//!
//! ```bash
//! cargo run --release -- --width 320 --height 200
//! ```
//!
//! Space toggles rotation, A/D change the stretch speed, Esc quits.

use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use log::{error, info};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use fxraster::{
    CullMode, RasterMode, RenderConfig, RenderContext,
    demo::Scene,
    raster::MAX_DIM,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Cull {
    None,
    Front,
    Back,
    Both,
}

impl From<Cull> for CullMode {
    fn from(c: Cull) -> Self {
        match c {
            Cull::None => CullMode::empty(),
            Cull::Front => CullMode::FRONT,
            Cull::Back => CullMode::BACK,
            Cull::Both => CullMode::FRONT | CullMode::BACK,
        }
    }
}

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    #[arg(long, default_value_t = 320)]
    width: usize,

    #[arg(long, default_value_t = 200)]
    height: usize,

    /// Field-of-view shift (8 = widest)
    #[arg(long, default_value_t = 8)]
    fov: u32,

    /// Ignore textures
    #[arg(long)]
    flat: bool,

    #[arg(long, value_enum, default_value_t = Cull::Back)]
    cull: Cull,

    /// Quit after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Window pixel scale
    #[arg(long, default_value_t = 2)]
    scale: u8,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    if let Err(e) = run(&opts) {
        error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

fn run(opts: &Opts) -> anyhow::Result<()> {
    let mut ctx = RenderContext::new(RenderConfig {
        width: opts.width.min(MAX_DIM),
        height: opts.height.min(MAX_DIM),
        ..Default::default()
    })?;
    let mut scene = Scene::new()?;
    scene.configure(&mut ctx)?;
    ctx.set_fov(opts.fov)?;
    ctx.set_cull_mode(opts.cull.into());
    if opts.flat {
        ctx.set_raster_mode(RasterMode::Flat);
    }

    let (w, h) = (ctx.frame().width(), ctx.frame().height());
    let scale = match opts.scale {
        1 => minifb::Scale::X1,
        4 => minifb::Scale::X4,
        _ => minifb::Scale::X2,
    };
    let mut win = Window::new(
        "fxraster",
        w,
        h,
        WindowOptions {
            scale,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(30);
    info!("{w}x{h}, fov {}, cull {:?}, {:?}", ctx.fov(), ctx.cull_mode(), ctx.raster_mode());

    // ─────────── frame timing ───────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0u32;
    let mut last_print = Instant::now();
    let mut frame = 0u64;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        if opts.frames.is_some_and(|n| frame >= n) {
            break;
        }
        if win.is_key_pressed(Key::Space, KeyRepeat::No) {
            scene.toggle_rotation();
        }
        if win.is_key_pressed(Key::A, KeyRepeat::No) {
            scene.faster();
        }
        if win.is_key_pressed(Key::D, KeyRepeat::No) {
            scene.slower();
        }
        scene.tick();

        let t0 = Instant::now();
        scene.draw(&mut ctx);
        acc_time += t0.elapsed();
        acc_frames += 1;
        frame += 1;

        ctx.present(|fb, w, h| win.update_with_buffer(fb, w, h))?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg render: {avg_ms:.2} ms");
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
