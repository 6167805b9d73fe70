//! The demo scene shared by the windowed viewer and the headless bench: a
//! textured box spinning and stretching above a small floor grid.

use crate::{
    builder::{BoxFaces, gen_box, rgb18_to_24},
    error::{Error, Result},
    math::Camera,
    raster::{Texture, TextureBank},
    render::{CullMode, Object, RasterMode, RenderContext, RenderOutcome, RenderStats},
    stream::Fixed,
};

/// Edge of every box in the scene.
const BOX_SIZE: Fixed = 128;
/// Floor tiles per side are `2 * GRID`.
const GRID: Fixed = 1;

const BORDER: u32 = 0o172321;
const STRIPE: u32 = 0o441002;
const CHECK: u32 = 0o656353;
const FLOOR: u32 = 0o233124;
const CUBE: u32 = 0o777775;

fn channels(rgb18: u32) -> (u8, u8, u8) {
    (
        (rgb18 >> 12 & 0o77) as u8,
        (rgb18 >> 6 & 0o77) as u8,
        (rgb18 & 0o77) as u8,
    )
}

pub struct Scene {
    pub bank: TextureBank,
    floor: Object,
    cube: Object,
    rotating: bool,
    stretch_speed: i32,
    stretch: i32,
    stretch_dir: i32,
    spin: i32,
}

impl Scene {
    pub fn new() -> Result<Self> {
        let mut bank = TextureBank::new();
        let checker = Texture::checker(rgb18_to_24(BORDER), rgb18_to_24(CHECK), rgb18_to_24(STRIPE));
        let tex = bank.insert("CHECKER", checker)?;

        let cube = gen_box(BOX_SIZE, BOX_SIZE, BOX_SIZE, BoxFaces::ALL, channels(CUBE), Some(tex))?
            .ok_or(Error::BuilderState("empty cube"))?;
        let floor = gen_box(BOX_SIZE, BOX_SIZE, BOX_SIZE, BoxFaces::TOP, channels(FLOOR), None)?
            .ok_or(Error::BuilderState("empty floor"))?;

        Ok(Self {
            bank,
            floor,
            cube,
            rotating: true,
            stretch_speed: 4,
            stretch: 0,
            stretch_dir: 1,
            spin: 0,
        })
    }

    /// Camera and raster state the scene is meant to be viewed with.
    pub fn configure(&self, ctx: &mut RenderContext) -> Result<()> {
        ctx.set_fov(8)?;
        ctx.set_cull_mode(CullMode::BACK);
        ctx.set_raster_mode(RasterMode::Textured);
        ctx.set_camera(Camera::new([-64, 100, 200], 0, 0));
        Ok(())
    }

    pub fn toggle_rotation(&mut self) {
        self.rotating = !self.rotating;
    }

    pub fn faster(&mut self) {
        if self.stretch_speed < 64 {
            self.stretch_speed <<= 1;
        }
    }

    pub fn slower(&mut self) {
        if self.stretch_speed > 1 {
            self.stretch_speed >>= 1;
        }
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self) {
        self.stretch = (self.stretch + self.stretch_speed * self.stretch_dir).clamp(0, 255);
        if self.stretch == 255 {
            self.stretch_dir = -1;
        } else if self.stretch == 0 {
            self.stretch_dir = 1;
        }
        self.spin -= 4;
    }

    /// Clear the frame and draw the whole scene.
    pub fn draw(&self, ctx: &mut RenderContext) -> RenderStats {
        let mut total = RenderStats::default();
        let mut add = |o: RenderOutcome| {
            if let RenderOutcome::Drawn(s) = o {
                total.culled += s.culled;
                total.facing_rejected += s.facing_rejected;
                total.near_clipped += s.near_clipped;
                total.filled += s.filled;
                total.pixels += s.pixels;
            }
        };

        ctx.clear(0);
        for i in -GRID..GRID {
            for j in -GRID..GRID {
                let m = ctx.matrices();
                m.load_identity();
                m.translate(i * BOX_SIZE, 0, 600 + j * BOX_SIZE);
                add(ctx.render_object(&self.floor, &self.bank));
            }
        }

        let one = 1 << ctx.matrices().precision();
        let m = ctx.matrices();
        m.load_identity();
        m.translate(-64, 100, 500);
        if self.rotating {
            m.rotate_x(self.spin >> 2);
            m.rotate_y(self.spin >> 1);
        }
        m.scale((one * (self.stretch + 128)) >> 8, one, one);
        add(ctx.render_object(&self.cube, &self.bank));
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderConfig;

    #[test]
    fn stretch_ping_pongs() {
        let mut s = Scene::new().unwrap();
        let (mut hit_top, mut hit_bottom) = (false, false);
        for _ in 0..200 {
            s.tick();
            assert!((0..=255).contains(&s.stretch), "stretch {}", s.stretch);
            hit_top |= s.stretch == 255;
            hit_bottom |= hit_top && s.stretch == 0;
        }
        assert!(hit_top && hit_bottom);
    }

    #[test]
    fn stretch_stays_in_range_at_every_speed() {
        for faster in 0..8 {
            let mut s = Scene::new().unwrap();
            for _ in 0..faster {
                s.faster();
            }
            for _ in 0..1000 {
                s.tick();
                assert!((0..=255).contains(&s.stretch), "speed {}: {}", s.stretch_speed, s.stretch);
            }
        }
    }

    #[test]
    fn speed_is_bounded() {
        let mut s = Scene::new().unwrap();
        for _ in 0..10 {
            s.faster();
        }
        assert_eq!(s.stretch_speed, 64);
        for _ in 0..10 {
            s.slower();
        }
        assert_eq!(s.stretch_speed, 1);
    }

    #[test]
    fn scene_draws_something() {
        let scene = Scene::new().unwrap();
        let mut ctx = RenderContext::new(RenderConfig::default()).unwrap();
        scene.configure(&mut ctx).unwrap();
        let stats = scene.draw(&mut ctx);
        assert!(stats.filled > 0);
        assert!(stats.pixels > 0);
        assert!(ctx.frame().color.iter().any(|&c| c != 0));
    }
}
