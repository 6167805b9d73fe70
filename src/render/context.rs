//! The render context: every scratch buffer the pipeline needs, owned in
//! one place, plus the per-object driver.
//!
//! Per polygon the driver runs
//!
//! ```text
//!   load ─▶ classify z ─┬▶ Culled
//!                       ├▶ FacingRejected
//!                       └▶ [near clip] ─▶ project ─▶ scan ─▶ fill ─▶ Filled
//! ```
//!
//! One context renders one object at a time; `&mut self` on every entry
//! point makes that a compile-time fact.

use log::{debug, trace, warn};

use crate::{
    clip::{ClipPlane, Viewport, ZClass, classify_near_plane, clip_polygon},
    error::{Error, Result},
    math::{Camera, DEFAULT_PRECISION, Facing, MAX_PRECISION, MatrixStack, project, signed_facing, transform_vertices},
    raster::{FrameBuffer, Rgb, ScanTables, TEX_LOG, TextureBank, fill_flat, fill_textured},
    render::{CullMode, DEFAULT_FOV, MAX_FOV, MAX_OBJECT_VERTICES, MIN_FOV, Object, Polygon, RasterMode},
    stream::{Fixed, MAX_POLY_VERTS, U, V, Vert, VertexLayout, VertexStream, Z},
};

/// Everything fixed when a context is created, plus the initial values of
/// the per-frame state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Field-of-view shift; larger is narrower.
    pub fov: u32,
    pub raster_mode: RasterMode,
    pub cull_mode: CullMode,
    /// Fractional bits of the fixed-point format.
    pub precision: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 200,
            fov: DEFAULT_FOV,
            raster_mode: RasterMode::Flat,
            cull_mode: CullMode::BACK,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Where one polygon's trip through the pipeline ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolyOutcome {
    /// No part of the polygon lies beyond the near plane.
    Culled,
    /// Facing matched the cull mode.
    FacingRejected,
    /// Projected and handed to a filler; `pixels` may be 0 when the polygon
    /// is off-screen or degenerate.
    Filled { near_clipped: bool, pixels: usize },
}

/// Per-object tally of [`PolyOutcome`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub culled: usize,
    pub facing_rejected: usize,
    pub near_clipped: usize,
    pub filled: usize,
    pub pixels: usize,
}

impl RenderStats {
    fn record(&mut self, outcome: PolyOutcome) {
        match outcome {
            PolyOutcome::Culled => self.culled += 1,
            PolyOutcome::FacingRejected => self.facing_rejected += 1,
            PolyOutcome::Filled { near_clipped, pixels } => {
                self.filled += 1;
                self.near_clipped += near_clipped as usize;
                self.pixels += pixels;
            }
        }
    }
}

/// Result of [`RenderContext::render_object`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The object has more vertices than the view cache holds; nothing was
    /// drawn.
    Skipped { vertices: usize },
    Drawn(RenderStats),
}

pub struct RenderContext {
    fov: u32,
    raster_mode: RasterMode,
    cull_mode: CullMode,
    camera: Camera,
    viewport: Viewport,
    matrices: MatrixStack,
    frame: FrameBuffer,
    scan: ScanTables,

    /* per-object / per-polygon scratch */
    view: Vec<[Fixed; 3]>,
    loaded: VertexStream,
    clipped: VertexStream,
    projected: Vec<Vert>,
}

impl RenderContext {
    pub fn new(config: RenderConfig) -> Result<Self> {
        check_fov(config.fov)?;
        if !(1..=MAX_PRECISION).contains(&config.precision) {
            return Err(Error::InvalidPrecision(config.precision));
        }
        let frame = FrameBuffer::new(config.width, config.height)?;
        let scan = ScanTables::new(config.height)?;

        let mut view = Vec::new();
        view.try_reserve_exact(MAX_OBJECT_VERTICES)
            .map_err(Error::oom("vertex cache"))?;
        let mut projected = Vec::new();
        projected
            .try_reserve_exact(MAX_POLY_VERTS + 2)
            .map_err(Error::oom("vertex cache"))?;

        debug!(
            "render context {}x{} fov {} precision {} {:?} cull {:?}",
            config.width, config.height, config.fov, config.precision, config.raster_mode, config.cull_mode
        );

        Ok(Self {
            fov: config.fov,
            raster_mode: config.raster_mode,
            cull_mode: config.cull_mode,
            camera: Camera::default(),
            viewport: Viewport::full(config.width, config.height),
            matrices: MatrixStack::new(config.precision),
            frame,
            scan,
            view,
            loaded: VertexStream::new(),
            clipped: VertexStream::new(),
            projected,
        })
    }

    /*──────────────────────── per-frame state ────────────────────────*/

    pub fn set_raster_mode(&mut self, mode: RasterMode) {
        self.raster_mode = mode;
    }

    pub fn raster_mode(&self) -> RasterMode {
        self.raster_mode
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    pub fn set_fov(&mut self, fov: u32) -> Result<()> {
        check_fov(fov)?;
        self.fov = fov;
        Ok(())
    }

    pub fn fov(&self) -> u32 {
        self.fov
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Redefine the clip rectangle; see [`Viewport::define`].
    pub fn set_viewport(&mut self, min_x: i32, min_y: i32, max_x: i32, max_y: i32, update_center: bool) {
        self.viewport.define(min_x, min_y, max_x, max_y, update_center);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Model matrix stack.
    pub fn matrices(&mut self) -> &mut MatrixStack {
        &mut self.matrices
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /*──────────────────────────── frames ─────────────────────────────*/

    /// Clear colour to `rgb` and depth to "infinitely far".
    pub fn clear(&mut self, rgb: Rgb) {
        self.frame.clear(rgb);
    }

    /// Loan the finished colour buffer to `submit(pixels, width, height)`.
    pub fn present<F, T>(&self, submit: F) -> T
    where
        F: FnOnce(&[Rgb], usize, usize) -> T,
    {
        submit(&self.frame.color, self.frame.width(), self.frame.height())
    }

    /// Transform `obj` with the current model matrix and camera and draw
    /// every polygon.
    pub fn render_object(&mut self, obj: &Object, bank: &TextureBank) -> RenderOutcome {
        let count = obj.vertices().len();
        if count > MAX_OBJECT_VERTICES {
            warn!("object with {count} vertices skipped (limit {MAX_OBJECT_VERTICES})");
            return RenderOutcome::Skipped { vertices: count };
        }

        transform_vertices(
            self.matrices.top(),
            self.matrices.trig(),
            &self.camera,
            obj.vertices(),
            &mut self.view,
        );

        let mut stats = RenderStats::default();
        for (i, poly) in obj.polygons().iter().enumerate() {
            let outcome = self.render_polygon(poly, bank);
            trace!("poly {i}: {outcome:?}");
            stats.record(outcome);
        }
        debug!(
            "object: {} polys, {} culled, {} facing, {} near-clipped, {} px",
            obj.polygons().len(),
            stats.culled,
            stats.facing_rejected,
            stats.near_clipped,
            stats.pixels
        );
        RenderOutcome::Drawn(stats)
    }

    fn render_polygon(&mut self, poly: &Polygon, bank: &TextureBank) -> PolyOutcome {
        let texture = match self.raster_mode {
            RasterMode::Textured => poly.texture.and_then(|id| bank.texture(id)),
            RasterMode::Flat => None,
        };
        let layout = match texture {
            Some(_) => VertexLayout::Textured,
            None => VertexLayout::Flat,
        };

        // load
        self.loaded.clear();
        let (mut min_z, mut max_z) = (Fixed::MAX, Fixed::MIN);
        for c in poly.corners() {
            let [x, y, z] = self.view[c.index as usize];
            min_z = min_z.min(z);
            max_z = max_z.max(z);
            let mut v: Vert = [x, y, z, 0, 0];
            if layout == VertexLayout::Textured {
                v[U] = c.u << TEX_LOG;
                v[V] = c.v << TEX_LOG;
            }
            self.loaded.push(v);
        }

        let zclass = classify_near_plane(min_z, max_z);
        if zclass == ZClass::Behind {
            return PolyOutcome::Culled;
        }

        // winding in view space, before any clipping moves the corners
        let l = &self.loaded;
        let facing = Facing::from_sign(signed_facing(&l[0], &l[1], &l[2]));
        let facing_bit = match facing {
            Facing::Front => CullMode::FRONT,
            Facing::Back => CullMode::BACK,
        };
        if self.cull_mode.contains(facing_bit) {
            return PolyOutcome::FacingRejected;
        }

        let near_clipped = zclass == ZClass::Crossing;
        let src: &[Vert] = if near_clipped {
            clip_polygon(ClipPlane::Near, &self.viewport, layout, &self.loaded, &mut self.clipped);
            &self.clipped
        } else {
            &self.loaded
        };
        debug_assert!(src.iter().all(|v| v[Z] > 0));

        project(src, &mut self.projected, self.fov, &self.viewport);
        let range = self.scan.scan_convert(&self.projected, layout, &self.viewport);
        let pixels = match texture {
            Some(tex) => fill_textured(&self.scan, range, &mut self.frame, tex),
            None => fill_flat(&self.scan, range, &mut self.frame, poly.color),
        };
        PolyOutcome::Filled { near_clipped, pixels }
    }
}

fn check_fov(fov: u32) -> Result<()> {
    if (MIN_FOV..=MAX_FOV).contains(&fov) {
        Ok(())
    } else {
        Err(Error::InvalidFov(fov))
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
