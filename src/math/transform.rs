//! Model → view transform, perspective projection and the facing test.

use crate::{
    clip::Viewport,
    math::{matrix::Mat4, trig::Angle, trig::TrigTable},
    stream::{Fixed, Vert, X, Y, Z},
};

/// Single fixed camera: one translation and two angles.
///
/// Applied after the model matrix on every vertex and never composed into
/// the matrix stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Camera {
    pos: [Fixed; 3],
    pitch: Angle,
    yaw: Angle,
}

impl Camera {
    /// Camera at `pos`, rotated by `pitch` (about X) and `yaw` (about Y).
    pub const fn new(pos: [Fixed; 3], pitch: Angle, yaw: Angle) -> Self {
        Self { pos, pitch, yaw }
    }

    #[inline]
    pub fn pos(&self) -> [Fixed; 3] {
        self.pos
    }

    #[inline]
    pub fn pitch(&self) -> Angle {
        self.pitch
    }

    #[inline]
    pub fn yaw(&self) -> Angle {
        self.yaw
    }
}

/// Transform object-space positions into view space.
///
/// Stage one applies `model` (rotation/scale, then its translation) and
/// moves the origin to the camera; stage two turns by the inverse camera
/// yaw, then the inverse camera pitch. `out` is cleared first.
pub fn transform_vertices(
    model: &Mat4,
    trig: &TrigTable,
    camera: &Camera,
    src: &[[Fixed; 3]],
    out: &mut Vec<[Fixed; 3]>,
) {
    let p = trig.precision();
    let (sx, cx) = trig.sin_cos(camera.pitch.wrapping_neg());
    let (sy, cy) = trig.sin_cos(camera.yaw.wrapping_neg());

    let m = &model.0;
    let tx = m[12] - camera.pos[0];
    let ty = m[13] - camera.pos[1];
    let tz = m[14] - camera.pos[2];

    out.clear();
    out.extend(src.iter().map(|&[x, y, z]| {
        let mut xx = ((x * m[0] + y * m[4] + z * m[8]) >> p) + tx;
        let mut yy = ((x * m[1] + y * m[5] + z * m[9]) >> p) + ty;
        let mut zz = ((x * m[2] + y * m[6] + z * m[10]) >> p) + tz;

        // yaw
        let w = (zz * sy + xx * cy) >> p;
        zz = (zz * cy - xx * sy) >> p;
        xx = w;

        // pitch
        let w = (yy * cx - zz * sx) >> p;
        zz = (yy * sx + zz * cx) >> p;
        yy = w;

        [xx, yy, zz]
    }));
}

/// Furthest a projected vertex may land from the centre, in pixels.
///
/// Clipping works on differences of screen coordinates in `i32`; keeping
/// every coordinate this close leaves all of them representable.
pub const SCREEN_LIMIT: Fixed = 1 << 20;

/// `c * k / 4096`, rounded, saturated to `±SCREEN_LIMIT`.
#[inline]
fn screen_offset(c: Fixed, k: i64) -> Fixed {
    let o = (c as i64).saturating_mul(k).saturating_add(1 << 11) >> 12;
    o.clamp(-(SCREEN_LIMIT as i64), SCREEN_LIMIT as i64) as Fixed
}

/// Perspective-project `src` into screen space.
///
/// Every entry needs `z > 0` (the near clip guarantees `z >= NEAR_Z`).
/// Output X/Y are pixels around the viewport centre with Y flipped and
/// saturated at [`SCREEN_LIMIT`]; output Z is a depth metric where larger
/// means nearer. Slots past Z are copied.
pub fn project(src: &[Vert], dst: &mut Vec<Vert>, fov: u32, vp: &Viewport) {
    let ffac = 1i64 << (fov + 12);
    let shift = fov - 2;
    let (cx, cy) = vp.center();

    dst.clear();
    dst.extend(src.iter().map(|s| {
        debug_assert!(s[Z] > 0, "projecting z = {}", s[Z]);
        let k = ffac / s[Z] as i64;
        let mut d = *s;
        d[X] = cx + screen_offset(s[X], k);
        d[Y] = cy - screen_offset(s[Y], k);
        d[Z] = (k >> shift) as Fixed;
        d
    }));
}

/// Halve all three components together until each fits in 15 bits + sign.
pub fn shorten(v: &mut [i64; 3]) {
    let fits = |c: i64| (-32768..=32767).contains(&c);
    while !v.iter().all(|&c| fits(c)) {
        for c in v.iter_mut() {
            *c >>= 1;
        }
    }
}

/// Orientation of a view-space polygon relative to the eye at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Front,
    Back,
}

impl Facing {
    #[inline]
    pub fn from_sign(sign: i32) -> Self {
        if sign < 0 { Facing::Back } else { Facing::Front }
    }
}

/// Sign (-1, 0, 1) of the winding of `a, b, c` as seen from the origin.
///
/// The normal `b × a` is shortened to 15 bits before it is dotted with `c`.
pub fn signed_facing(a: &Vert, b: &Vert, c: &Vert) -> i32 {
    let (a0, a1, a2) = (a[X] as i64, a[Y] as i64, a[Z] as i64);
    let (b0, b1, b2) = (b[X] as i64, b[Y] as i64, b[Z] as i64);
    let mut n = [a2 * b1 - a1 * b2, a0 * b2 - a2 * b0, a1 * b0 - a0 * b1];
    shorten(&mut n);
    let dot = c[X] as i64 * n[0] + c[Y] as i64 * n[1] + c[Z] as i64 * n[2];
    dot.signum() as i32
}

/*──────────────────────────────── Tests ───────────────────────────────*/
