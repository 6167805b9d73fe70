//! Segment clipping against one screen axis or the near plane.
//!
//! Both clippers order the endpoints by the clipped coordinate first, so the
//! interpolation always runs from the lower endpoint towards the higher one
//! no matter how the edge was wound.

use bitflags::bitflags;

use crate::stream::{Fixed, VertexLayout, Vert, Z};

/// View-space depth of the near plane.
pub const NEAR_Z: Fixed = 16;

/// Bits of the edge fraction used for the clipped-axis interpolation.
const FRAC_BITS: u32 = 15;
/// Interpolation precision for the other screen axis.
const HI_P: u32 = 14;
/// Interpolation precision for U/V.
const HH_P: u32 = HI_P >> 1;
/// Interpolation precision for near-plane clipping.
const NEAR_P: u32 = 8;

bitflags! {
    /// Which endpoints of a clipped segment were replaced.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Replaced: u8 {
        const START = 0b01;
        const END   = 0b10;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    #[inline]
    const fn other(self) -> usize {
        match self {
            Axis::X => 1,
            Axis::Y => 0,
        }
    }
}

/// Clip `start → end` to `[min, max]` on `axis`.
///
/// Returns `None` when the segment lies entirely at or below `min` or at or
/// beyond `max` and must be dropped. Otherwise returns which endpoints were
/// overwritten with interpolated copies; the clipped coordinate of a
/// replaced endpoint is exactly `min` or `max`. Endpoints strictly inside
/// are left untouched.
pub fn clip_line_axis(
    start: &mut Vert,
    end: &mut Vert,
    layout: VertexLayout,
    min: Fixed,
    max: Fixed,
    axis: Axis,
) -> Option<Replaced> {
    let c = axis.index();
    let o = axis.other();

    // low/high by the clipped coordinate; ties keep `end` low
    let in_order = start[c] < end[c];
    let (lo, hi) = if in_order { (*start, *end) } else { (*end, *start) };

    if lo[c] >= max || hi[c] <= min {
        return None;
    }

    let (lo_flag, hi_flag) = if in_order {
        (Replaced::START, Replaced::END)
    } else {
        (Replaced::END, Replaced::START)
    };
    let mut out = Replaced::empty();

    if lo[c] < min {
        let v = interpolate_2d(&lo, &hi, layout, min, c, o);
        if in_order { *start = v } else { *end = v }
        out |= lo_flag;
    }
    if hi[c] > max {
        let v = interpolate_2d(&lo, &hi, layout, max, c, o);
        if in_order { *end = v } else { *start = v }
        out |= hi_flag;
    }
    Some(out)
}

/// Point on `lo → hi` where coordinate `c` equals `bound`.
///
/// Depth is interpolated with the full 15-bit fraction; the other screen
/// axis with 14 bits; texture coordinates with 7.
fn interpolate_2d(lo: &Vert, hi: &Vert, layout: VertexLayout, bound: Fixed, c: usize, o: usize) -> Vert {
    let span = (hi[c] - lo[c]) as i64;
    let fhp = (((bound - lo[c]) as i64) << FRAC_BITS) / span;
    let fh = fhp >> (FRAC_BITS - HI_P);
    let f = fh >> HH_P;

    let mut out = *lo;
    for i in Z + 1..layout.stride() {
        out[i] = lo[i] + (f * ((hi[i] - lo[i]) >> HH_P) as i64) as Fixed;
    }
    out[Z] = lo[Z] + ((fhp * (hi[Z] - lo[Z]) as i64) >> FRAC_BITS) as Fixed;
    out[c] = bound;
    out[o] = lo[o] + ((fh * (hi[o] - lo[o]) as i64) >> HI_P) as Fixed;
    out
}

/// Clip `start → end` against the near plane `z = NEAR_Z`.
///
/// Returns `None` when even the deeper endpoint is in front of the plane
/// (nearer than `NEAR_Z`). At most the shallower endpoint is replaced.
pub fn clip_line_near(start: &mut Vert, end: &mut Vert, layout: VertexLayout) -> Option<Replaced> {
    let in_order = start[Z] < end[Z];
    let (lo, hi) = if in_order { (*start, *end) } else { (*end, *start) };

    if hi[Z] < NEAR_Z {
        return None;
    }
    if lo[Z] >= NEAR_Z {
        return Some(Replaced::empty());
    }

    let f = (((NEAR_Z - lo[Z]) as i64) << NEAR_P) / (hi[Z] - lo[Z]) as i64;
    let mut m = lo;
    for i in (0..layout.stride()).filter(|&i| i != Z) {
        m[i] = lo[i] + ((f * (hi[i] - lo[i]) as i64) >> NEAR_P) as Fixed;
    }
    m[Z] = NEAR_Z;

    if in_order {
        *start = m;
        Some(Replaced::START)
    } else {
        *end = m;
        Some(Replaced::END)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
