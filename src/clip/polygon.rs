//! Whole-polygon clipping and the near-plane classification.

use crate::{
    clip::{
        Viewport,
        line::{Axis, NEAR_Z, Replaced, clip_line_axis, clip_line_near},
    },
    stream::{self, Fixed, Vert, VertexLayout, VertexStream},
};

/// Boundary a polygon is clipped against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// Viewport left/right edges.
    X,
    /// Viewport top/bottom edges.
    Y,
    /// View-space near plane.
    Near,
}

impl ClipPlane {
    /// Clip one edge in place; `None` drops the edge.
    pub fn clip_edge(
        self,
        start: &mut Vert,
        end: &mut Vert,
        layout: VertexLayout,
        vp: &Viewport,
    ) -> Option<Replaced> {
        match self {
            ClipPlane::X => clip_line_axis(start, end, layout, vp.min_x, vp.max_x, Axis::X),
            ClipPlane::Y => clip_line_axis(start, end, layout, vp.min_y, vp.max_y, Axis::Y),
            ClipPlane::Near => clip_line_near(start, end, layout),
        }
    }
}

/// Clip the closed stream `src` (`n + 1` entries) into `dst`.
///
/// Each edge contributes nothing when dropped, otherwise its (possibly
/// clipped) start if that was replaced, followed by its (possibly clipped)
/// end. `dst` is closed on return and the new vertex count is returned.
///
/// `dst` is a separate buffer: `src` is never written.
pub fn clip_polygon(
    plane: ClipPlane,
    vp: &Viewport,
    layout: VertexLayout,
    src: &[Vert],
    dst: &mut VertexStream,
) -> usize {
    dst.clear();
    for edge in src.windows(2) {
        let (mut a, mut b) = (edge[0], edge[1]);
        if let Some(r) = plane.clip_edge(&mut a, &mut b, layout, vp) {
            if r.contains(Replaced::START) {
                dst.push(a);
            }
            dst.push(b);
        }
    }
    let n = dst.len();
    stream::close(dst);
    n
}

/// Position of a polygon's depth range relative to the near plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZClass {
    /// Entirely at or beyond the plane.
    InFront,
    /// Straddles the plane; near-clip before projecting.
    Crossing,
    /// Nothing beyond the plane; cull.
    Behind,
}

pub fn classify_near_plane(min_z: Fixed, max_z: Fixed) -> ZClass {
    if max_z <= NEAR_Z {
        ZClass::Behind
    } else if min_z < NEAR_Z {
        ZClass::Crossing
    } else {
        ZClass::InFront
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
