//! Polygon scan conversion into per-scanline spans.
//!
//! Every edge is walked with a DDA along its major axis. For each row the
//! walk records the leftmost and rightmost X reached by *any* edge of the
//! polygon together with the depth (and U/V) at that point. The tables are
//! only meaningful between a [`ScanTables::scan_convert`] call and the fill
//! that consumes it.

use log::trace;

use crate::{
    clip::{ClipPlane, Viewport, clip_polygon},
    error::{Error, Result},
    math::{recip15, scaled_step},
    stream::{Fixed, Vert, VertexLayout, VertexStream, X, Y, Z},
};

/// Sub-pixel bits used while walking an edge.
const SUB_BITS: u32 = 8;
const SUB_HALF: Fixed = 1 << (SUB_BITS - 1);
/// Extra bits depth gets while walking and filling.
pub const DEPTH_BITS: u32 = 8;

/// Per-pixel attributes carried by the scan: depth, U, V.
pub type Attrs = [Fixed; 3];

const EMPTY_LEFT: i32 = 0o77777777;
const EMPTY_RIGHT: i32 = -0o77777777;

/// Rows touched by the last scan, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanRange {
    pub min_y: i32,
    pub max_y: i32,
}

impl ScanRange {
    const NONE: ScanRange = ScanRange {
        min_y: EMPTY_LEFT,
        max_y: EMPTY_RIGHT,
    };

    /// Nothing to fill: the polygon was rejected or collapsed to one row.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_y >= self.max_y
    }

    fn include(&mut self, y: i32) {
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }
}

/// One scanline's bounds and the attributes at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub x_left: i32,
    pub x_right: i32,
    pub left: Attrs,
    pub right: Attrs,
}

/// Left/right bound tables sized for one frame-buffer height.
pub struct ScanTables {
    left_x: Vec<i32>,
    right_x: Vec<i32>,
    left_attr: Vec<Attrs>,
    right_attr: Vec<Attrs>,
    clipped: VertexStream,
}

impl ScanTables {
    pub fn new(height: usize) -> Result<Self> {
        fn table<T: Copy>(len: usize, fill: T) -> Result<Vec<T>> {
            let mut v = Vec::new();
            v.try_reserve_exact(len).map_err(Error::oom("scan tables"))?;
            v.resize(len, fill);
            Ok(v)
        }
        Ok(Self {
            left_x: table(height, EMPTY_LEFT)?,
            right_x: table(height, EMPTY_RIGHT)?,
            left_attr: table(height, [0; 3])?,
            right_attr: table(height, [0; 3])?,
            clipped: VertexStream::new(),
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.left_x.len()
    }

    /// Scan-convert the closed, projected `stream` (`n + 1` entries).
    ///
    /// The polygon is clipped against the viewport in X first and each
    /// surviving edge against it in Y. The returned range is empty when
    /// nothing is left to fill.
    pub fn scan_convert(&mut self, stream: &[Vert], layout: VertexLayout, vp: &Viewport) -> ScanRange {
        self.left_x.fill(EMPTY_LEFT);
        self.right_x.fill(EMPTY_RIGHT);

        let mut range = ScanRange::NONE;
        let attrs = layout.attrs();

        let mut clipped = std::mem::take(&mut self.clipped);
        clip_polygon(ClipPlane::X, vp, layout, stream, &mut clipped);

        for edge in clipped.windows(2) {
            let (mut a, mut b) = (edge[0], edge[1]);
            if ClipPlane::Y.clip_edge(&mut a, &mut b, layout, vp).is_none() {
                continue;
            }
            range.include(a[Y]);
            range.include(b[Y]);

            let dx = b[X] - a[X];
            let dy = b[Y] - a[Y];
            let steps = dx.abs().max(dy.abs());
            if steps <= 0 {
                continue;
            }
            let inv = recip15(steps);

            let mut at: Attrs = [0; 3];
            let mut dt: Attrs = [0; 3];
            at[0] = a[Z] << DEPTH_BITS;
            dt[0] = scaled_step((b[Z] - a[Z]) << DEPTH_BITS, inv);
            for i in 1..attrs {
                at[i] = a[Z + i];
                dt[i] = scaled_step(b[Z + i] - a[Z + i], inv);
            }

            let mut x = (a[X] << SUB_BITS) + SUB_HALF;
            let mut y = (a[Y] << SUB_BITS) + SUB_HALF;
            let sdx = scaled_step(dx << SUB_BITS, inv);
            let sdy = scaled_step(dy << SUB_BITS, inv);

            for _ in 0..=steps {
                let sy = y >> SUB_BITS;
                if (vp.min_y..=vp.max_y).contains(&sy) {
                    let sx = (x >> SUB_BITS).clamp(vp.min_x, vp.max_x);
                    let row = sy as usize;
                    if self.left_x[row] > sx {
                        self.left_x[row] = sx;
                        self.left_attr[row] = at;
                    }
                    if self.right_x[row] < sx {
                        self.right_x[row] = sx;
                        self.right_attr[row] = at;
                    }
                }
                x += sdx;
                y += sdy;
                for (v, d) in at.iter_mut().zip(dt) {
                    *v += d;
                }
            }
        }
        self.clipped = clipped;

        trace!("scan: rows {}..={} ({} edges)", range.min_y, range.max_y, self.clipped.len().saturating_sub(1));
        range
    }

    /// Span recorded for row `y`; `None` if no edge reached it.
    #[inline]
    pub fn span(&self, y: i32) -> Option<Span> {
        let row = usize::try_from(y).ok().filter(|&r| r < self.height())?;
        let (x_left, x_right) = (self.left_x[row], self.right_x[row]);
        (x_right >= x_left).then(|| Span {
            x_left,
            x_right,
            left: self.left_attr[row],
            right: self.right_attr[row],
        })
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
