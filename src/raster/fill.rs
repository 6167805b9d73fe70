//! Span fillers: walk the rows of a [`ScanRange`] and write every pixel
//! whose interpolated depth beats the depth buffer.
//!
//! Depth is "larger is nearer" and the test is strict, so a fragment at
//! exactly the stored depth never overwrites it.

use crate::{
    math::{recip15, scaled_step},
    raster::{
        FrameBuffer, Rgb,
        scan::{ScanRange, ScanTables, Span},
        texture::Texture,
    },
};

/// Per-pixel increments for one span.
struct Walk {
    base: usize,
    len: usize,
    inv: i32,
}

impl Walk {
    fn new(fb: &FrameBuffer, y: i32, span: &Span) -> Self {
        let len = span.x_right - span.x_left;
        Self {
            base: y as usize * fb.width() + span.x_left as usize,
            len: len as usize,
            inv: recip15(len),
        }
    }

    #[inline]
    fn step(&self, span: &Span, i: usize) -> i32 {
        scaled_step(span.right[i] - span.left[i], self.inv)
    }
}

/// Fill the scanned polygon with one colour; returns pixels written.
pub fn fill_flat(scan: &ScanTables, range: ScanRange, fb: &mut FrameBuffer, rgb: Rgb) -> usize {
    if range.is_empty() {
        return 0;
    }
    let mut written = 0;
    for y in range.min_y..=range.max_y {
        let Some(span) = scan.span(y) else { continue };
        let w = Walk::new(fb, y, &span);
        let dz = w.step(&span, 0);
        let mut z = span.left[0];

        let (depth, color) = (&mut fb.depth[w.base..=w.base + w.len], &mut fb.color[w.base..=w.base + w.len]);
        for (d, c) in depth.iter_mut().zip(color.iter_mut()) {
            if *d < z {
                *d = z;
                *c = rgb;
                written += 1;
            }
            z += dz;
        }
    }
    written
}

/// Fill the scanned polygon with affine-mapped, wrapped, unfiltered texels;
/// returns pixels written.
pub fn fill_textured(scan: &ScanTables, range: ScanRange, fb: &mut FrameBuffer, tex: &Texture) -> usize {
    if range.is_empty() {
        return 0;
    }
    let mut written = 0;
    for y in range.min_y..=range.max_y {
        let Some(span) = scan.span(y) else { continue };
        let w = Walk::new(fb, y, &span);
        let (dz, du, dv) = (w.step(&span, 0), w.step(&span, 1), w.step(&span, 2));
        let [mut z, mut u, mut v] = span.left;

        let (depth, color) = (&mut fb.depth[w.base..=w.base + w.len], &mut fb.color[w.base..=w.base + w.len]);
        for (d, c) in depth.iter_mut().zip(color.iter_mut()) {
            if *d < z {
                *d = z;
                *c = tex.sample(u, v);
                written += 1;
            }
            z += dz;
            u += du;
            v += dv;
        }
    }
    written
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clip::Viewport,
        raster::texture::{TEX_DIM, TEX_LOG},
        stream::{self, Vert, VertexLayout, VertexStream},
    };

    fn closed(vs: &[Vert]) -> VertexStream {
        let mut s: VertexStream = vs.iter().copied().collect();
        stream::close(&mut s);
        s
    }

    struct Rig {
        vp: Viewport,
        scan: ScanTables,
        fb: FrameBuffer,
    }

    impl Rig {
        fn new(w: usize, h: usize) -> Self {
            Self {
                vp: Viewport::full(w, h),
                scan: ScanTables::new(h).unwrap(),
                fb: FrameBuffer::new(w, h).unwrap(),
            }
        }

        fn flat(&mut self, poly: &[Vert], rgb: Rgb) -> usize {
            let r = self.scan.scan_convert(&closed(poly), VertexLayout::Flat, &self.vp);
            fill_flat(&self.scan, r, &mut self.fb, rgb)
        }
    }

    const TRI: [Vert; 3] = [[10, 10, 40, 0, 0], [50, 12, 40, 0, 0], [20, 45, 40, 0, 0]];

    #[test]
    fn flat_fill_writes_colour_and_depth() {
        let mut rig = Rig::new(64, 64);
        let n = rig.flat(&TRI, 0xAA5500);
        assert!(n > 0);
        let painted = rig.fb.color.iter().filter(|&&c| c == 0xAA5500).count();
        assert_eq!(painted, n);
        assert_eq!(rig.fb.pixel(20, 20), 0xAA5500);
        assert_eq!(rig.fb.depth[20 * 64 + 20], 40 << 8);
        assert_eq!(rig.fb.pixel(60, 60), 0);
    }

    #[test]
    fn same_polygon_twice_is_a_no_op() {
        let mut rig = Rig::new(64, 64);
        rig.flat(&TRI, 0x112233);
        let (color, depth) = (rig.fb.color.clone(), rig.fb.depth.clone());
        assert_eq!(rig.flat(&TRI, 0x112233), 0);
        // a different colour at equal depth loses the tie too
        assert_eq!(rig.flat(&TRI, 0xFFFFFF), 0);
        assert_eq!(rig.fb.color, color);
        assert_eq!(rig.fb.depth, depth);
    }

    #[test]
    fn nearer_polygon_wins_farther_loses() {
        let mut rig = Rig::new(64, 64);
        rig.flat(&TRI, 1);
        let near: Vec<Vert> = TRI.iter().map(|v| [v[0], v[1], 80, 0, 0]).collect();
        let far: Vec<Vert> = TRI.iter().map(|v| [v[0], v[1], 20, 0, 0]).collect();
        assert_eq!(rig.flat(&far, 2), 0);
        assert!(rig.flat(&near, 3) > 0);
        assert_eq!(rig.fb.pixel(20, 20), 3);
    }

    #[test]
    fn off_screen_triangle_writes_nothing() {
        let mut rig = Rig::new(320, 200);
        let tri = [[330, 10, 50, 0, 0], [400, 20, 50, 0, 0], [360, 150, 50, 0, 0]];
        assert_eq!(rig.flat(&tri, 0xFFFFFF), 0);
        assert!(rig.fb.color.iter().all(|&c| c == 0));
        assert!(rig.fb.depth.iter().all(|&d| d == 0));
    }

    #[test]
    fn single_pixel_span_is_filled() {
        let mut rig = Rig::new(32, 32);
        // apex row has a zero-length span
        let tri = [[16, 5, 30, 0, 0], [25, 20, 30, 0, 0], [7, 20, 30, 0, 0]];
        rig.flat(&tri, 9);
        assert_eq!(rig.fb.pixel(16, 5), 9);
    }

    #[test]
    fn textured_fill_samples_and_wraps() {
        let mut rig = Rig::new(64, 64);
        let texels = (0..TEX_DIM * TEX_DIM).map(|i| 0x100 + (i % TEX_DIM) as Rgb).collect();
        let tex = Texture::from_texels(texels).unwrap();

        let one = 1 << TEX_LOG;
        // U runs 0..40 texels across 40 pixels; shifted by a full wrap
        let wrap = TEX_DIM as i32 * one;
        let quad = closed(&[
            [10, 10, 60, wrap, 0],
            [50, 10, 60, wrap + 40 * one, 0],
            [50, 30, 60, wrap + 40 * one, 0],
            [10, 30, 60, wrap, 0],
        ]);
        let r = rig.scan.scan_convert(&quad, VertexLayout::Textured, &rig.vp);
        let n = fill_textured(&rig.scan, r, &mut rig.fb, &tex);
        assert!(n > 0);
        let px = rig.fb.pixel(10, 20);
        assert_eq!(px, 0x100);
        let px = rig.fb.pixel(30, 20);
        assert!((0x100 + 18..=0x100 + 21).contains(&px), "{px:#x}");
    }
}
