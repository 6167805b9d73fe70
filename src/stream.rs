//! Per-polygon vertex streams shared by the clipper, the projector and the
//! scan converter.
//!
//! A stream entry is a fixed-size array of fixed-point integers. Only the
//! first [`VertexLayout::stride`] slots are meaningful:
//!
//! ```text
//!   flat      X Y Z
//!   textured  X Y Z U V
//! ```
//!
//! Streams are always *closed*: a polygon with `n` vertices is stored as
//! `n + 1` entries, the last one a copy of the first.

use smallvec::SmallVec;

/// Fixed-point scalar.
pub type Fixed = i32;

pub const X: usize = 0;
pub const Y: usize = 1;
pub const Z: usize = 2;
pub const U: usize = 3;
pub const V: usize = 4;

/// Widest entry (textured layout).
pub const MAX_ATTRS: usize = 5;

/// Maximum vertices in a polygon after near and viewport clipping.
pub const MAX_POLY_VERTS: usize = 8;

/// One stream entry.
pub type Vert = [Fixed; MAX_ATTRS];

/// Closed vertex stream; stays on the stack for every polygon the clipper can
/// produce.
pub type VertexStream = SmallVec<[Vert; MAX_POLY_VERTS + 2]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexLayout {
    /// (X, Y, Z)
    Flat,
    /// (X, Y, Z, U, V)
    Textured,
}

impl VertexLayout {
    /// Number of meaningful slots per entry.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            VertexLayout::Flat => 3,
            VertexLayout::Textured => 5,
        }
    }

    /// Interpolated attributes past the screen position: depth, plus U/V
    /// for textured streams.
    #[inline]
    pub const fn attrs(self) -> usize {
        self.stride() - 2
    }
}

/// Close `stream` by repeating its first entry. Empty streams stay empty.
pub fn close(stream: &mut VertexStream) {
    if let Some(&first) = stream.first() {
        stream.push(first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_strides() {
        assert_eq!(VertexLayout::Flat.stride(), 3);
        assert_eq!(VertexLayout::Textured.stride(), 5);
        assert_eq!(VertexLayout::Flat.attrs(), 1);
        assert_eq!(VertexLayout::Textured.attrs(), 3);
    }

    #[test]
    fn close_repeats_first() {
        let mut s = VertexStream::new();
        close(&mut s);
        assert!(s.is_empty());

        s.push([1, 2, 3, 0, 0]);
        s.push([4, 5, 6, 0, 0]);
        close(&mut s);
        assert_eq!(s.len(), 3);
        assert_eq!(s[2], s[0]);
    }
}
