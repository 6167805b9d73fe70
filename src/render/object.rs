//! Renderable meshes: an owned vertex array plus polygons indexing into it.

use crate::{
    error::{Error, Result},
    raster::{Rgb, TextureId},
    stream::Fixed,
};

/// One polygon corner: a vertex index and its texture coordinate in texels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolyVertex {
    pub index: u16,
    pub u: Fixed,
    pub v: Fixed,
}

impl PolyVertex {
    pub const fn new(index: u16, u: Fixed, v: Fixed) -> Self {
        Self { index, u, v }
    }
}

/// Triangle or quad with a solid colour and an optional texture.
///
/// Corners are stored closed: `nv` real corners followed by a copy of the
/// first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Polygon {
    corners: [PolyVertex; 5],
    nv: u8,
    pub color: Rgb,
    pub texture: Option<TextureId>,
}

impl Polygon {
    /// Build from 3 or 4 corners.
    ///
    /// A quad with two coincident neighbouring corners collapses to a
    /// triangle: when corners 0 and 1 share a vertex the triangle is
    /// `0, 2, 3`; when corners 2 and 3 do it is `0, 1, 2`.
    pub fn new(corners: &[PolyVertex], color: Rgb, texture: Option<TextureId>) -> Result<Self> {
        let mut c = [PolyVertex::default(); 5];
        let nv = match *corners {
            [a, b, d] => {
                c[..3].copy_from_slice(&[a, b, d]);
                3
            }
            [a, b, d, e] if a.index == b.index => {
                c[..3].copy_from_slice(&[a, d, e]);
                3
            }
            [a, b, d, e] if d.index == e.index => {
                c[..3].copy_from_slice(&[a, b, d]);
                3
            }
            [a, b, d, e] => {
                c[..4].copy_from_slice(&[a, b, d, e]);
                4
            }
            _ => return Err(Error::BadPolygon { nv: corners.len() }),
        };
        c[nv] = c[0];
        Ok(Self {
            corners: c,
            nv: nv as u8,
            color,
            texture,
        })
    }

    /// Number of real corners (3 or 4; 0 once cleared).
    #[inline]
    pub fn nv(&self) -> usize {
        self.nv as usize
    }

    /// The `nv + 1` closed corners.
    #[inline]
    pub fn corners(&self) -> &[PolyVertex] {
        &self.corners[..=self.nv()]
    }

    fn clear(&mut self) {
        self.color = 0;
        self.nv = 0;
        self.texture = None;
    }
}

/// Vertex positions plus polygons referencing them by index.
///
/// Every polygon index is checked against the vertex array on
/// construction, so an object with polygons always has vertices.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Object {
    vertices: Vec<[Fixed; 3]>,
    polygons: Vec<Polygon>,
}

impl Object {
    pub fn new(vertices: Vec<[Fixed; 3]>, polygons: Vec<Polygon>) -> Result<Self> {
        let count = vertices.len();
        for p in &polygons {
            if let Some(bad) = p.corners().iter().find(|c| c.index as usize >= count) {
                return Err(Error::VertexIndex {
                    index: bad.index as usize,
                    count,
                });
            }
        }
        Ok(Self { vertices, polygons })
    }

    #[inline]
    pub fn vertices(&self) -> &[[Fixed; 3]] {
        &self.vertices
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(self.vertices.len())
            .map_err(Error::oom("objmgr"))?;
        vertices.extend_from_slice(&self.vertices);

        let mut polygons = Vec::new();
        polygons
            .try_reserve_exact(self.polygons.len())
            .map_err(Error::oom("objmgr"))?;
        polygons.extend_from_slice(&self.polygons);

        Ok(Self { vertices, polygons })
    }

    /// Release both arrays. Polygons are zeroed first so nothing stale
    /// survives in reused storage.
    pub fn clear(&mut self) {
        self.polygons.iter_mut().for_each(Polygon::clear);
        self.polygons = Vec::new();
        self.vertices = Vec::new();
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    fn pv(index: u16) -> PolyVertex {
        PolyVertex::new(index, index as Fixed * 10, 0)
    }

    #[test]
    fn triangle_is_closed() {
        let p = Polygon::new(&[pv(0), pv(1), pv(2)], 5, None).unwrap();
        assert_eq!(p.nv(), 3);
        assert_eq!(p.corners(), &[pv(0), pv(1), pv(2), pv(0)]);
    }

    #[test]
    fn quad_with_first_pair_coincident_collapses() {
        let p = Polygon::new(&[pv(4), pv(4), pv(6), pv(7)], 0, None).unwrap();
        assert_eq!(p.nv(), 3);
        // texture coordinates travel with their corner
        assert_eq!(p.corners(), &[pv(4), pv(6), pv(7), pv(4)]);
    }

    #[test]
    fn quad_with_last_pair_coincident_collapses() {
        let p = Polygon::new(&[pv(1), pv(2), pv(3), pv(3)], 0, None).unwrap();
        assert_eq!(p.nv(), 3);
        assert_eq!(p.corners(), &[pv(1), pv(2), pv(3), pv(1)]);
    }

    #[test]
    fn proper_quad_keeps_four() {
        let p = Polygon::new(&[pv(0), pv(1), pv(2), pv(3)], 0, Some(2)).unwrap();
        assert_eq!(p.nv(), 4);
        assert_eq!(p.corners().len(), 5);
        assert_eq!(p.texture, Some(2));
    }

    #[test]
    fn wrong_corner_count_rejected() {
        assert_eq!(
            Polygon::new(&[pv(0), pv(1)], 0, None).unwrap_err(),
            Error::BadPolygon { nv: 2 }
        );
        assert!(Polygon::new(&[pv(0); 5], 0, None).is_err());
    }

    #[test]
    fn object_checks_indices() {
        let tri = Polygon::new(&[pv(0), pv(1), pv(3)], 0, None).unwrap();
        let err = Object::new(vec![[0; 3]; 3], vec![tri]).unwrap_err();
        assert_eq!(err, Error::VertexIndex { index: 3, count: 3 });
    }

    #[test]
    fn clone_and_clear() {
        let tri = Polygon::new(&[pv(0), pv(1), pv(2)], 0xFF, Some(0)).unwrap();
        let mut a = Object::new(vec![[1, 2, 3], [4, 5, 6], [7, 8, 9]], vec![tri]).unwrap();
        let b = a.try_clone().unwrap();
        assert_eq!(a, b);

        a.clear();
        assert!(a.is_empty());
        assert!(a.vertices().is_empty());
        assert_eq!(b.polygons()[0].color, 0xFF);
    }

    #[test]
    fn cleared_polygon_has_no_corners() {
        let mut p = Polygon::new(&[pv(0), pv(1), pv(2)], 7, Some(1)).unwrap();
        p.clear();
        assert_eq!((p.nv(), p.color, p.texture), (0, 0, None));
        assert_eq!(p.corners().len(), 1);
    }
}
