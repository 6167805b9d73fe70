//! Immediate-mode mesh authoring.
//!
//! ```text
//!   begin ─▶ primitive / texture / color / tex_coord / vertex … ─▶ end ─▶ export
//! ```
//!
//! Vertices are submitted one at a time; every third (triangles) or fourth
//! (quads) one completes a polygon with the current colour and texture.
//! Identical positions are stored once.

mod shapes;

use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    raster::{Rgb, TextureId},
    render::{Object, PolyVertex, Polygon},
    stream::Fixed,
};

pub use shapes::{BoxFaces, gen_box};

/// Expand an 18-bit `0o RR GG BB` colour (6 bits per channel) to
/// `0x00RRGGBB`, replicating the top bits into the new low bits.
pub fn rgb18_to_24(rgb: u32) -> Rgb {
    let widen = |c: u32| (c << 2) | (c >> 4);
    let r = widen((rgb >> 12) & 0o77);
    let g = widen((rgb >> 6) & 0o77);
    let b = widen(rgb & 0o77);
    (r << 16) | (g << 8) | b
}

/// How consecutive vertices are grouped into polygons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Primitive {
    #[default]
    Triangles,
    Quads,
}

impl Primitive {
    const fn corners(self) -> usize {
        match self {
            Primitive::Triangles => 3,
            Primitive::Quads => 4,
        }
    }
}

pub struct MeshBuilder {
    open: bool,
    primitive: Primitive,
    texture: Option<TextureId>,
    color: Rgb,
    tex_coord: (Fixed, Fixed),
    pending: SmallVec<[PolyVertex; 4]>,
    vertices: Vec<[Fixed; 3]>,
    polygons: Vec<Polygon>,
    product: Option<Object>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self {
            open: false,
            primitive: Primitive::Triangles,
            texture: None,
            color: rgb18_to_24(0o777777),
            tex_coord: (0, 0),
            pending: SmallVec::new(),
            vertices: Vec::new(),
            polygons: Vec::new(),
            product: None,
        }
    }
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new mesh, dropping any previous product. Colour, texture,
    /// texture coordinate and primitive type carry over.
    pub fn begin(&mut self) {
        self.product = None;
        self.vertices.clear();
        self.polygons.clear();
        self.pending.clear();
        self.open = true;
    }

    /// Select the primitive type; a change discards a half-entered polygon.
    pub fn primitive(&mut self, primitive: Primitive) {
        if primitive != self.primitive {
            self.pending.clear();
        }
        self.primitive = primitive;
    }

    /// Texture for polygons completed from now on.
    pub fn texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    /// Colour from 6-bit channels.
    pub fn color(&mut self, r: u8, g: u8, b: u8) {
        let (r, g, b) = (r as u32 & 0o77, g as u32 & 0o77, b as u32 & 0o77);
        self.color = rgb18_to_24((r << 12) | (g << 6) | b);
    }

    /// Texture coordinate (in texels) attached to the following vertices.
    pub fn tex_coord(&mut self, u: Fixed, v: Fixed) {
        self.tex_coord = (u, v);
    }

    pub fn vertex(&mut self, x: Fixed, y: Fixed, z: Fixed) -> Result<()> {
        if !self.open {
            return Err(Error::BuilderState("vertex outside begin/end"));
        }
        let index = self.add_position([x, y, z])?;
        let (u, v) = self.tex_coord;
        self.pending.push(PolyVertex::new(index, u, v));

        if self.pending.len() == self.primitive.corners() {
            let poly = Polygon::new(&self.pending, self.color, self.texture)?;
            self.pending.clear();
            self.polygons
                .try_reserve(1)
                .map_err(Error::oom("imode"))?;
            self.polygons.push(poly);
        }
        Ok(())
    }

    fn add_position(&mut self, p: [Fixed; 3]) -> Result<u16> {
        if let Some(i) = self.vertices.iter().position(|&q| q == p) {
            return Ok(i as u16);
        }
        let index = u16::try_from(self.vertices.len())
            .map_err(|_| Error::BuilderState("too many vertices"))?;
        self.vertices.try_reserve(1).map_err(Error::oom("imode"))?;
        self.vertices.push(p);
        Ok(index)
    }

    /// Close the mesh. A mesh without any complete polygon produces nothing.
    pub fn end(&mut self) -> Result<()> {
        if !self.open {
            return Err(Error::BuilderState("end without begin"));
        }
        self.open = false;
        self.pending.clear();
        if self.vertices.is_empty() || self.polygons.is_empty() {
            return Ok(());
        }
        let vertices = std::mem::take(&mut self.vertices);
        let polygons = std::mem::take(&mut self.polygons);
        self.product = Some(Object::new(vertices, polygons)?);
        Ok(())
    }

    /// Copy of the last finished mesh.
    pub fn export(&self) -> Result<Object> {
        match &self.product {
            Some(obj) => obj.try_clone(),
            None if self.open => Err(Error::BuilderState("export before end")),
            None => Err(Error::BuilderState("export of empty mesh")),
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_expansion() {
        assert_eq!(rgb18_to_24(0), 0);
        assert_eq!(rgb18_to_24(0o777777), 0xFFFFFF);
        assert_eq!(rgb18_to_24(0o770000), 0xFF0000);
        assert_eq!(rgb18_to_24(0o000100), 0x000400);
    }

    #[test]
    fn triangles_share_vertices() {
        let mut b = MeshBuilder::new();
        b.begin();
        for (x, y) in [(0, 0), (10, 0), (0, 10), (10, 0), (10, 10), (0, 10)] {
            b.vertex(x, y, 5).unwrap();
        }
        b.end().unwrap();
        let obj = b.export().unwrap();
        assert_eq!(obj.vertices().len(), 4);
        assert_eq!(obj.polygons().len(), 2);
        assert_eq!(obj.polygons()[1].corners()[0].index, 1);
    }

    #[test]
    fn quads_pick_up_state() {
        let mut b = MeshBuilder::new();
        b.begin();
        b.primitive(Primitive::Quads);
        b.color(0o77, 0, 0);
        b.texture(Some(3));
        for (i, (x, y)) in [(0, 0), (1, 0), (1, 1), (0, 1)].into_iter().enumerate() {
            b.tex_coord(i as Fixed * 10, 0);
            b.vertex(x, y, 0).unwrap();
        }
        b.end().unwrap();
        let obj = b.export().unwrap();
        let p = obj.polygons()[0];
        assert_eq!(p.nv(), 4);
        assert_eq!(p.color, 0xFF0000);
        assert_eq!(p.texture, Some(3));
        assert_eq!(p.corners()[2].u, 20);
    }

    #[test]
    fn degenerate_quad_is_stored_as_triangle() {
        let mut b = MeshBuilder::new();
        b.begin();
        b.primitive(Primitive::Quads);
        for (x, y) in [(0, 0), (0, 0), (5, 0), (5, 5)] {
            b.vertex(x, y, 1).unwrap();
        }
        b.end().unwrap();
        let p = b.export().unwrap().polygons()[0];
        assert_eq!(p.nv(), 3);
        let idx: Vec<u16> = p.corners().iter().map(|c| c.index).collect();
        assert_eq!(idx, vec![0, 1, 2, 0]);
    }

    #[test]
    fn changing_primitive_drops_partial_polygon() {
        let mut b = MeshBuilder::new();
        b.begin();
        b.vertex(0, 0, 0).unwrap();
        b.vertex(1, 0, 0).unwrap();
        b.primitive(Primitive::Quads);
        for (x, y) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
            b.vertex(x, y, 0).unwrap();
        }
        b.end().unwrap();
        let obj = b.export().unwrap();
        assert_eq!(obj.polygons().len(), 1);
        assert_eq!(obj.polygons()[0].nv(), 4);
    }

    #[test]
    fn misuse_is_a_logic_error() {
        let mut b = MeshBuilder::new();
        assert_eq!(b.vertex(0, 0, 0), Err(Error::BuilderState("vertex outside begin/end")));
        assert_eq!(b.end(), Err(Error::BuilderState("end without begin")));
        b.begin();
        assert!(b.export().is_err());
        b.end().unwrap();
        // nothing complete was entered
        assert!(b.export().is_err());
    }
}
