use bitflags::bitflags;

use crate::{
    builder::{MeshBuilder, Primitive},
    error::Result,
    raster::{TEX_DIM, TextureId},
    render::Object,
    stream::Fixed,
};

bitflags! {
    /// Faces of an axis-aligned box.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BoxFaces: u8 {
        const TOP    = 0o01;
        const BOTTOM = 0o02;
        const BACK   = 0o04;
        const FRONT  = 0o10;
        const LEFT   = 0o20;
        const RIGHT  = 0o40;
        const ALL    = 0o77;
    }
}

/// Box of `w × h × d` (along X, Y, Z) centred on the origin, one quad per
/// selected face, each face mapped to the whole texture. Faces are wound
/// to be front facing from outside. An empty face set builds nothing.
pub fn gen_box(
    w: Fixed,
    h: Fixed,
    d: Fixed,
    faces: BoxFaces,
    color: (u8, u8, u8),
    texture: Option<TextureId>,
) -> Result<Option<Object>> {
    if faces.is_empty() {
        return Ok(None);
    }
    let (w, h, d) = (w >> 1, h >> 1, d >> 1);
    let v = [
        [-w, -h, d],
        [w, -h, d],
        [w, h, d],
        [-w, h, d],
        [-w, -h, -d],
        [-w, h, -d],
        [w, h, -d],
        [w, -h, -d],
    ];
    let layout: [(BoxFaces, [usize; 4]); 6] = [
        (BoxFaces::BACK, [0, 1, 2, 3]),
        (BoxFaces::FRONT, [4, 5, 6, 7]),
        (BoxFaces::TOP, [5, 3, 2, 6]),
        (BoxFaces::BOTTOM, [4, 7, 1, 0]),
        (BoxFaces::RIGHT, [7, 6, 2, 1]),
        (BoxFaces::LEFT, [4, 0, 3, 5]),
    ];
    let t = TEX_DIM as Fixed - 1;
    let uv = [(0, 0), (t, 0), (t, t), (0, t)];

    let mut b = MeshBuilder::new();
    b.begin();
    b.primitive(Primitive::Quads);
    b.color(color.0, color.1, color.2);
    b.texture(texture);
    for (face, corners) in layout {
        if !faces.contains(face) {
            continue;
        }
        for (&c, &(u, tv)) in corners.iter().zip(&uv) {
            b.tex_coord(u, tv);
            let [x, y, z] = v[c];
            b.vertex(x, y, z)?;
        }
    }
    b.end()?;
    b.export().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        math::{Facing, signed_facing},
        stream::Vert,
    };

    #[test]
    fn empty_face_set_builds_nothing() {
        assert_eq!(gen_box(10, 10, 10, BoxFaces::empty(), (0, 0, 0), None), Ok(None));
    }

    #[test]
    fn full_box() {
        let b = gen_box(128, 64, 32, BoxFaces::ALL, (0o77, 0o77, 0o77), Some(1)).unwrap().unwrap();
        assert_eq!(b.vertices().len(), 8);
        assert_eq!(b.polygons().len(), 6);
        assert!(b.polygons().iter().all(|p| p.nv() == 4 && p.texture == Some(1)));
        assert!(b.vertices().iter().all(|v| v[0].abs() == 64 && v[1].abs() == 32 && v[2].abs() == 16));
    }

    #[test]
    fn top_only() {
        let b = gen_box(128, 128, 128, BoxFaces::TOP, (1, 2, 3), None).unwrap().unwrap();
        assert_eq!(b.polygons().len(), 1);
        assert!(b.vertices().iter().all(|v| v[1] == 64));
    }

    #[test]
    fn faces_point_outwards() {
        // seen from well outside along each axis, each face is front facing
        let b = gen_box(100, 100, 100, BoxFaces::ALL, (0, 0, 0), None).unwrap().unwrap();
        let eye_dist = 1000;
        for p in b.polygons() {
            let c: Vec<[Fixed; 3]> = p.corners()[..3].iter().map(|c| b.vertices()[c.index as usize]).collect();
            // outward normal from the centroid of the face
            let centre: Vec<Fixed> = (0..3).map(|i| (c[0][i] + c[2][i]) / 2).collect();
            let eye: Vec<Fixed> = centre.iter().map(|&x| x.signum() * eye_dist).collect();
            let rel = |v: [Fixed; 3]| -> Vert { [v[0] - eye[0], v[1] - eye[1], v[2] - eye[2], 0, 0] };
            let s = signed_facing(&rel(c[0]), &rel(c[1]), &rel(c[2]));
            assert_eq!(Facing::from_sign(s), Facing::Front, "{p:?}");
        }
    }
}
