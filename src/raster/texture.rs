// Square power-of-two textures and the bank polygons reference them through.
// Polygons never own texels: they carry a `TextureId` only.

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    raster::Rgb,
    stream::Fixed,
};

/// log2 of the texture edge.
pub const TEX_LOG: u32 = 7;
/// Texture edge in texels.
pub const TEX_DIM: usize = 1 << TEX_LOG;

/// Texture coordinates carry `TEX_LOG` fractional bits; this keeps one
/// full wrap of U or V.
const COORD_MASK: Fixed = (1 << (TEX_LOG + TEX_LOG)) - 1;

/// Runtime handle for a texture in a [`TextureBank`].
pub type TextureId = u16;

/// `TEX_DIM × TEX_DIM` texels in row-major order, `0x00RRGGBB`.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    texels: Box<[Rgb]>,
}

impl Texture {
    /// Build from exactly `TEX_DIM * TEX_DIM` texels.
    pub fn from_texels(texels: Vec<Rgb>) -> Option<Self> {
        (texels.len() == TEX_DIM * TEX_DIM).then(|| Self {
            texels: texels.into_boxed_slice(),
        })
    }

    /// Solid fill.
    pub fn solid(rgb: Rgb) -> Self {
        Self {
            texels: vec![rgb; TEX_DIM * TEX_DIM].into_boxed_slice(),
        }
    }

    /// Bordered checkerboard with a thick diagonal, the classic test card.
    pub fn checker(light: Rgb, dark: Rgb, stripe: Rgb) -> Self {
        const T: usize = 0x10;
        let mut texels = vec![0; TEX_DIM * TEX_DIM];
        for i in 0..TEX_DIM {
            for j in 0..TEX_DIM {
                let border = i < T || j < T || i > TEX_DIM - 1 - T || j > TEX_DIM - 1 - T;
                let c = if i.abs_diff(j) < 3 {
                    stripe
                } else if border || (i & T) ^ (j & T) != 0 {
                    light
                } else {
                    dark
                };
                texels[i + j * TEX_DIM] = c;
            }
        }
        Self {
            texels: texels.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn texels(&self) -> &[Rgb] {
        &self.texels
    }

    /// Nearest texel for fixed-point `(u, v)`; coordinates wrap.
    #[inline]
    pub fn sample(&self, u: Fixed, v: Fixed) -> Rgb {
        let u = u & COORD_MASK;
        let v = v & COORD_MASK;
        self.texels[((u >> TEX_LOG) | (v & !(TEX_DIM as Fixed - 1))) as usize]
    }
}

/// Name-indexed texture store.
///
/// * Ids are assigned in insertion order and never change.
/// * Every name is stored once.
#[derive(Default)]
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Id of a loaded texture, if the name is known.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture; unknown ids give `None`.
    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.data.get(id as usize)
    }

    /// Insert under a fresh `name` and return its id.
    pub fn insert<S: Into<String>>(&mut self, name: S, tex: Texture) -> Result<TextureId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(Error::DuplicateTexture(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Texture {
        let texels = (0..TEX_DIM * TEX_DIM).map(|i| i as Rgb).collect();
        Texture::from_texels(texels).unwrap()
    }

    #[test]
    fn sample_picks_row_and_column() {
        let t = gradient();
        let one = 1 << TEX_LOG;
        assert_eq!(t.sample(0, 0), 0);
        assert_eq!(t.sample(5 * one, 0), 5);
        assert_eq!(t.sample(0, 3 * one), 3 * TEX_DIM as Rgb);
        // fractions are truncated
        assert_eq!(t.sample(5 * one + one - 1, 0), 5);
    }

    #[test]
    fn coordinates_wrap_instead_of_clamping() {
        let t = gradient();
        let one = 1 << TEX_LOG;
        let full = TEX_DIM as Fixed * one;
        assert_eq!(t.sample(full + 2 * one, 0), t.sample(2 * one, 0));
        assert_eq!(t.sample(-one, 0), t.sample((TEX_DIM as Fixed - 1) * one, 0));
        assert_eq!(t.sample(0, full + one), t.sample(0, one));
    }

    #[test]
    fn from_texels_checks_size() {
        assert!(Texture::from_texels(vec![0; 10]).is_none());
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::new();
        let red = bank.insert("RED", Texture::solid(0xFF0000)).unwrap();
        let blue = bank.insert("BLUE", Texture::solid(0x0000FF)).unwrap();
        assert_ne!(red, blue);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("NOPE"), None);
        assert_eq!(bank.texture(blue).unwrap().texels()[0], 0x0000FF);
        assert!(bank.texture(99).is_none());
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::new();
        bank.insert("WOOD", Texture::solid(1)).unwrap();
        let err = bank.insert("WOOD", Texture::solid(2)).unwrap_err();
        assert_eq!(err, Error::DuplicateTexture("WOOD".into()));
        assert_eq!(bank.len(), 1);
    }
}
