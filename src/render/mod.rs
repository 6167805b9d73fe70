//! Objects and the per-object render driver.

use bitflags::bitflags;

mod context;
mod object;

pub use context::{PolyOutcome, RenderConfig, RenderContext, RenderOutcome, RenderStats};
pub use object::{Object, PolyVertex, Polygon};

/// Smallest usable field-of-view shift.
pub const MIN_FOV: u32 = 8;
/// Largest field-of-view shift; keeps the projection factor and depth
/// inside `i64`/`i32` (projected X/Y saturate, see
/// [`crate::math::SCREEN_LIMIT`]).
pub const MAX_FOV: u32 = 24;
pub const DEFAULT_FOV: u32 = 9;

/// Capacity of the view-space vertex cache; larger objects are skipped.
pub const MAX_OBJECT_VERTICES: usize = 128;

/// How polygons are filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RasterMode {
    /// Solid colour, textures ignored.
    #[default]
    Flat,
    /// Affine texture mapping for polygons with a loaded texture.
    Textured,
}

bitflags! {
    /// Which facings are discarded before rasterisation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CullMode: u8 {
        const FRONT = 0b01;
        const BACK  = 0b10;
    }
}

impl Default for CullMode {
    fn default() -> Self {
        CullMode::BACK
    }
}
