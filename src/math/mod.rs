//! Integer-only math kernel.
//!
//! Values are fixed point with a configurable number of fractional bits
//! (default [`DEFAULT_PRECISION`], i.e. one unit = 128).

mod matrix;
mod recip;
mod transform;
mod trig;

pub use matrix::{Mat4, MatrixStack, STACK_DEPTH};
pub use recip::{RECIP_BITS, recip15, scaled_step};
pub use transform::{Camera, Facing, SCREEN_LIMIT, project, shorten, signed_facing, transform_vertices};
pub use trig::{Angle, TRIG_MASK, TRIG_SIZE, TrigTable};

pub const DEFAULT_PRECISION: u32 = 7;

/// Largest accepted precision; the sine table is only 15 bits wide and
/// products of two values must stay within 32 bits.
pub const MAX_PRECISION: u32 = 14;
