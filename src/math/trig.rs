//! Table-driven sine / cosine.
//!
//! A full turn is [`TRIG_SIZE`] angle units. The literal table holds the
//! first half period in Q15; [`TrigTable::new`] rescales it to the working
//! precision and mirrors it for the second half. Cosine reads the *same*
//! table a quarter period ahead, so `cos(a) == sin(a + 64)` bit for bit.

use crate::stream::Fixed;

/// Angle in 1/256 turns. Any `i32` is valid; only the low 8 bits matter.
pub type Angle = i32;

pub const TRIG_SIZE: usize = 256;
pub const TRIG_MASK: usize = TRIG_SIZE - 1;

const QUARTER: i32 = (TRIG_SIZE >> 2) as i32;

/// Bits of the literal table below.
const SIN_BITS: u32 = 15;

#[rustfmt::skip]
const SIN_Q15_HALF: [Fixed; TRIG_SIZE / 2] = [
    0x0000,0x0324,0x0647,0x096a,0x0c8b,0x0fab,0x12c8,0x15e2,
    0x18f8,0x1c0b,0x1f19,0x2223,0x2528,0x2826,0x2b1f,0x2e11,
    0x30fb,0x33de,0x36ba,0x398c,0x3c56,0x3f17,0x41ce,0x447a,
    0x471c,0x49b4,0x4c3f,0x4ebf,0x5133,0x539b,0x55f5,0x5842,
    0x5a82,0x5cb4,0x5ed7,0x60ec,0x62f2,0x64e8,0x66cf,0x68a6,
    0x6a6d,0x6c24,0x6dca,0x6f5f,0x70e2,0x7255,0x73b5,0x7504,
    0x7641,0x776c,0x7884,0x798a,0x7a7d,0x7b5d,0x7c29,0x7ce3,
    0x7d8a,0x7e1d,0x7e9d,0x7f09,0x7f62,0x7fa7,0x7fd8,0x7ff6,
    0x8000,0x7ff6,0x7fd8,0x7fa7,0x7f62,0x7f09,0x7e9d,0x7e1d,
    0x7d8a,0x7ce3,0x7c29,0x7b5d,0x7a7d,0x798a,0x7884,0x776c,
    0x7641,0x7504,0x73b5,0x7255,0x70e2,0x6f5f,0x6dca,0x6c24,
    0x6a6d,0x68a6,0x66cf,0x64e8,0x62f2,0x60ec,0x5ed7,0x5cb4,
    0x5a82,0x5842,0x55f5,0x539b,0x5133,0x4ebf,0x4c3f,0x49b4,
    0x471c,0x447a,0x41ce,0x3f17,0x3c56,0x398c,0x36ba,0x33de,
    0x30fb,0x2e11,0x2b1f,0x2826,0x2528,0x2223,0x1f19,0x1c0b,
    0x18f8,0x15e2,0x12c8,0x0fab,0x0c8b,0x096a,0x0647,0x0324,
];

/// Sine table at a fixed working precision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrigTable {
    sin: [Fixed; TRIG_SIZE],
    precision: u32,
}

impl TrigTable {
    /// Build the table for `precision` fractional bits (`precision <= 15`).
    pub fn new(precision: u32) -> Self {
        debug_assert!(precision <= SIN_BITS);
        let half = TRIG_SIZE >> 1;
        let mut sin = [0; TRIG_SIZE];
        for (dst, &q15) in sin.iter_mut().zip(SIN_Q15_HALF.iter()) {
            *dst = q15 >> (SIN_BITS - precision);
        }
        // odd symmetry about pi
        for i in 0..half {
            sin[half + i] = -sin[i];
        }
        Self { sin, precision }
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub fn sin(&self, a: Angle) -> Fixed {
        self.sin[a as usize & TRIG_MASK]
    }

    #[inline]
    pub fn cos(&self, a: Angle) -> Fixed {
        self.sin(a.wrapping_add(QUARTER))
    }

    /// `(sin, cos)` of `a`.
    #[inline]
    pub fn sin_cos(&self, a: Angle) -> (Fixed, Fixed) {
        (self.sin(a), self.cos(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_angles_at_default_precision() {
        let t = TrigTable::new(7);
        assert_eq!(t.sin(0), 0);
        assert_eq!(t.sin(64), 128);
        assert_eq!(t.sin(128), 0);
        assert_eq!(t.sin(192), -128);
        assert_eq!(t.cos(0), 128);
        assert_eq!(t.cos(64), 0);
        assert_eq!(t.cos(128), -128);
    }

    #[test]
    fn cosine_is_quarter_shifted_sine() {
        let t = TrigTable::new(7);
        for a in 0..TRIG_SIZE as i32 {
            assert_eq!(t.cos(a), t.sin(a + 64), "angle {a}");
        }
    }

    #[test]
    fn angles_wrap_including_negative() {
        let t = TrigTable::new(12);
        assert_eq!(t.sin(-64), t.sin(192));
        assert_eq!(t.cos(256 + 10), t.cos(10));
        assert_eq!(t.sin(-1), -t.sin(1));
    }

    #[test]
    fn rescale_truncates_from_q15() {
        let t = TrigTable::new(15);
        assert_eq!(t.sin(1), 0x0324);
        let t = TrigTable::new(7);
        assert_eq!(t.sin(1), 0x0324 >> 8);
    }
}
