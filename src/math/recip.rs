//! 15-bit reciprocal lookup used by the scan converter and span filler in
//! place of per-edge divisions.

use once_cell::sync::Lazy;

use crate::{raster::MAX_DIM, stream::Fixed};

pub const RECIP_BITS: u32 = 15;

static RECIP15: Lazy<Box<[Fixed]>> = Lazy::new(|| {
    let mut t = vec![0; MAX_DIM + 1].into_boxed_slice();
    // entry 0 is never a real divisor; keep it harmless
    t[0] = 1;
    for (n, r) in t.iter_mut().enumerate().skip(1) {
        *r = (1 << RECIP_BITS) / n as Fixed;
    }
    t
});

/// `(1 << 15) / n` for `n` in `1..=MAX_DIM`; `n` is clamped into the table.
#[inline]
pub fn recip15(n: i32) -> Fixed {
    RECIP15[n.clamp(0, MAX_DIM as i32) as usize]
}

/// `delta / n` in whole units, given `inv = recip15(n)`.
#[inline]
pub fn scaled_step(delta: Fixed, inv: Fixed) -> Fixed {
    ((delta as i64 * inv as i64) >> RECIP_BITS) as Fixed
}
