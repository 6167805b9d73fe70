//! 4×4 fixed-point matrices and the model matrix stack.
//!
//! Matrices are row-major and act on row vectors (`v * M`); the translation
//! lives in elements 12..15. Composition always pre-multiplies, so the most
//! recently applied elementary transform is the first one a vertex sees.

use crate::{
    error::{Error, Result},
    math::trig::{Angle, TrigTable},
    stream::Fixed,
};

/// Depth of the model matrix stack.
pub const STACK_DEPTH: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mat4(pub [Fixed; 16]);

impl Mat4 {
    /// Identity with `one` on the diagonal.
    pub fn identity(one: Fixed) -> Self {
        let mut m = [0; 16];
        m[0] = one;
        m[5] = one;
        m[10] = one;
        m[15] = one;
        Mat4(m)
    }

    /// `self = b * self`.
    ///
    /// Every product is shifted back down on its own before the four terms
    /// are summed; rounding differs from shifting the sum.
    pub fn premul(&mut self, b: &Mat4, precision: u32) {
        let m = self.0;
        let b = &b.0;
        let a = &mut self.0;
        for row in (0..16).step_by(4) {
            for col in 0..4 {
                a[row + col] = ((b[row] * m[col]) >> precision)
                    + ((b[row + 1] * m[4 + col]) >> precision)
                    + ((b[row + 2] * m[8 + col]) >> precision)
                    + ((b[row + 3] * m[12 + col]) >> precision);
            }
        }
    }

    /// Translation row.
    #[inline]
    pub fn translation(&self) -> [Fixed; 3] {
        [self.0[12], self.0[13], self.0[14]]
    }
}

/// Bounded stack of model matrices.
///
/// `top()` is the active model matrix. The camera never goes through here;
/// see [`crate::math::Camera`].
#[derive(Clone, Debug)]
pub struct MatrixStack {
    current: Mat4,
    saved: [Mat4; STACK_DEPTH],
    depth: usize,
    identity: Mat4,
    trig: TrigTable,
}

impl MatrixStack {
    pub fn new(precision: u32) -> Self {
        let identity = Mat4::identity(1 << precision);
        Self {
            current: identity,
            saved: [identity; STACK_DEPTH],
            depth: 0,
            identity,
            trig: TrigTable::new(precision),
        }
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.trig.precision()
    }

    #[inline]
    pub fn trig(&self) -> &TrigTable {
        &self.trig
    }

    /// Current model matrix.
    #[inline]
    pub fn top(&self) -> &Mat4 {
        &self.current
    }

    /// Number of saved matrices.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Save the current matrix.
    pub fn push(&mut self) -> Result<()> {
        if self.depth + 1 >= STACK_DEPTH {
            return Err(Error::StackOverflow);
        }
        self.saved[self.depth + 1] = self.current;
        self.depth += 1;
        Ok(())
    }

    /// Restore the matrix saved by the matching [`push`](Self::push).
    pub fn pop(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::StackUnderflow);
        }
        self.current = self.saved[self.depth];
        self.depth -= 1;
        Ok(())
    }

    pub fn load_identity(&mut self) {
        self.current = self.identity;
    }

    pub fn load(&mut self, m: &Mat4) {
        self.current = *m;
    }

    /// Compose `m` into the current matrix.
    pub fn mul(&mut self, m: &Mat4) {
        let p = self.precision();
        self.current.premul(m, p);
    }

    pub fn scale(&mut self, x: Fixed, y: Fixed, z: Fixed) {
        let mut m = self.identity;
        m.0[0] = x;
        m.0[5] = y;
        m.0[10] = z;
        self.mul(&m);
    }

    /// Translate by (x, y, z) whole units.
    pub fn translate(&mut self, x: Fixed, y: Fixed, z: Fixed) {
        let mut m = self.identity;
        m.0[12] = x;
        m.0[13] = y;
        m.0[14] = z;
        self.mul(&m);
    }

    pub fn rotate_x(&mut self, a: Angle) {
        let (s, c) = self.trig.sin_cos(a);
        let mut m = self.identity;
        m.0[5] = c;
        m.0[9] = -s;
        m.0[6] = s;
        m.0[10] = c;
        self.mul(&m);
    }

    pub fn rotate_y(&mut self, a: Angle) {
        let (s, c) = self.trig.sin_cos(a);
        let mut m = self.identity;
        m.0[0] = c;
        m.0[8] = s;
        m.0[2] = -s;
        m.0[10] = c;
        self.mul(&m);
    }

    pub fn rotate_z(&mut self, a: Angle) {
        let (s, c) = self.trig.sin_cos(a);
        let mut m = self.identity;
        m.0[0] = c;
        m.0[4] = s;
        m.0[1] = -s;
        m.0[5] = c;
        self.mul(&m);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
