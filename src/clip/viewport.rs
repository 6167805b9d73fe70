/// Screen-space clip rectangle plus the projection centre.
///
/// Bounds are inclusive pixel coordinates, always kept inside the frame
/// buffer the viewport was created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
    center_x: i32,
    center_y: i32,
    hres: i32,
    vres: i32,
}

impl Viewport {
    /// Viewport covering a whole `width × height` buffer.
    pub fn full(width: usize, height: usize) -> Self {
        let mut vp = Self {
            min_x: 0,
            min_y: 0,
            max_x: 0,
            max_y: 0,
            center_x: 0,
            center_y: 0,
            hres: width as i32,
            vres: height as i32,
        };
        vp.define(0, 0, vp.hres - 1, vp.vres - 1, true);
        vp
    }

    /// Redefine the rectangle, clamped to the buffer. With `update_center`
    /// the projection centre moves to the middle of the new rectangle.
    ///
    /// An inverted or off-buffer request collapses to a rectangle on the
    /// buffer edge; `min_* <= max_*` always holds afterwards.
    pub fn define(&mut self, min_x: i32, min_y: i32, max_x: i32, max_y: i32, update_center: bool) {
        self.min_x = min_x.clamp(0, self.hres - 1);
        self.min_y = min_y.clamp(0, self.vres - 1);
        self.max_x = max_x.clamp(self.min_x, self.hres - 1);
        self.max_y = max_y.clamp(self.min_y, self.vres - 1);
        if update_center {
            self.center_x = ((self.min_x + self.max_x) >> 1) + 1;
            self.center_y = ((self.min_y + self.max_y) >> 1) + 1;
        }
    }

    /// Projection centre (principal point).
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }
}
