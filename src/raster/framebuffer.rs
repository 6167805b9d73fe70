use crate::{
    error::{Error, Result},
    raster::{MAX_DIM, Rgb},
};

/// Colour plus depth, both `width × height`, row-major.
///
/// Depth is "larger is nearer"; clearing sets it to 0 so any projected
/// fragment passes.
#[derive(Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pub color: Vec<Rgb>,
    pub depth: Vec<i32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if !(1..=MAX_DIM).contains(&width) || !(1..=MAX_DIM).contains(&height) {
            return Err(Error::InvalidResolution { width, height });
        }
        let len = width * height;

        let mut color = Vec::new();
        color.try_reserve_exact(len).map_err(Error::oom("frame buffer"))?;
        color.resize(len, 0);

        let mut depth = Vec::new();
        depth.try_reserve_exact(len).map_err(Error::oom("depth buffer"))?;
        depth.resize(len, 0);

        Ok(Self {
            width,
            height,
            color,
            depth,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Fill colour with `rgb` and reset depth.
    pub fn clear(&mut self, rgb: Rgb) {
        self.color.fill(rgb);
        self.depth.fill(0);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.color[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_sizes() {
        assert_eq!(
            FrameBuffer::new(0, 10).unwrap_err(),
            Error::InvalidResolution { width: 0, height: 10 }
        );
        assert!(FrameBuffer::new(MAX_DIM + 1, 10).is_err());
        assert!(FrameBuffer::new(MAX_DIM, MAX_DIM).is_ok());
    }

    #[test]
    fn clear_resets_both_planes() {
        let mut fb = FrameBuffer::new(4, 3).unwrap();
        fb.color[5] = 7;
        fb.depth[5] = 99;
        fb.clear(0x123456);
        assert!(fb.color.iter().all(|&c| c == 0x123456));
        assert!(fb.depth.iter().all(|&d| d == 0));
        assert_eq!(fb.pixel(1, 1), 0x123456);
    }
}
