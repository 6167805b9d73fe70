//! Geometric clipping: 2-D viewport clipping of lines and polygons, 3-D
//! near-plane clipping, and the near-plane depth classification.

mod line;
mod polygon;
mod viewport;

pub use line::{Axis, NEAR_Z, Replaced, clip_line_axis, clip_line_near};
pub use polygon::{ClipPlane, ZClass, classify_near_plane, clip_polygon};
pub use viewport::Viewport;
