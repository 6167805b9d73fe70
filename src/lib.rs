//! Fixed-point, single-threaded software polygon rasteriser.
//!
//! ```text
//!   Object ─▶ transform (math) ─▶ z-classify / cull ─▶ near clip (clip)
//!          ─▶ project (math) ─▶ scan + fill (raster) ─▶ FrameBuffer
//! ```
//!
//! Everything is integer arithmetic. [`render::RenderContext`] owns every
//! buffer the pipeline touches; the host supplies objects and textures and
//! presents the finished colour buffer.

pub mod builder;
pub mod clip;
pub mod demo;
pub mod error;
pub mod math;
pub mod raster;
pub mod render;
pub mod stream;

pub use error::{Error, ErrorKind, Result};
pub use raster::{FrameBuffer, Rgb, Texture, TextureBank, TextureId};
pub use render::{CullMode, Object, RasterMode, RenderConfig, RenderContext, RenderOutcome};
