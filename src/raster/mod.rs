//! Scan conversion, span filling and the buffers they write.
//!
//! * [`ScanTables`] turns a projected polygon into per-row spans.
//! * [`fill_flat`] / [`fill_textured`] consume those spans.
//! * [`FrameBuffer`] owns colour and depth.

mod fill;
mod framebuffer;
mod scan;
mod texture;

pub use fill::{fill_flat, fill_textured};
pub use framebuffer::FrameBuffer;
pub use scan::{Attrs, DEPTH_BITS, ScanRange, ScanTables, Span};
pub use texture::{TEX_DIM, TEX_LOG, Texture, TextureBank, TextureId};

/// Pixel format of the colour buffer (0x00RRGGBB).
pub type Rgb = u32;

/// Largest supported frame-buffer width or height.
pub const MAX_DIM: usize = 640;
