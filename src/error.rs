//! Crate-wide error type.
//!
//! Every failure the library can report falls into one of two kinds:
//! running out of memory, or a logic error (misuse of the API, a bad
//! configuration, stack over/underflow). Neither is recovered from inside
//! the library; callers are expected to stop.
//!
//! Skipping an object with too many vertices is **not** an error, see
//! [`crate::render::RenderOutcome`].

use std::collections::TryReserveError;

use thiserror::Error;

/// The two classes of failure the host has to handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfMemory,
    Logic,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An allocation request could not be satisfied.
    #[error("{what}: no memory")]
    OutOfMemory { what: &'static str },

    #[error("matrix stack overflow")]
    StackOverflow,

    #[error("matrix stack underflow")]
    StackUnderflow,

    #[error("resolution {width}x{height} outside 1..={max}", max = crate::raster::MAX_DIM)]
    InvalidResolution { width: usize, height: usize },

    #[error(
        "field-of-view shift {0} outside {min}..={max}",
        min = crate::render::MIN_FOV,
        max = crate::render::MAX_FOV
    )]
    InvalidFov(u32),

    #[error("fixed-point precision {0} outside 1..=14")]
    InvalidPrecision(u32),

    /// A polygon must reference exactly 3 or 4 vertices.
    #[error("polygon with {nv} vertices (expected 3 or 4)")]
    BadPolygon { nv: usize },

    #[error("vertex index {index} out of range ({count} vertices)")]
    VertexIndex { index: usize, count: usize },

    #[error("texture `{0}` already loaded")]
    DuplicateTexture(String),

    /// Immediate-mode builder used out of order.
    #[error("builder: {0}")]
    BuilderState(&'static str),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            _ => ErrorKind::Logic,
        }
    }

    /// Adapter for `try_reserve*` results.
    pub(crate) fn oom(what: &'static str) -> impl FnOnce(TryReserveError) -> Error {
        move |_| Error::OutOfMemory { what }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_two_way_split() {
        assert_eq!(
            Error::OutOfMemory { what: "objmgr" }.kind(),
            ErrorKind::OutOfMemory
        );
        assert_eq!(Error::StackOverflow.kind(), ErrorKind::Logic);
        assert_eq!(Error::StackUnderflow.kind(), ErrorKind::Logic);
        assert_eq!(Error::BuilderState("end without begin").kind(), ErrorKind::Logic);
    }

    #[test]
    fn try_reserve_maps_to_oom() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).map_err(Error::oom("gfx")).unwrap_err();
        assert_eq!(err, Error::OutOfMemory { what: "gfx" });
        assert_eq!(err.to_string(), "gfx: no memory");
    }
}
