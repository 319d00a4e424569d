//! Parametric solid primitives.
//!
//! The only primitive so far is the tube polygon ([`PolygonRing`]): a
//! regular polygon traced by a round tube, with each corner rounded by a
//! torus segment.

mod ring;
mod tessellate;

pub use ring::{CsgOp, PolygonRing, PolygonRingSpec, RingFill, TorusSegment, TubeEdge};
pub use tessellate::Tessellation;

use thiserror::Error;

/// Errors that can occur while generating a shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type ShapeResult<T> = Result<T, ShapeError>;

pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> ShapeError {
    ShapeError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}
