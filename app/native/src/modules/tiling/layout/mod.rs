//! Layout geometry.
//!
//! Pure functions turning a screen frame into target rectangles.

pub mod geometry;

pub use geometry::{LayoutGeometry, LayoutResult};
