//! Geometry primitives returned by viewport queries

mod rect;
mod size;

pub use rect::{round_half_up, ClientRect, LayoutRect};
pub use size::Size;
