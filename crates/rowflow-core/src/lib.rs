#![forbid(unsafe_code)]

//! Core: real-valued geometry primitives for row-flow layout.

pub mod geometry;

pub use geometry::{Rect, Size};
