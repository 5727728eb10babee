//! Canvas 2D rendering module
//!
//! Draws the per-tick `Frame` with flat-colored rectangles.

pub mod canvas;

pub use canvas::CanvasRenderer;
