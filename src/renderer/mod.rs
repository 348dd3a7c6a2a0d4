//! Rendering: immediate-mode draw recording and the WebGPU backend
//!
//! The game records rectangles and text into [`ImmediateDraw`]; submitting
//! produces a [`RenderPass`] that [`RenderState`] uploads and draws.

pub mod glyphs;
pub mod immediate;
pub mod pipeline;
pub mod vertex;

pub use immediate::{Batch, Color, DrawCommand, ImmediateDraw, Primitive, RenderPass};
pub use pipeline::RenderState;
pub use vertex::Vertex;
