//! WebGPU rendering module
//!
//! Draws the scene as colored line segments.

pub mod lines;
pub mod pipeline;
pub mod vertex;

pub use lines::scene_vertices;
pub use pipeline::LineRenderState;
pub use vertex::Vertex;
