//! # housescene
//!
//! An interactive 3D renderer that draws a small textured brick house with a
//! roof on a sky-blue background, rotating about its vertical axis in real
//! time. Geometry and textures are uploaded once at startup; the scene then
//! repaints every frame until the window is closed.
//!
//! The interesting machinery is the rendering pipeline driver in
//! [`renderer`] and the row-major matrix kernel in [`math`] that feeds it.
//! Windowing, image decoding, and shader-file reading are thin glue over
//! winit, image, and std.

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod gpu;
pub mod math;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod texture;

pub use app::App;
pub use clock::{AnimationClock, AnimationFrame};
pub use config::Config;
pub use error::{Error, ShaderStage};
pub use gpu::GpuContext;
pub use math::{Mat4, cross, deg_to_rad, normalize};
pub use mesh::{Mesh, StripSegment, Vertex};
pub use renderer::{Renderer, VertexShaderOverrides};
pub use texture::Texture;
