// Software rasterization into in-memory pixel buffers, plus distance fields
// derived from binary masks by jump flooding.
//
// Flow: a mesh feeds screen-space triangles to the rasterizers, which write a
// `ColorBuffer`; that buffer (or a mask built directly) feeds the distance
// field engine, and the result is written out with `bitmap::write`.

pub mod bitmap;
pub mod buffer;
pub mod distance;
pub mod draw;
pub mod error;
pub mod mask;
pub mod mesh;
pub mod preview;
pub mod triangle;
pub mod types;

pub use buffer::{ColorBuffer, PixelBuffer, SeedBuffer};
pub use distance::{DistanceFieldOptions, FieldDirection};
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use types::{Color, Point, Seed};
