//! Drawing the celestial sphere: reference grid and ground, camera, and the per-frame
//! composition that ties them to the star batches.
pub mod grid;
pub mod orientation;
pub mod renderer;
pub mod surface;

pub use renderer::SkyRenderer;
