//! Celestial sphere engine: bright-star catalog positions, sky rotation over time, brightness
//! grouping, reference grid and ground, and the camera that ties them into a frame.
pub mod catalog;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod grouping;
pub mod parse_stars;
pub mod sky;
