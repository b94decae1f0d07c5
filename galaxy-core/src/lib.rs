//! Procedural spiral-galaxy point cloud library.
//!
//! Main components:
//! - [`config`] - generation parameters and panel control ranges.
//! - [`store`] - live parameters and change-completion tracking.
//! - [`generator`] - the star placement algorithm.
//! - [`point_cloud`] - index-aligned position and colour buffers.
//! - [`galaxy`] - the displayed cloud and its rotation.
//! - [`camera`] - damped orbit camera and projection.
//! - [`viewport`] - drawing area size and pixel ratio.
//! - [`color`] - RGB colour type.

pub mod camera;
pub mod color;
pub mod config;
pub mod galaxy;
pub mod generator;
pub mod point_cloud;
pub mod store;
pub mod viewport;
