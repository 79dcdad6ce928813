//! Camera system for the 3D scene.
//!
//! Provides a perspective camera with screen-ray casting and projection,
//! and a damped orbit controller that frames a bounding sphere.

/// Damped orbit controller: rotation, pan, zoom, framing.
pub mod controller;
/// Core camera struct, rays and screen projection.
pub mod core;

pub use controller::OrbitController;
pub use core::{Camera, Ray};
