//! Core types: math re-exports, Transform, World, game time and tweening.

pub use glam::{EulerRot, Mat4, Quat, Vec3, vec3};

pub mod ecs;
pub mod error;
pub mod time;
pub mod transform;
pub mod tween;

pub use error::{CoreError, CoreResult};
