// Copyright @yucwang 2021

use nalgebra as na;

pub type Float = f32;
pub type Int = i32;
pub type UInt = u32;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = 3.14159265359;
pub const INV_PI: Float = 0.31830988618;
pub const TWO_PI: Float = 6.28318530718;

pub const FLOAT_MAX: Float = std::f32::MAX;
pub const FLOAT_MIN: Float = -std::f32::MAX;

// Offset applied when spawning rays off a surface, and the minimum t of the
// spawned ray. Keeps secondary rays from re-hitting their origin primitive.
pub const RAY_EPSILON: Float = 1e-4;

// Largest f32 strictly below 1.0, used to keep CDF inversion in range.
pub const ONE_MINUS_EPSILON: Float = 0.99999994;
