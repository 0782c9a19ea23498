// Copyright @yucwang 2021

use super::constants::Vector3f;

/// Orthonormal shading frame. `z` is the (shading) normal; `x`/`y` span the
/// tangent plane.
#[derive(Debug, Copy, Clone)]
pub struct Frame {
    pub x: Vector3f,
    pub y: Vector3f,
    pub z: Vector3f,
}

impl Frame {
    pub fn new(x: Vector3f, y: Vector3f, z: Vector3f) -> Self {
        Self { x, y, z }
    }

    pub fn from_normal(n: &Vector3f) -> Self {
        let (tangent, bitangent) = build_tangent_frame(n);
        Self { x: tangent, y: bitangent, z: *n }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        v.x * self.x + v.y * self.y + v.z * self.z
    }
}

pub fn build_tangent_frame(n: &Vector3f) -> (Vector3f, Vector3f) {
    let up = if n.z.abs() < 0.999 {
        Vector3f::new(0.0, 0.0, 1.0)
    } else {
        Vector3f::new(1.0, 0.0, 0.0)
    };
    let tangent = n.cross(&up).normalize();
    let bitangent = n.cross(&tangent).normalize();
    (tangent, bitangent)
}
