// Copyright @yucwang 2021

use crate::core::material::Material;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use std::sync::Arc;

/// A ray/surface hit record. Normals are true outward normals of the shape,
/// never flipped toward the ray, so materials can tell which side of the
/// interface the query direction lies on.
#[derive(Clone)]
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    sh_normal: Vector3f,
    uv: Vector2f,
    t: Float,
    material: Option<Arc<dyn Material>>,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_geo_normal: Vector3f,
               new_sh_normal: Vector3f,
               new_uv: Vector2f,
               new_t: Float) -> Self {
        Self { p: new_p, geo_normal: new_geo_normal, sh_normal: new_sh_normal,
               uv: new_uv, t: new_t, material: None }
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn sh_normal(&self) -> Vector3f {
        self.sh_normal
    }

    pub fn uv(&self) -> Vector2f {
        self.uv
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }

    pub fn with_material(&self, new_material: Arc<dyn Material>) -> Self {
        Self {
            p: self.p,
            geo_normal: self.geo_normal,
            sh_normal: self.sh_normal,
            uv: self.uv,
            t: self.t,
            material: Some(new_material),
        }
    }
}
