// Copyright @yucwang 2021

use crate::core::interaction::SurfaceIntersection;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobeFlag(u8);

impl LobeFlag {
    pub const NONE: Self = Self(0);
    pub const REFLECTION: Self = Self(1 << 0);
    pub const TRANSMISSION: Self = Self(1 << 1);
    pub const DIFFUSE: Self = Self(1 << 2);
    pub const GLOSSY: Self = Self(1 << 3);
    pub const SPECULAR: Self = Self(1 << 4);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn is_specular(self) -> bool {
        self.contains(Self::SPECULAR)
    }
}

impl std::ops::BitOr for LobeFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for LobeFlag {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Direction of light transport through a scattering event. Non-symmetric
/// scattering (refraction) scales differently for camera paths and light
/// paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Radiance,
    Importance,
}

/// Result of importance-sampling a material at a surface point. All
/// directions are in world space and point away from the surface.
#[derive(Debug, Clone, Copy)]
pub struct BSDFSample {
    pub wi: Vector3f,
    /// BSDF value along `wi`. For specular lobes this already folds in the
    /// discrete probability and the cosine term.
    pub f: RGBSpectrum,
    /// Solid-angle density of `wi`, or the discrete lobe probability for
    /// specular samples.
    pub pdf: Float,
    pub flags: LobeFlag,
}

impl BSDFSample {
    pub fn is_specular(&self) -> bool {
        self.flags.is_specular()
    }
}

pub trait Material: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Evaluates the BSDF for the world-space pair (wo, wi). Specular lobes
    /// evaluate to black.
    fn eval(&self, its: &SurfaceIntersection, wo: &Vector3f, wi: &Vector3f,
            mode: TransportMode) -> RGBSpectrum;

    /// Draws a scattered direction. `u` drives the directional sample and
    /// `u_lobe` the discrete lobe choice for materials with more than one
    /// lobe. Returns `None` when the sample carries no energy.
    fn sample(&self, its: &SurfaceIntersection, wo: &Vector3f,
              u: &Vector2f, u_lobe: Float,
              mode: TransportMode) -> Option<BSDFSample>;

    /// Solid-angle density that `sample` produces `wi` given `wo`. Zero for
    /// specular lobes.
    fn pdf(&self, its: &SurfaceIntersection, wo: &Vector3f, wi: &Vector3f) -> Float;

    /// Radiance emitted toward `wo`. Black for non-emissive materials.
    fn emitted(&self, _its: &SurfaceIntersection, _wo: &Vector3f) -> RGBSpectrum {
        RGBSpectrum::default()
    }

    /// True when every lobe of this material is a delta distribution.
    fn is_specular(&self) -> bool {
        false
    }
}
