// Copyright @yucwang 2021

pub mod conductor;
pub mod dielectric;
pub mod diffuse;
pub mod emissive;
pub mod fresnel;
pub mod microfacet;
pub mod mirror;
