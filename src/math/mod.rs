// Copyright @yucwang 2021

pub mod aabb;
pub mod bitmap;
pub mod constants;
pub mod distribution;
pub mod frame;
pub mod ray;
pub mod spectrum;
pub mod warp;
