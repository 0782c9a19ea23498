// Copyright @yucwang 2021

use crate::math::constants::{ Float, ONE_MINUS_EPSILON };

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    /// Uniform draw in [0, 1). The widest u32 values round up to 1.0 in f32,
    /// so the result is clamped below 1.
    pub fn next_f32(&mut self) -> Float {
        ((self.next_u32() as Float) * (1.0 / 4294967296.0)).min(ONE_MINUS_EPSILON)
    }
}
