// Copyright (C) 2025 Bellande Artificial Intelligence Computer Vision Research Innovation Center, Ronaldson Bellande

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Explicit randomness sources for augmentation.
//!
//! Nothing here keeps process-wide state: every draw goes through a generator
//! owned by the caller, so a fixed seed reproduces the same crops and flips.

use rand::prelude::*;
use rand_distr::Bernoulli;

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Single Bernoulli draw. `p` is clamped to [0, 1].
pub fn bernoulli<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    match Bernoulli::new(p.clamp(0.0, 1.0)) {
        Ok(dist) => dist.sample(rng),
        Err(_) => false,
    }
}

/// Uniform offset in `0..=max_offset`.
pub fn offset<R: Rng + ?Sized>(rng: &mut R, max_offset: u32) -> u32 {
    rng.gen_range(0..=max_offset)
}
