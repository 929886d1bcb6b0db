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

use crate::core::{error::CityscapesError, tensor::Tensor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait Preprocessor: Send + Sync {
    fn process(&self, tensor: &Tensor) -> Result<Tensor, CityscapesError>;
}

/// Per-channel `(x - mean) / std` over a `[C, H, W]` tensor.
pub struct Normalize {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl Normalize {
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Result<Self, CityscapesError> {
        if mean.len() != std.len() {
            return Err(CityscapesError::InvalidConfiguration(format!(
                "mean has {} channels but std has {}",
                mean.len(),
                std.len()
            )));
        }
        if std.iter().any(|&s| s == 0.0) {
            return Err(CityscapesError::InvalidConfiguration(
                "std must be non-zero".into(),
            ));
        }
        Ok(Normalize { mean, std })
    }
}

impl Preprocessor for Normalize {
    fn process(&self, tensor: &Tensor) -> Result<Tensor, CityscapesError> {
        let [channels, height, width] = tensor.shape()[..] else {
            return Err(CityscapesError::ShapeMismatch(format!(
                "Normalize expects a [C, H, W] tensor, got {:?}",
                tensor.shape()
            )));
        };

        if channels != self.mean.len() {
            return Err(CityscapesError::ShapeMismatch(format!(
                "Normalize configured for {} channels, tensor has {}",
                self.mean.len(),
                channels
            )));
        }

        let plane = height * width;
        let mut normalized = tensor.data().to_vec();
        for c in 0..channels {
            for value in &mut normalized[c * plane..(c + 1) * plane] {
                *value = (*value - self.mean[c]) / self.std[c];
            }
        }

        Ok(Tensor::new(normalized, tensor.shape().to_vec()))
    }
}

/// Intensity range the photo tensor is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizeMode {
    /// [0, 1] remapped to [-1, 1], matching a tanh-activated generator.
    #[default]
    #[serde(rename = "tanh")]
    Tanh,
    /// Left in [0, 1].
    #[serde(rename = "01")]
    ZeroOne,
}

impl NormalizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizeMode::Tanh => "tanh",
            NormalizeMode::ZeroOne => "01",
        }
    }
}

impl FromStr for NormalizeMode {
    type Err = CityscapesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tanh" => Ok(NormalizeMode::Tanh),
            "01" => Ok(NormalizeMode::ZeroOne),
            other => Err(CityscapesError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for NormalizeMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn normalize_photo(tensor: &Tensor, mode: NormalizeMode) -> Result<Tensor, CityscapesError> {
    match mode {
        NormalizeMode::Tanh => {
            let channels = tensor.shape().first().copied().unwrap_or(0);
            Normalize::new(vec![0.5; channels], vec![0.5; channels])?.process(tensor)
        }
        NormalizeMode::ZeroOne => Ok(tensor.clone()),
    }
}

/// Inverse of [`normalize_photo`]: maps a normalized photo back to [0, 1].
pub fn denormalize_photo(tensor: &Tensor, mode: NormalizeMode) -> Tensor {
    match mode {
        NormalizeMode::Tanh => tensor.map(|v| v * 0.5 + 0.5),
        NormalizeMode::ZeroOne => tensor.clone(),
    }
}
