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

use crate::core::error::CityscapesError;
use image::RgbImage;

/// Dense `f32` tensor stored in row-major order.
///
/// Images are held channel-first, `[channels, height, width]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl Tensor {
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Self {
        let size: usize = shape.iter().product();
        assert_eq!(data.len(), size, "Data size does not match shape");

        Tensor { data, shape }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        let size = shape.iter().product();
        Tensor::new(vec![0.0; size], shape.to_vec())
    }

    /// Converts an RGB image to a `[3, H, W]` tensor scaled to [0, 1].
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let (width, height) = (width as usize, height as usize);
        let plane = width * height;
        let mut data = vec![0.0; 3 * plane];

        for (x, y, pixel) in image.enumerate_pixels() {
            let offset = y as usize * width + x as usize;
            for channel in 0..3 {
                data[channel * plane + offset] = f32::from(pixel[channel]) / 255.0;
            }
        }

        Tensor::new(data, vec![3, height, width])
    }

    // Data access methods
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    // Calculate stride for the current shape
    pub fn stride(&self) -> Vec<usize> {
        let mut stride = Vec::with_capacity(self.shape.len());
        let mut current_stride = 1;
        for &dim in self.shape.iter().rev() {
            stride.push(current_stride);
            current_stride *= dim;
        }
        stride.reverse();
        stride
    }

    /// Height and width of a channel-first image tensor.
    pub fn spatial_dims(&self) -> Result<(usize, usize), CityscapesError> {
        match self.shape[..] {
            [_, height, width] => Ok((height, width)),
            _ => Err(CityscapesError::ShapeMismatch(format!(
                "Expected a [C, H, W] tensor, got shape {:?}",
                self.shape
            ))),
        }
    }

    /// Value at `(channel, row, col)` of a channel-first image tensor.
    pub fn at(&self, channel: usize, row: usize, col: usize) -> Option<f32> {
        if self.shape.len() != 3
            || channel >= self.shape[0]
            || row >= self.shape[1]
            || col >= self.shape[2]
        {
            return None;
        }

        let strides = self.stride();
        self.data
            .get(channel * strides[0] + row * strides[1] + col)
            .copied()
    }

    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Tensor {
        Tensor::new(
            self.data.iter().map(|&x| f(x)).collect(),
            self.shape.clone(),
        )
    }
}
