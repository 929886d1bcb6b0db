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

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;

pub const PHOTO_COLOR: [u8; 3] = [200, 40, 40];

/// Concatenated `photo|label` image: a flat photo half and a position-coded
/// label half, so label pixels can be checked exactly.
pub fn concatenated_image(width: u32, height: u32) -> RgbImage {
    let mid = width / 2;
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = if x < mid {
            Rgb(PHOTO_COLOR)
        } else {
            label_pixel(x - mid, y)
        };
    }
    img
}

pub fn label_pixel(x: u32, y: u32) -> Rgb<u8> {
    Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90])
}

/// Writes a concatenated source image; the extension picks the encoder.
pub fn write_source(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    concatenated_image(width, height).save(path).unwrap();
}

/// Raw layout with the given file names under `train/` and `val/`.
pub fn raw_layout(raw_dir: &Path, train: &[&str], val: &[&str], width: u32, height: u32) {
    for name in train {
        write_source(&raw_dir.join("train").join(name), width, height);
    }
    for name in val {
        write_source(&raw_dir.join("val").join(name), width, height);
    }
}

/// Dark image with a bright 2x2 marker in its top-left corner.
pub fn marker_image(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([10, 10, 10]));
    for y in 0..2.min(height) {
        for x in 0..2.min(width) {
            img.put_pixel(x, y, Rgb([250, 250, 250]));
        }
    }
    img
}
