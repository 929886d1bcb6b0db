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

//! Cityscapes paired-image preparation and loading.
//!
//! - [`data::splitter`] splits concatenated `photo|label` images and writes
//!   the train/val split index.
//! - [`data::augmentation`] holds the paired transforms: spatial changes are
//!   shared by both images, color normalization touches only the photo.
//! - [`data::dataset`] resolves split index entries to processed files and
//!   returns transformed [`data::dataset::PairedSample`]s.

pub mod core;
pub mod data;
pub mod utilities;

pub use crate::core::error::CityscapesError;
pub use crate::core::tensor::Tensor;
pub use crate::data::augmentation::{build_transform, PairedTransform, TransformConfig};
pub use crate::data::dataset::{CityscapesDataset, Dataset, PairedSample};
pub use crate::data::preprocessing::NormalizeMode;
pub use crate::data::split_index::SplitIndex;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = "Cityscapes Pairs";

pub fn get_version() -> &'static str {
    VERSION
}

pub fn get_name() -> &'static str {
    NAME
}
