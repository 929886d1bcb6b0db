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

//! Paired label/photo transforms.
//!
//! Spatial operations (resize, crop, flip) are applied identically to both
//! images of a pair; color normalization only ever touches the photo.

use crate::core::{error::CityscapesError, random, tensor::Tensor};
use crate::data::preprocessing::{normalize_photo, NormalizeMode};

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Shorter-side size used before the random crop when jitter is enabled.
pub const JITTER_RESIZE: u32 = 286;

/// Probability that a pair is mirrored when horizontal flip is enabled.
pub const FLIP_PROBABILITY: f64 = 0.5;

const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Maps a `(label, photo)` image pair to a `(label, photo)` tensor pair.
pub trait PairedTransform: Send + Sync {
    fn apply(
        &self,
        label: DynamicImage,
        photo: DynamicImage,
        rng: &mut dyn RngCore,
    ) -> Result<(Tensor, Tensor), CityscapesError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransformConfig {
    pub image_size: u32,
    pub jitter: bool,
    pub normalize_mode: NormalizeMode,
    pub horizontal_flip: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            image_size: 256,
            jitter: true,
            normalize_mode: NormalizeMode::Tanh,
            horizontal_flip: true,
        }
    }
}

impl TransformConfig {
    pub fn validate(&self) -> Result<(), CityscapesError> {
        if self.image_size == 0 {
            return Err(CityscapesError::InvalidConfiguration(
                "image_size must be greater than 0".into(),
            ));
        }

        if self.jitter && self.image_size > JITTER_RESIZE {
            return Err(CityscapesError::InvalidConfiguration(format!(
                "image_size {} cannot be cropped out of a {} jitter resize",
                self.image_size, JITTER_RESIZE
            )));
        }

        Ok(())
    }
}

/// Picks the transform implementation matching `config`.
///
/// Without jitter or flip there is nothing random left to do, so the
/// deterministic [`ResizeOnly`] is returned.
pub fn build_transform(
    config: &TransformConfig,
) -> Result<Box<dyn PairedTransform>, CityscapesError> {
    config.validate()?;

    if !config.jitter && !config.horizontal_flip {
        return Ok(Box::new(ResizeOnly::new(
            config.image_size,
            config.normalize_mode,
        )?));
    }

    Ok(Box::new(SynchronizedJitter::new(config.clone())?))
}

/// Resize, random crop and random horizontal flip shared by both images,
/// followed by photo normalization.
pub struct SynchronizedJitter {
    config: TransformConfig,
}

impl SynchronizedJitter {
    pub fn new(config: TransformConfig) -> Result<Self, CityscapesError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }
}

impl PairedTransform for SynchronizedJitter {
    fn apply(
        &self,
        label: DynamicImage,
        photo: DynamicImage,
        rng: &mut dyn RngCore,
    ) -> Result<(Tensor, Tensor), CityscapesError> {
        ensure_same_size(&label, &photo)?;
        let size = self.config.image_size;

        let (mut label, mut photo) = if self.config.jitter {
            let (label, photo) = resize_shorter_side_pair(&label, &photo, JITTER_RESIZE)?;
            random_crop_pair(&label, &photo, size, rng)?
        } else {
            resize_exact_pair(&label, &photo, size)
        };

        if self.config.horizontal_flip && random::bernoulli(rng, FLIP_PROBABILITY) {
            label = label.fliph();
            photo = photo.fliph();
        }

        to_tensor_pair(&label, &photo, self.config.normalize_mode)
    }

    fn name(&self) -> &str {
        "SynchronizedJitter"
    }
}

/// Deterministic square resize with photo normalization.
pub struct ResizeOnly {
    image_size: u32,
    normalize_mode: NormalizeMode,
}

impl ResizeOnly {
    pub fn new(image_size: u32, normalize_mode: NormalizeMode) -> Result<Self, CityscapesError> {
        if image_size == 0 {
            return Err(CityscapesError::InvalidConfiguration(
                "image_size must be greater than 0".into(),
            ));
        }
        Ok(Self {
            image_size,
            normalize_mode,
        })
    }
}

impl PairedTransform for ResizeOnly {
    fn apply(
        &self,
        label: DynamicImage,
        photo: DynamicImage,
        _rng: &mut dyn RngCore,
    ) -> Result<(Tensor, Tensor), CityscapesError> {
        ensure_same_size(&label, &photo)?;
        let (label, photo) = resize_exact_pair(&label, &photo, self.image_size);
        to_tensor_pair(&label, &photo, self.normalize_mode)
    }

    fn name(&self) -> &str {
        "ResizeOnly"
    }
}

/// Tensor conversion only; the images keep their on-disk size.
#[derive(Default)]
pub struct Identity {
    normalize_mode: NormalizeMode,
}

impl Identity {
    pub fn new(normalize_mode: NormalizeMode) -> Self {
        Self { normalize_mode }
    }

    /// Raw [0, 1] tensors for both images.
    pub fn raw() -> Self {
        Self::new(NormalizeMode::ZeroOne)
    }
}

impl PairedTransform for Identity {
    fn apply(
        &self,
        label: DynamicImage,
        photo: DynamicImage,
        _rng: &mut dyn RngCore,
    ) -> Result<(Tensor, Tensor), CityscapesError> {
        ensure_same_size(&label, &photo)?;
        to_tensor_pair(&label, &photo, self.normalize_mode)
    }

    fn name(&self) -> &str {
        "Identity"
    }
}

fn ensure_same_size(label: &DynamicImage, photo: &DynamicImage) -> Result<(), CityscapesError> {
    if label.dimensions() != photo.dimensions() {
        return Err(CityscapesError::ShapeMismatch(format!(
            "label is {:?} but photo is {:?}",
            label.dimensions(),
            photo.dimensions()
        )));
    }
    Ok(())
}

/// Target size when the shorter side of `(width, height)` becomes `target`.
pub fn shorter_side_size(
    width: u32,
    height: u32,
    target: u32,
) -> Result<(u32, u32), CityscapesError> {
    let scale = |long: u32, short: u32| {
        u32::try_from(u64::from(target) * u64::from(long) / u64::from(short.max(1))).map_err(
            |_| {
                CityscapesError::MalformedImage(format!(
                    "Cannot resize {}x{} to shorter side {}",
                    width, height, target
                ))
            },
        )
    };
    if width <= height {
        Ok((target, scale(height, width)?))
    } else {
        Ok((scale(width, height)?, target))
    }
}

pub fn resize_shorter_side_pair(
    label: &DynamicImage,
    photo: &DynamicImage,
    target: u32,
) -> Result<(DynamicImage, DynamicImage), CityscapesError> {
    let (width, height) = shorter_side_size(photo.width(), photo.height(), target)?;
    Ok((
        label.resize_exact(width, height, RESIZE_FILTER),
        photo.resize_exact(width, height, RESIZE_FILTER),
    ))
}

pub fn resize_exact_pair(
    label: &DynamicImage,
    photo: &DynamicImage,
    size: u32,
) -> (DynamicImage, DynamicImage) {
    (
        label.resize_exact(size, size, RESIZE_FILTER),
        photo.resize_exact(size, size, RESIZE_FILTER),
    )
}

/// Crops the same `size x size` window out of both images.
pub fn random_crop_pair(
    label: &DynamicImage,
    photo: &DynamicImage,
    size: u32,
    rng: &mut dyn RngCore,
) -> Result<(DynamicImage, DynamicImage), CityscapesError> {
    let (width, height) = photo.dimensions();
    if width < size || height < size {
        return Err(CityscapesError::ShapeMismatch(format!(
            "Crop size {} larger than input size {}x{}",
            size, width, height
        )));
    }

    let top = random::offset(rng, height - size);
    let left = random::offset(rng, width - size);

    Ok((
        label.crop_imm(left, top, size, size),
        photo.crop_imm(left, top, size, size),
    ))
}

fn to_tensor_pair(
    label: &DynamicImage,
    photo: &DynamicImage,
    mode: NormalizeMode,
) -> Result<(Tensor, Tensor), CityscapesError> {
    let label_tensor = Tensor::from_rgb_image(&label.to_rgb8());
    let photo_tensor = Tensor::from_rgb_image(&photo.to_rgb8());
    let photo_tensor = normalize_photo(&photo_tensor, mode)?;
    Ok((label_tensor, photo_tensor))
}
