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

use crate::core::{error::CityscapesError, random, tensor::Tensor};
use crate::data::augmentation::{build_transform, Identity, PairedTransform};
use crate::data::split_index::SplitIndex;
use crate::data::splitter::{label_path, photo_path, stem_of};
use crate::utilities::config::Configuration;

use image::DynamicImage;
use rand::{rngs::StdRng, RngCore};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Trait defining the interface for datasets
pub trait Dataset: Send + Sync {
    type Sample;

    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Result<Self::Sample, CityscapesError>;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One label/photo pair together with its original file name.
#[derive(Debug, Clone)]
pub struct PairedSample {
    pub label: Tensor,
    pub photo: Tensor,
    pub name: String,
}

/// Paired Cityscapes samples read from `{root}/processed/{split}/{photo,label}`.
///
/// Sample `i` is the `i`-th file name registered for `split` in the split
/// index. Every registered name must have a processed photo and label sharing
/// its stem; [`CityscapesDataset::verify`] checks this up front, otherwise a
/// missing file surfaces as [`CityscapesError::FileNotFound`] on access.
pub struct CityscapesDataset {
    root: PathBuf,
    split: String,
    files: Vec<String>,
    processed_dir: PathBuf,
    transform: Box<dyn PairedTransform>,
    rng: Mutex<StdRng>,
}

impl CityscapesDataset {
    /// Without a transform, samples are raw [0, 1] tensors at on-disk size.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        root: P,
        split: &str,
        split_index: Q,
        transform: Option<Box<dyn PairedTransform>>,
    ) -> Result<Self, CityscapesError> {
        let split_index = split_index.as_ref();
        let index = SplitIndex::load(split_index)?;
        let files = index
            .files(split)
            .ok_or_else(|| CityscapesError::SplitNotFound {
                split: split.to_string(),
                index: split_index.to_path_buf(),
            })?
            .to_vec();

        let root = root.as_ref().to_path_buf();
        let processed_dir = root.join("processed");

        Ok(CityscapesDataset {
            root,
            split: split.to_string(),
            files,
            processed_dir,
            transform: match transform {
                Some(transform) => transform,
                None => Box::new(Identity::raw()),
            },
            rng: Mutex::new(random::from_entropy()),
        })
    }

    /// Opens `split` with the index at `config.prepare.split_file`, the
    /// transform built from `config.transform` and, if set, `config.seed`.
    pub fn from_config<P: AsRef<Path>>(
        root: P,
        split: &str,
        config: &Configuration,
    ) -> Result<Self, CityscapesError> {
        let transform = build_transform(&config.transform)?;
        let dataset = Self::new(root, split, &config.prepare.split_file, Some(transform))?;
        Ok(match config.seed {
            Some(seed) => dataset.with_seed(seed),
            None => dataset,
        })
    }

    /// Reseeds the generator used by [`Dataset::get`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(random::seeded(seed));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn split(&self) -> &str {
        &self.split
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn transform_name(&self) -> &str {
        self.transform.name()
    }

    pub fn name(&self, index: usize) -> Result<&str, CityscapesError> {
        self.files
            .get(index)
            .map(String::as_str)
            .ok_or(CityscapesError::IndexOutOfBounds {
                index,
                len: self.files.len(),
            })
    }

    pub fn photo_path(&self, index: usize) -> Result<PathBuf, CityscapesError> {
        let stem = stem_of(Path::new(self.name(index)?))?;
        Ok(photo_path(&self.processed_dir, &self.split, &stem))
    }

    pub fn label_path(&self, index: usize) -> Result<PathBuf, CityscapesError> {
        let stem = stem_of(Path::new(self.name(index)?))?;
        Ok(label_path(&self.processed_dir, &self.split, &stem))
    }

    /// Checks that every registered sample has both processed files.
    pub fn verify(&self) -> Result<(), CityscapesError> {
        for index in 0..self.files.len() {
            for path in [self.photo_path(index)?, self.label_path(index)?] {
                if !path.is_file() {
                    warn!(split = self.split.as_str(), path = %path.display(), "processed file missing");
                    return Err(CityscapesError::FileNotFound(path));
                }
            }
        }
        Ok(())
    }

    /// Loads sample `index`, drawing augmentation randomness from `rng`.
    pub fn get_with_rng(
        &self,
        index: usize,
        rng: &mut dyn RngCore,
    ) -> Result<PairedSample, CityscapesError> {
        let name = self.name(index)?.to_string();
        let photo = load_rgb(&self.photo_path(index)?)?;
        let label = load_rgb(&self.label_path(index)?)?;

        let (label, photo) = self.transform.apply(label, photo, rng)?;

        Ok(PairedSample { label, photo, name })
    }
}

impl Dataset for CityscapesDataset {
    type Sample = PairedSample;

    fn len(&self) -> usize {
        self.files.len()
    }

    fn get(&self, index: usize) -> Result<PairedSample, CityscapesError> {
        let mut rng = self.rng.lock().map_err(|_| CityscapesError::LockError)?;
        self.get_with_rng(index, &mut *rng)
    }
}

fn load_rgb(path: &Path) -> Result<DynamicImage, CityscapesError> {
    if !path.is_file() {
        return Err(CityscapesError::FileNotFound(path.to_path_buf()));
    }
    Ok(DynamicImage::ImageRgb8(image::open(path)?.to_rgb8()))
}
