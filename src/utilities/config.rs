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
use crate::data::augmentation::TransformConfig;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Configuration {
    // Preprocessing run
    pub prepare: PrepareConfig,

    // Paired transform used when loading samples
    pub transform: TransformConfig,

    // Seed for the dataset accessor's generator
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PrepareConfig {
    pub raw_dir: PathBuf,
    pub out_dir: PathBuf,
    pub split_file: PathBuf,
    pub overwrite: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        PrepareConfig {
            raw_dir: PathBuf::from("data/raw/cityscapes"),
            out_dir: PathBuf::from("data/processed"),
            split_file: PathBuf::from("data/splits/cityscapes_split_seed42.json"),
            overwrite: false,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            prepare: PrepareConfig::default(),
            transform: TransformConfig::default(),
            seed: Some(42),
        }
    }
}

impl Configuration {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CityscapesError> {
        let content = fs::read_to_string(path)?;
        let config: Configuration = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CityscapesError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CityscapesError> {
        self.transform.validate()?;

        if self.prepare.raw_dir.as_os_str().is_empty() {
            return Err(CityscapesError::InvalidConfiguration(
                "raw_dir cannot be empty".into(),
            ));
        }

        if self.prepare.out_dir.as_os_str().is_empty() {
            return Err(CityscapesError::InvalidConfiguration(
                "out_dir cannot be empty".into(),
            ));
        }

        if self.prepare.split_file.file_name().is_none() {
            return Err(CityscapesError::InvalidConfiguration(
                "split_file must name a file".into(),
            ));
        }

        Ok(())
    }
}
