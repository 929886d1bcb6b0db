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

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CityscapesError {
    // Configuration errors
    SplitNotFound { split: String, index: PathBuf },
    UnsupportedMode(String),
    InvalidConfiguration(String),

    // Input errors
    MissingDirectory(PathBuf),
    NoImagesFound(PathBuf),
    MalformedImage(String),
    ShapeMismatch(String),

    // Missing processed artifacts
    FileNotFound(PathBuf),

    // Range errors
    IndexOutOfBounds { index: usize, len: usize },

    IOError(String),
    ImageError(String),
    SerializationError(String),
    LockError,
}

impl Error for CityscapesError {}

impl fmt::Display for CityscapesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CityscapesError::SplitNotFound { split, index } => write!(
                f,
                "Split '{}' not found in {}",
                split,
                index.display()
            ),
            CityscapesError::UnsupportedMode(mode) => {
                write!(f, "Unsupported normalize mode: {}", mode)
            }
            CityscapesError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            CityscapesError::MissingDirectory(path) => {
                write!(f, "Missing split directory: {}", path.display())
            }
            CityscapesError::NoImagesFound(path) => {
                write!(f, "No jpg files found in {}", path.display())
            }
            CityscapesError::MalformedImage(msg) => write!(f, "Malformed input image: {}", msg),
            CityscapesError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            CityscapesError::FileNotFound(path) => {
                write!(f, "File not found: {}", path.display())
            }
            CityscapesError::IndexOutOfBounds { index, len } => write!(
                f,
                "Index out of bounds: index {} but dataset has {} samples",
                index, len
            ),
            CityscapesError::IOError(err) => write!(f, "IO error: {}", err),
            CityscapesError::ImageError(msg) => write!(f, "Image error: {}", msg),
            CityscapesError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            CityscapesError::LockError => write!(f, "Lock error"),
        }
    }
}

impl From<std::io::Error> for CityscapesError {
    fn from(error: std::io::Error) -> Self {
        CityscapesError::IOError(error.to_string())
    }
}

impl From<image::ImageError> for CityscapesError {
    fn from(error: image::ImageError) -> Self {
        CityscapesError::ImageError(error.to_string())
    }
}

impl From<serde_json::Error> for CityscapesError {
    fn from(error: serde_json::Error) -> Self {
        CityscapesError::SerializationError(error.to_string())
    }
}

impl From<serde_yaml::Error> for CityscapesError {
    fn from(error: serde_yaml::Error) -> Self {
        CityscapesError::SerializationError(error.to_string())
    }
}

impl From<glob::PatternError> for CityscapesError {
    fn from(error: glob::PatternError) -> Self {
        CityscapesError::IOError(format!("Invalid glob pattern: {}", error))
    }
}

impl From<glob::GlobError> for CityscapesError {
    fn from(error: glob::GlobError) -> Self {
        CityscapesError::IOError(format!(
            "Cannot read {}: {}",
            error.path().display(),
            error.error()
        ))
    }
}

impl CityscapesError {
    /// True for errors caused by a bad setup rather than bad input data.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CityscapesError::SplitNotFound { .. }
                | CityscapesError::UnsupportedMode(_)
                | CityscapesError::InvalidConfiguration(_)
        )
    }
}
