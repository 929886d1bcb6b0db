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
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Split name to the ordered list of original filenames (e.g. `"1.jpg"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitIndex {
    splits: BTreeMap<String, Vec<String>>,
}

impl SplitIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from discovered source paths, keeping only file names.
    pub fn from_paths(splits: &BTreeMap<String, Vec<PathBuf>>) -> Self {
        let splits = splits
            .iter()
            .map(|(split, paths)| {
                let names = paths
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
                    .collect();
                (split.clone(), names)
            })
            .collect();
        SplitIndex { splits }
    }

    pub fn insert(&mut self, split: impl Into<String>, files: Vec<String>) {
        self.splits.insert(split.into(), files);
    }

    pub fn files(&self, split: &str) -> Option<&[String]> {
        self.splits.get(split).map(Vec::as_slice)
    }

    pub fn split_names(&self) -> impl Iterator<Item = &str> {
        self.splits.keys().map(String::as_str)
    }

    pub fn count(&self, split: &str) -> usize {
        self.files(split).map_or(0, <[String]>::len)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CityscapesError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CityscapesError::FileNotFound(path.to_path_buf()),
            _ => CityscapesError::from(e),
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Writes pretty-printed JSON with a four-space indent and no trailing newline.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CityscapesError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)?;
        writer.flush()?;
        Ok(())
    }
}
