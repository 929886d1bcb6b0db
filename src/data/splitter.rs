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

//! Splits concatenated `photo|label` images into separate files.
//!
//! Raw layout: `{raw_dir}/{train,val}/*.jpg`, each image holding the photo in
//! its left half and the label in its right half.
//! Processed layout: `{out_dir}/{split}/photo/{stem}_photo.jpg` and
//! `{out_dir}/{split}/label/{stem}_label.png`.

use crate::core::error::CityscapesError;
use crate::data::split_index::SplitIndex;
use crate::utilities::progress::ProgressBar;

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Splits that must be present under the raw directory.
pub const SPLITS: [&str; 2] = ["train", "val"];

/// Split name to source image paths, sorted by file name.
pub type SplitFiles = BTreeMap<String, Vec<PathBuf>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    Written,
    Skipped,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub overwrite: bool,
    pub progress: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessReport {
    pub splits: SplitFiles,
    pub written: usize,
    pub skipped: usize,
}

impl ProcessReport {
    pub fn total(&self) -> usize {
        self.splits.values().map(Vec::len).sum()
    }
}

pub fn photo_path(out_dir: &Path, split: &str, stem: &str) -> PathBuf {
    out_dir
        .join(split)
        .join("photo")
        .join(format!("{}_photo.jpg", stem))
}

pub fn label_path(out_dir: &Path, split: &str, stem: &str) -> PathBuf {
    out_dir
        .join(split)
        .join("label")
        .join(format!("{}_label.png", stem))
}

/// File name without its extension, e.g. `"1"` for `"1.jpg"`.
pub fn stem_of(path: &Path) -> Result<String, CityscapesError> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| CityscapesError::MalformedImage(format!("No file stem: {}", path.display())))
}

/// Collects the `*.jpg` files of every split under `raw_dir`.
pub fn collect_files(raw_dir: &Path) -> Result<SplitFiles, CityscapesError> {
    let mut splits = SplitFiles::new();

    for split in SPLITS {
        let split_dir = raw_dir.join(split);
        if !split_dir.is_dir() {
            return Err(CityscapesError::MissingDirectory(split_dir));
        }

        let pattern = format!(
            "{}/*.jpg",
            glob::Pattern::escape(&split_dir.to_string_lossy())
        );
        let mut files = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(CityscapesError::NoImagesFound(split_dir));
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!(split, count = files.len(), "collected source images");
        splits.insert(split.to_string(), files);
    }

    Ok(splits)
}

/// Splits one concatenated image at its horizontal midpoint.
///
/// Both halves are cropped and converted before anything is written. The two
/// writes are not atomic with respect to each other.
pub fn split_and_save(
    source: &Path,
    photo_dest: &Path,
    label_dest: &Path,
    overwrite: bool,
) -> Result<SplitOutcome, CityscapesError> {
    if !overwrite && photo_dest.exists() && label_dest.exists() {
        debug!(source = %source.display(), "processed pair exists, skipping");
        return Ok(SplitOutcome::Skipped);
    }

    let image = image::open(source)?;
    let (width, height) = image.dimensions();
    if width % 2 != 0 {
        return Err(CityscapesError::MalformedImage(format!(
            "Image width {} not divisible by 2: {}",
            width,
            source.display()
        )));
    }

    let (photo, label) = split_halves(&image);

    for dest in [photo_dest, label_dest] {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
    }

    photo.save_with_format(photo_dest, ImageFormat::Jpeg)?;
    label.save_with_format(label_dest, ImageFormat::Png)?;

    debug!(
        source = %source.display(),
        width = width / 2,
        height,
        "wrote photo/label pair"
    );
    Ok(SplitOutcome::Written)
}

/// Left half as the photo, right half as the label, both RGB.
pub fn split_halves(image: &DynamicImage) -> (image::RgbImage, image::RgbImage) {
    let (width, height) = image.dimensions();
    let mid = width / 2;
    let photo = image.crop_imm(0, 0, mid, height).to_rgb8();
    let label = image.crop_imm(mid, 0, width - mid, height).to_rgb8();
    (photo, label)
}

pub fn process_dataset(
    raw_dir: &Path,
    out_dir: &Path,
    overwrite: bool,
) -> Result<SplitFiles, CityscapesError> {
    let options = ProcessOptions {
        overwrite,
        progress: false,
    };
    Ok(process_dataset_with_options(raw_dir, out_dir, &options)?.splits)
}

pub fn process_dataset_with_options(
    raw_dir: &Path,
    out_dir: &Path,
    options: &ProcessOptions,
) -> Result<ProcessReport, CityscapesError> {
    let splits = collect_files(raw_dir)?;
    let mut report = ProcessReport::default();

    for (split, files) in &splits {
        let mut progress = options
            .progress
            .then(|| ProgressBar::new(split.as_str(), files.len()));

        for source in files {
            let stem = stem_of(source)?;
            let photo_dest = photo_path(out_dir, split, &stem);
            let label_dest = label_path(out_dir, split, &stem);

            match split_and_save(source, &photo_dest, &label_dest, options.overwrite)? {
                SplitOutcome::Written => report.written += 1,
                SplitOutcome::Skipped => report.skipped += 1,
            }

            if let Some(bar) = progress.as_mut() {
                bar.update(1);
            }
        }

        if let Some(bar) = progress.as_mut() {
            bar.finish();
        }
        info!(split = split.as_str(), images = files.len(), "split processed");
    }

    info!(
        written = report.written,
        skipped = report.skipped,
        "dataset processed"
    );
    report.splits = splits;
    Ok(report)
}

/// Writes the split index using original file names.
pub fn write_split_file(path: &Path, splits: &SplitFiles) -> Result<(), CityscapesError> {
    SplitIndex::from_paths(splits).save(path)?;
    info!(path = %path.display(), "wrote split index");
    Ok(())
}
