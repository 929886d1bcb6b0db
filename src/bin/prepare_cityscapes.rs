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

use cityscapes_pairs::data::splitter::{
    process_dataset_with_options, write_split_file, ProcessOptions,
};
use cityscapes_pairs::utilities::config::Configuration;

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "prepare_cityscapes")]
#[command(about = "Split Cityscapes concatenated images into photo/label pairs")]
#[command(version)]
struct Cli {
    /// Directory containing raw concatenated images [default: data/raw/cityscapes]
    #[arg(long)]
    raw_dir: Option<PathBuf>,

    /// Output directory for split images [default: data/processed]
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Path to save split index JSON (train/val) [default: data/splits/cityscapes_split_seed42.json]
    #[arg(long)]
    split_file: Option<PathBuf>,

    /// Overwrite existing processed files
    #[arg(long)]
    overwrite: bool,

    /// YAML configuration file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render a progress bar per split
    #[arg(long)]
    progress: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve(&self) -> Result<Configuration, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => Configuration::from_file(path)?,
            None => Configuration::default(),
        };

        if let Some(raw_dir) = &self.raw_dir {
            config.prepare.raw_dir = raw_dir.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.prepare.out_dir = out_dir.clone();
        }
        if let Some(split_file) = &self.split_file {
            config.prepare.split_file = split_file.clone();
        }
        config.prepare.overwrite |= self.overwrite;

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.resolve()?;
    let prepare = &config.prepare;
    info!(
        raw_dir = %prepare.raw_dir.display(),
        out_dir = %prepare.out_dir.display(),
        overwrite = prepare.overwrite,
        "processing dataset"
    );

    let options = ProcessOptions {
        overwrite: prepare.overwrite,
        progress: cli.progress,
    };
    let report = process_dataset_with_options(&prepare.raw_dir, &prepare.out_dir, &options)?;
    write_split_file(&prepare.split_file, &report.splits)?;

    println!("Completed processing.");
    for (split, files) in &report.splits {
        println!("{}: {} images", split, files.len());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
