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

use std::io::{stderr, Write};
use std::time::{Duration, Instant};

/// Single-line terminal progress bar, rendered to stderr.
pub struct ProgressBar {
    label: String,
    total: usize,
    current: usize,
    start_time: Instant,
    last_update: Instant,
    update_frequency: Duration,
}

impl ProgressBar {
    pub fn new(label: impl Into<String>, total: usize) -> Self {
        ProgressBar {
            label: label.into(),
            total,
            current: 0,
            start_time: Instant::now(),
            last_update: Instant::now(),
            update_frequency: Duration::from_millis(100),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn update(&mut self, amount: usize) {
        self.current = (self.current + amount).min(self.total);
        let now = Instant::now();
        if now.duration_since(self.last_update) >= self.update_frequency {
            self.render();
            self.last_update = now;
        }
    }

    pub fn finish(&mut self) {
        self.current = self.total;
        self.render();
        eprintln!();
    }

    fn render(&self) {
        let progress = if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        };
        let bar_width = 40;
        let filled = (progress * bar_width as f32) as usize;
        let empty = bar_width - filled.min(bar_width);

        let elapsed = self.start_time.elapsed();
        let eta = if progress > 0.0 {
            Duration::from_secs_f32(elapsed.as_secs_f32() / progress * (1.0 - progress))
        } else {
            Duration::from_secs(0)
        };

        let mut out = stderr();
        // Write failures are ignored.
        let _ = write!(
            out,
            "\r{} [{}{}] {}/{} ({:.1}%) - Elapsed: {:.1?}, ETA: {:.1?}",
            self.label,
            "=".repeat(filled.min(bar_width)),
            " ".repeat(empty),
            self.current,
            self.total,
            progress * 100.0,
            elapsed,
            eta
        );
        let _ = out.flush();
    }
}
