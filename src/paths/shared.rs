// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Join an absolute on-device path onto `root`.
pub fn device_path(root: &Path, absolute: &str) -> PathBuf {
    let relative: PathBuf = Path::new(absolute)
        .components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(relative)
}

/// Whether the file exists and can be opened for reading by this process.
pub fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

/// Readable regular files directly inside `dir`, sorted by file name.
///
/// Returns `None` when the directory itself cannot be listed.
pub fn list_readable_files(dir: &Path) -> Option<Vec<PathBuf>> {
    if fs::read_dir(dir).is_err() {
        return None;
    }

    let files = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable entry in {}: {e}", dir.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_readable(path))
        .collect();

    Some(files)
}
